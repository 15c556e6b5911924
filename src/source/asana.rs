use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::TaskSource;
use crate::error::{Result, RoadmapError};
use crate::model::remote_task::{RemoteRef, RemoteTask};

const PAGE_SIZE: u32 = 100;
const REF_FIELDS: &str = "name,completed";

pub struct AsanaSource {
    base_url: String,
    token: String,
    client: reqwest::Client,
}

/// Task relations that live behind their own endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    Subtasks,
    Dependencies,
    Dependents,
}

impl Relation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Relation::Subtasks => "subtasks",
            Relation::Dependencies => "dependencies",
            Relation::Dependents => "dependents",
        }
    }
}

#[derive(Deserialize)]
struct Page<T> {
    data: Vec<T>,
    #[serde(default)]
    next_page: Option<NextPage>,
}

#[derive(Deserialize)]
struct NextPage {
    offset: String,
}

impl AsanaSource {
    pub fn new(base_url: &str, token: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("roadmap/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| RoadmapError::config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
            client,
        })
    }

    async fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Page<T>> {
        let url = format!("{}/api/1.0{path}", self.base_url);
        debug!(%url, "GET");

        let resp = self
            .client
            .get(&url)
            .query(query)
            .bearer_auth(&self.token)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|source| RoadmapError::Fetch {
                url: url.clone(),
                source,
            })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|source| RoadmapError::Fetch {
            url: url.clone(),
            source,
        })?;

        if !status.is_success() {
            return Err(RoadmapError::Status {
                url,
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| RoadmapError::parse("API response", e))
    }

    /// Follows `next_page.offset` until the collection is exhausted.
    async fn get_all<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>> {
        let mut items = Vec::new();
        let mut offset: Option<String> = None;

        loop {
            let mut params: Vec<(&str, String)> = query.to_vec();
            params.push(("limit", PAGE_SIZE.to_string()));
            if let Some(off) = offset.take() {
                params.push(("offset", off));
            }

            let page: Page<T> = self.get_page(path, &params).await?;
            items.extend(page.data);

            match page.next_page {
                Some(next) => offset = Some(next.offset),
                None => break,
            }
        }

        Ok(items)
    }

    fn project_tasks_path(project_id: &str) -> String {
        format!("/projects/{}/tasks", urlencoding::encode(project_id))
    }

    fn relation_path(task_gid: &str, relation: Relation) -> String {
        format!(
            "/tasks/{}/{}",
            urlencoding::encode(task_gid),
            relation.as_str()
        )
    }

    /// Every task with every field the API will expand, untyped.
    pub async fn list_tasks_expanded(&self, project_id: &str) -> Result<Vec<Value>> {
        self.get_all(
            &Self::project_tasks_path(project_id),
            &[("opt_expand", ".".to_string())],
        )
        .await
    }

    pub async fn list_related_expanded(&self, task_gid: &str, relation: Relation) -> Result<Vec<Value>> {
        self.get_all(
            &Self::relation_path(task_gid, relation),
            &[("opt_expand", ".".to_string())],
        )
        .await
    }

    async fn list_related(&self, task_gid: &str, relation: Relation) -> Result<Vec<RemoteRef>> {
        self.get_all(
            &Self::relation_path(task_gid, relation),
            &[("opt_fields", REF_FIELDS.to_string())],
        )
        .await
    }
}

#[async_trait]
impl TaskSource for AsanaSource {
    fn name(&self) -> &str {
        "Asana"
    }

    async fn list_tasks(&self, project_id: &str, fields: &[String]) -> Result<Vec<RemoteTask>> {
        self.get_all(
            &Self::project_tasks_path(project_id),
            &[("opt_fields", fields.join(","))],
        )
        .await
    }

    async fn list_subtasks(&self, task_gid: &str) -> Result<Vec<RemoteRef>> {
        self.list_related(task_gid, Relation::Subtasks).await
    }

    async fn list_dependencies(&self, task_gid: &str) -> Result<Vec<RemoteRef>> {
        self.list_related(task_gid, Relation::Dependencies).await
    }
}
