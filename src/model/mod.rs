pub mod document;
pub mod remote_task;
