mod app;
mod cli;
mod config;
mod dump;
mod error;
mod event;
mod model;
mod render;
mod source;
mod sync;
mod ui;
mod validate;

use std::process::ExitCode;

use tracing_subscriber::{fmt, EnvFilter};

fn init_tracing(interactive: bool) {
    let default = if interactive { "off" } else { "roadmap=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let command = match cli::parse_args(&args) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    init_tracing(command.is_interactive());

    match cli::run(command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
