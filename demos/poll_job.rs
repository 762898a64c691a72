//! Poll one job against a running status service.
//!
//! ```text
//! cargo run --example poll_job -- [config.toml] [job_id]
//! ```
//!
//! Without a config file the poller targets `http://localhost:8000`.

use std::path::Path;

use job_poller::config::load_config;
use job_poller::observability::logging::init_logging;
use job_poller::{JobPoller, PollHooks, PollerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => load_config(Path::new(&path))?,
        None => PollerConfig::new("http://localhost:8000"),
    };
    let job_id = args.next().unwrap_or_else(|| "job_one".to_string());

    init_logging(&config.observability)?;

    tracing::info!(
        base_url = %config.base_url,
        job_id = %job_id,
        timeout_secs = config.polling.overall_timeout_secs,
        "Polling job"
    );

    let poller = JobPoller::new(&config)?;
    let hooks = PollHooks::new()
        .on_progress(|result| println!("Current status: {}", result.status))
        .on_error(|message| eprintln!("Error: {message}"));

    match poller.poll_until_complete(&job_id, hooks).await {
        Ok(result) => println!("Job finished with status: {}", result.status),
        Err(e) => eprintln!("Failed to get job status: {e}"),
    }
    Ok(())
}
