use anyhow::Result;
use cadence::prelude::*;
use colored::Colorize;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .init();

    // 2. Load the demo configuration. An optional `cadev.toml` next to the
    //    binary overrides the built-in jobs.
    let settings = load_config()?;
    info!(
        "Starting {} v{} with {} job(s).",
        ENGINE_NAME.cyan(),
        VERSION,
        settings.jobs.len()
    );

    // 3. Build and schedule every configured job.
    for job in &settings.jobs {
        let sequence = job.build()?;
        let label = job.label.clone();
        schedule(sequence, move || {
            let label = label.clone();
            async move {
                info!("[{}] fired at {}", label.yellow(), chrono::Utc::now());
                Ok(())
            }
        });
        info!("Scheduled job '{}'.", job.label);
    }

    // 4. Run until Ctrl+C. There is no per-run cancellation; finite jobs
    //    end on their own and the rest end with the process.
    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received. Exiting.");
    Ok(())
}

fn load_config() -> Result<CadenceConfig> {
    let settings: CadenceConfig = config::Config::builder()
        .add_source(config::File::with_name("cadev").required(false))
        .build()?
        .try_deserialize()?;

    if settings.jobs.is_empty() {
        return Ok(demo_config());
    }
    Ok(settings)
}

/// The jobs `cadev` runs when no configuration file is present.
fn demo_config() -> CadenceConfig {
    CadenceConfig {
        jobs: vec![
            JobConfig {
                label: "heartbeat".to_string(),
                count: 2,
                unit: Unit::Second,
                at: None,
                take: None,
            },
            JobConfig {
                label: "five-then-done".to_string(),
                count: 1,
                unit: Unit::Second,
                at: None,
                take: Some(5),
            },
        ],
    }
}
