//! Components Foundry runtime - serves one configured handler over HTTP,
//! or scores a single JSON document with `--score <file>`.

use std::env;
use std::io::Read;
use std::sync::Arc;

use foundry_common::FailureBody;
use foundry_runtime::adapters::{self, ServingAdapter};
use foundry_runtime::{logging, AppState, Config, VERSION};
use tokio::net::TcpListener;

fn print_version() {
    println!("foundry-runtime {}", VERSION);
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    if args.iter().any(|a| a == "--version" || a == "-V") {
        print_version();
        return Ok(());
    }

    // Load configuration
    let config = Config::load().map_err(|e| {
        format!(
            "Failed to load configuration: {}. \
             Check config.toml and FOUNDRY__SECTION__KEY environment variables.",
            e
        )
    })?;

    logging::init(&config.logging.level);

    let state = Arc::new(AppState::from_config(config.clone()));
    tracing::info!("Using handler: {}", config.handler.reference);

    match state.dispatcher.warm_up() {
        Ok(handler) => tracing::info!(
            "Handler ready: {} from module {}",
            handler.function,
            handler.module
        ),
        Err(e) => tracing::warn!("Handler unavailable, /health will report unhealthy: {}", e),
    }

    if let Some(pos) = args.iter().position(|a| a == "--score") {
        let path = args
            .get(pos + 1)
            .ok_or("--score requires a file path, or - for stdin")?;
        return score(&state, path);
    }

    let app = adapters::router(state);

    // Start server
    let addr = format!("{}:{}", config.api.host, config.api.port);
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Score one JSON document through the serving adapter and print the result.
fn score(state: &AppState, path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let input = if path == "-" {
        let mut input = String::new();
        std::io::stdin().read_to_string(&mut input)?;
        input
    } else {
        std::fs::read_to_string(path)?
    };

    ServingAdapter::init();
    let output = match serde_json::from_str(&input) {
        Ok(data) => serde_json::to_string(&ServingAdapter::run(&state.dispatcher, data))?,
        Err(e) => {
            tracing::error!("Invalid JSON in {}: {}", path, e);
            serde_json::to_string(&FailureBody::new(format!("Invalid JSON in input: {}", e)))?
        }
    };

    println!("{}", output);
    Ok(())
}
