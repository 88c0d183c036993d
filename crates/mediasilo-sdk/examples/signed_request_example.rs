/*
[INPUT]:  YAML config file with consumer key/secret
[OUTPUT]: Signed asset lookups
[POS]:    Examples - signed-request flow demonstration
[UPDATE]: When signing or config format changes
*/

use mediasilo_sdk::*;
use tracing_subscriber::EnvFilter;

/// Example: signed requests from a config file
///
/// ```yaml
/// credentials:
///   consumer_key: KEY
///   consumer_secret: SECRET
/// ```
///
/// Usage: cargo run --example signed_request_example -- mediasilo.yaml PROJECT_ID
#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut args = std::env::args().skip(1);
    let (Some(config_path), Some(project_id)) = (args.next(), args.next()) else {
        eprintln!("usage: signed_request_example <config.yaml> <project-id>");
        return;
    };

    let client = match SdkConfig::from_file(&config_path).and_then(SdkConfig::into_client) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to configure client: {}", e);
            return;
        }
    };

    match client.get_assets_by_project(&project_id, true).await {
        Ok(assets) => {
            println!("{} assets in project {}", assets.len(), project_id);
            for asset in assets {
                println!("  [{}] {} ({})", asset.asset_type, asset.title, asset.id);
            }
        }
        Err(ApiError::RateLimited { retry_after }) => {
            eprintln!("Rate limited, retry after {:?}", retry_after);
        }
        Err(e) => eprintln!("Request failed: {}", e),
    }
}
