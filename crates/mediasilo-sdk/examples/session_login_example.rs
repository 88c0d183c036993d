/*
[INPUT]:  Username, password and hostname from the environment
[OUTPUT]: Current user and project listing over a session
[POS]:    Examples - session login flow demonstration
[UPDATE]: When the login flow changes
*/

use mediasilo_sdk::*;
use tracing_subscriber::EnvFilter;

/// Example: session login
///
/// Reads MEDIASILO_USERNAME, MEDIASILO_PASSWORD and MEDIASILO_HOSTNAME.
/// The first call logs in; later calls reuse the session.
#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let var = |name: &str| std::env::var(name).unwrap_or_default();
    let credentials = match Credentials::password(
        var("MEDIASILO_USERNAME"),
        var("MEDIASILO_PASSWORD"),
        var("MEDIASILO_HOSTNAME"),
    ) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Invalid credentials: {}", e);
            return;
        }
    };

    let client = match MediaSiloClient::new(credentials) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return;
        }
    };

    match client.me().await {
        Ok(me) => println!(
            "Logged in as {} ({})",
            me.user_name.unwrap_or_default(),
            me.account_id.unwrap_or_default()
        ),
        Err(e) => {
            eprintln!("Login failed ({:?}): {}", e.class(), e);
            return;
        }
    }

    match client.get_projects().await {
        Ok(projects) => {
            for project in projects {
                println!("  {} {}", project.id.unwrap_or_default(), project.name);
            }
        }
        Err(e) => eprintln!("Failed to list projects: {}", e),
    }

    if let Err(e) = client.logout().await {
        eprintln!("Logout failed: {}", e);
    }
}
