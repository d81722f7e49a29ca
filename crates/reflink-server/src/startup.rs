//! Server startup utilities.

use tracing::info;

/// Prints the startup banner.
pub fn print_banner() {
    info!(r#"
    ____       ______      __
   / __ \___  / __/ /_____/ /__
  / /_/ / _ \/ /_/ / / __ \ //_/
 / _, _/  __/ __/ / / / / / ,<
/_/ |_|\___/_/ /_/_/_/ /_/_/|_|

        Referral link service
    "#);
}

/// Prints server startup information.
pub fn print_startup_info(addr: &str, metrics_path: Option<&str>) {
    let separator = "=".repeat(60);
    info!("{}", separator);
    info!("REST API:  http://{}/api/v1", addr);
    info!("Health:    http://{}/health", addr);
    info!("API Docs:  http://{}/api-docs/openapi.json", addr);
    if let Some(path) = metrics_path {
        info!("Metrics:   http://{}{}", addr, path);
    }
    info!("{}", separator);
}
