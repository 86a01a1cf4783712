use social_api::config::Config;
use social_api::lifecycle::setup_tracing;
use social_api::{start_server, ServerError};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    setup_tracing();

    let config = Config::load().inspect_err(|e| error!("{e}"))?;
    start_server(config).await?;

    info!("Server stopped");
    Ok(())
}
