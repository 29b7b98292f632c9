use anyhow::Result;
use linguafranca::config::Config;
use linguafranca::console::Console;
use linguafranca::session::Session;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (absent in production shells)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("linguafranca=info".parse()?),
        )
        .init();

    info!("Starting LinguaFranca session");

    // Load configuration from environment
    let config = Config::from_env()?;

    let mut session = Session::new(config, Console::stdio());
    session.run().await?;

    info!("Session finished");
    Ok(())
}
