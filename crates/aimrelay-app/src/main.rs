use anyhow::Result;
use clap::Parser;

use aimrelay::{logging, run_server, Cli, RelayConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    logging::init(cli.verbose, cli.json_logs);

    let config = RelayConfig::load(&cli)?;
    run_server(config).await
}
