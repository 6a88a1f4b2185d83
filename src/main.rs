use clap::Parser;
use opsdash::{logging, start_server, ServerArgs, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    let args = ServerArgs::parse();
    let config = ServerConfig::from_args(&args);
    start_server(config).await?;

    Ok(())
}
