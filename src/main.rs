use anyhow::Result;
use clap::Parser;
use report_researcher::{cli, logging, server};

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Args::parse();
    let config = args.into_config()?;
    logging::init(config.verbose);

    server::serve(&config).await
}
