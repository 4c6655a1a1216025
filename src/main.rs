use chrono::Local;
use clap::Parser;
use vgscrape::{config::Cli, info_time, process::process_site, Result};

#[tokio::main]
async fn main() -> Result<()> {
    let start_time = Local::now();
    let config = Cli::parse().into_config();
    process_site(&config).await?;
    info_time!(start_time, "Full program time:");

    Ok(())
}
