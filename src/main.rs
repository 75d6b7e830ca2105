use anyhow::Result;
use relaychat::cli;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run().await
}
