use anyhow::Result;
use bub::cli::{run, Cli};
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    run(Cli::parse()).await
}
