// src/bin/cli.rs
use muster::cli;

#[tokio::main(flavor = "current_thread")]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    cli::run().await
}
