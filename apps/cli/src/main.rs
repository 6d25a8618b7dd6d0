//! backstageify CLI — awesome-azd gallery to Backstage catalog converter.
//!
//! Fetches the azd template gallery index plus each template's `azure.yaml`
//! and emits a Backstage `catalog-info.yaml` multi-document stream.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
