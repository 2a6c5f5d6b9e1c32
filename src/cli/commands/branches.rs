use clap::Subcommand;

use crate::cli::render::render_branch_grid;
use crate::cli::OutputFormat;
use crate::client::PortalClient;

#[derive(Subcommand)]
pub enum BranchesCommands {
    #[command(about = "List all branches")]
    List,
}

pub async fn handle(cmd: BranchesCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        BranchesCommands::List => {
            let client = PortalClient::new();

            // A failed fetch renders the empty grid, not an error.
            let branches = match client.list_branches().await {
                Ok(branches) => branches,
                Err(err) => {
                    tracing::error!("error fetching branches: {err}");
                    Vec::new()
                }
            };

            match output_format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&branches)?);
                }
                OutputFormat::Text => {
                    print!("{}", render_branch_grid(&branches));
                }
            }

            Ok(())
        }
    }
}
