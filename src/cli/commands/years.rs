use clap::Subcommand;

use crate::cli::render::render_branch_years;
use crate::cli::utils::{output_error, output_success};
use crate::cli::OutputFormat;
use crate::client::PortalClient;
use crate::session::Session;

#[derive(Subcommand)]
pub enum YearsCommands {
    #[command(about = "Show a branch's years and subjects")]
    Show {
        #[arg(help = "Branch ID")]
        branch_id: String,
    },

    #[command(about = "Add a subject under a year (faculty)")]
    AddSubject {
        #[arg(help = "Branch ID")]
        branch_id: String,
        #[arg(help = "Year ID")]
        year_id: String,
        #[arg(help = "Subject name")]
        name: String,
    },
}

pub async fn handle(cmd: YearsCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        YearsCommands::Show { branch_id } => {
            let session = Session::load();
            let client = PortalClient::new();

            match client.get_branch(&branch_id).await {
                Ok(branch) => match output_format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&branch)?);
                    }
                    OutputFormat::Text => {
                        print!("{}", render_branch_years(&branch, session.is_privileged));
                    }
                },
                Err(err) => {
                    tracing::error!("error fetching branch: {err}");
                    output_error(&output_format, "No branch data available")?;
                }
            }

            Ok(())
        }

        YearsCommands::AddSubject {
            branch_id,
            year_id,
            name,
        } => {
            let session = Session::load();
            let Some(token) = session.token else {
                anyhow::bail!("Not logged in. Run 'campus auth login <email>' first");
            };

            // The token may not look like a faculty token; the server is
            // the authority, so warn and submit anyway.
            if !session.is_privileged {
                tracing::warn!("stored token has no faculty identity; server will decide");
            }

            let client = PortalClient::new();
            match client
                .create_subject(&branch_id, &year_id, &name, &token)
                .await
            {
                Ok(Some(branch)) => match output_format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&branch)?);
                    }
                    OutputFormat::Text => {
                        output_success(
                            &output_format,
                            &format!("Subject '{}' added", name.trim()),
                            None,
                        )?;
                        print!("{}", render_branch_years(&branch, session.is_privileged));
                    }
                },
                Ok(None) => {
                    println!("Nothing to add: subject name is empty");
                }
                Err(err) => {
                    tracing::error!("error adding subject: {err}");
                    output_error(&output_format, "Subject was not added; branch unchanged")?;
                }
            }

            Ok(())
        }
    }
}
