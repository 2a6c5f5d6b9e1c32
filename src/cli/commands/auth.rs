use std::io::Write;

use clap::Subcommand;
use serde_json::json;

use crate::cli::utils::output_success;
use crate::cli::OutputFormat;
use crate::client::PortalClient;
use crate::session::{self, Session, SessionConfig};

#[derive(Subcommand)]
pub enum AuthCommands {
    #[command(about = "Login to the portal and store the session token")]
    Login {
        #[arg(help = "Faculty email")]
        email: String,
        #[arg(long, help = "Password (will prompt if not provided)")]
        password: Option<String>,
    },

    #[command(about = "Logout and clear the stored token")]
    Logout,

    #[command(about = "Show current authentication status")]
    Status,
}

pub async fn handle(cmd: AuthCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        AuthCommands::Login { email, password } => {
            let password = match password {
                Some(password) => password,
                None => prompt_password()?,
            };

            let client = PortalClient::new();
            let token = client
                .login(&email, &password)
                .await
                .map_err(|err| anyhow::anyhow!("login failed: {err}"))?;

            let is_privileged = session::derive_privilege(&token);
            session::save_session_config(&SessionConfig { token: Some(token) })?;

            output_success(
                &output_format,
                &format!("Logged in as {}", email),
                Some(json!({ "privileged": is_privileged })),
            )?;
            Ok(())
        }

        AuthCommands::Logout => {
            session::clear_session()?;
            output_success(&output_format, "Logged out", None)?;
            Ok(())
        }

        AuthCommands::Status => {
            let session = Session::load();

            match output_format {
                OutputFormat::Json => {
                    println!(
                        "{}",
                        serde_json::to_string_pretty(&json!({
                            "token_present": session.token.is_some(),
                            "is_privileged": session.is_privileged,
                        }))?
                    );
                }
                OutputFormat::Text => {
                    println!(
                        "Token present: {}",
                        if session.token.is_some() { "yes" } else { "no" }
                    );
                    println!(
                        "Faculty session: {}",
                        if session.is_privileged { "yes" } else { "no" }
                    );
                }
            }
            Ok(())
        }
    }
}

fn prompt_password() -> anyhow::Result<String> {
    eprint!("Password: ");
    std::io::stderr().flush()?;

    let mut password = String::new();
    std::io::stdin().read_line(&mut password)?;
    Ok(password.trim_end_matches(['\r', '\n']).to_string())
}
