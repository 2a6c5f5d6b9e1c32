use clap::Subcommand;
use serde_json::json;

use crate::cli::render::{render_faculty_posts, render_faculty_profile, render_posts_histogram};
use crate::cli::OutputFormat;
use crate::client::PortalClient;
use crate::session::Session;
use crate::types::FacultyProfile;

#[derive(Subcommand)]
pub enum FacultyCommands {
    #[command(about = "Show the faculty dashboard (profile, posts, activity)")]
    Dashboard,
}

pub async fn handle(cmd: FacultyCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        FacultyCommands::Dashboard => {
            let session = Session::load();
            // Without a token the backend rejects both calls and the
            // dashboard renders empty.
            let token = session.token.unwrap_or_default();
            let client = PortalClient::new();

            // Two independent in-flight fetches; neither blocks the other.
            let (profile_res, posts_res) = futures::join!(
                client.faculty_details(&token),
                client.faculty_posts(&token)
            );

            let profile = profile_res.unwrap_or_else(|err| {
                tracing::error!("error fetching faculty: {err}");
                FacultyProfile::default()
            });
            let posts = posts_res.unwrap_or_else(|err| {
                tracing::error!("error fetching posts: {err}");
                Vec::new()
            });

            match output_format {
                OutputFormat::Json => {
                    println!(
                        "{}",
                        serde_json::to_string_pretty(&json!({
                            "faculty": profile,
                            "posts": posts,
                        }))?
                    );
                }
                OutputFormat::Text => {
                    print!("{}", render_faculty_profile(&profile, posts.len()));
                    println!();
                    print!("{}", render_posts_histogram(&posts));
                    println!();
                    print!("{}", render_faculty_posts(&posts));
                }
            }

            Ok(())
        }
    }
}
