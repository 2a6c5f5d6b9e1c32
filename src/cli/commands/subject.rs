use std::path::PathBuf;

use clap::Subcommand;

use crate::cli::render::render_subject_content;
use crate::cli::utils::{output_error, output_success};
use crate::cli::OutputFormat;
use crate::client::{FilePayload, PortalClient, UploadOutcome};
use crate::session::Session;
use crate::types::{PostAuthor, SubjectContent};

#[derive(Subcommand)]
pub enum SubjectCommands {
    #[command(about = "Show a subject's articles and files")]
    Show {
        #[arg(help = "Branch ID")]
        branch_id: String,
        #[arg(help = "Year ID")]
        year_id: String,
        #[arg(help = "Subject ID")]
        subject_id: String,
        #[arg(help = "Subject name (display only)")]
        subject_name: Option<String>,
    },

    #[command(about = "Post an article under a subject (faculty)")]
    PostArticle {
        #[arg(help = "Branch ID")]
        branch_id: String,
        #[arg(help = "Year ID")]
        year_id: String,
        #[arg(help = "Subject ID")]
        subject_id: String,
        #[arg(help = "Article text")]
        body: String,
    },

    #[command(about = "Upload a file under a subject (faculty)")]
    UploadFile {
        #[arg(help = "Branch ID")]
        branch_id: String,
        #[arg(help = "Year ID")]
        year_id: String,
        #[arg(help = "Subject ID")]
        subject_id: String,
        #[arg(long, help = "File description")]
        description: Option<String>,
        #[arg(long, help = "Path of the file to upload")]
        file: Option<PathBuf>,
    },
}

pub async fn handle(cmd: SubjectCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        SubjectCommands::Show {
            branch_id,
            year_id,
            subject_id,
            subject_name,
        } => {
            let client = PortalClient::new();
            let content = fetch_content(&client, &branch_id, &year_id, &subject_id).await;
            render(&output_format, subject_name.as_deref(), &content)?;
            Ok(())
        }

        SubjectCommands::PostArticle {
            branch_id,
            year_id,
            subject_id,
            body,
        } => {
            let (client, token) = authed_client()?;
            let author = resolve_author(&client, &token).await;

            match client
                .create_article(&branch_id, &year_id, &subject_id, &body, &author, &token)
                .await
            {
                Ok(UploadOutcome::Sent) => {
                    if matches!(output_format, OutputFormat::Text) {
                        output_success(&output_format, "Article posted", None)?;
                    }
                    // Refetch so the new post is visible.
                    let content = fetch_content(&client, &branch_id, &year_id, &subject_id).await;
                    render(&output_format, None, &content)?;
                }
                Ok(UploadOutcome::Skipped) => {
                    println!("Nothing to post: article body is empty");
                }
                Err(err) => {
                    tracing::error!("upload error: {err}");
                    output_error(&output_format, "Article was not posted; content unchanged")?;
                }
            }

            Ok(())
        }

        SubjectCommands::UploadFile {
            branch_id,
            year_id,
            subject_id,
            description,
            file,
        } => {
            let (client, token) = authed_client()?;
            let author = resolve_author(&client, &token).await;

            let payload = match file {
                Some(path) => Some(FilePayload::from_path(&path)?),
                None => None,
            };

            match client
                .upload_file(
                    &branch_id,
                    &year_id,
                    &subject_id,
                    description.as_deref().unwrap_or(""),
                    payload,
                    &author,
                    &token,
                )
                .await
            {
                Ok(UploadOutcome::Sent) => {
                    if matches!(output_format, OutputFormat::Text) {
                        output_success(&output_format, "File uploaded", None)?;
                    }
                    let content = fetch_content(&client, &branch_id, &year_id, &subject_id).await;
                    render(&output_format, None, &content)?;
                }
                Ok(UploadOutcome::Skipped) => {
                    println!("No file selected; nothing uploaded");
                }
                Err(err) => {
                    tracing::error!("file upload error: {err}");
                    output_error(&output_format, "File was not uploaded; content unchanged")?;
                }
            }

            Ok(())
        }
    }
}

fn authed_client() -> anyhow::Result<(PortalClient, String)> {
    let session = Session::load();
    let Some(token) = session.token else {
        anyhow::bail!("Not logged in. Run 'campus auth login <email>' first");
    };

    if !session.is_privileged {
        tracing::warn!("stored token has no faculty identity; server will decide");
    }

    Ok((PortalClient::new(), token))
}

/// Posts carry the author's name and department. Pulled from the faculty
/// profile when reachable; a failed lookup falls back to placeholders
/// rather than blocking the upload.
async fn resolve_author(client: &PortalClient, token: &str) -> PostAuthor {
    match client.faculty_details(token).await {
        Ok(profile) => PostAuthor::from_profile(&profile),
        Err(err) => {
            tracing::warn!("could not resolve author from faculty profile: {err}");
            PostAuthor::default()
        }
    }
}

/// A failed content fetch renders the empty sections, not an error.
async fn fetch_content(
    client: &PortalClient,
    branch_id: &str,
    year_id: &str,
    subject_id: &str,
) -> SubjectContent {
    match client.subject_content(branch_id, year_id, subject_id).await {
        Ok(content) => content,
        Err(err) => {
            tracing::error!("error fetching content: {err}");
            SubjectContent::default()
        }
    }
}

fn render(
    output_format: &OutputFormat,
    subject_name: Option<&str>,
    content: &SubjectContent,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(content)?);
        }
        OutputFormat::Text => {
            print!("{}", render_subject_content(subject_name, content));
        }
    }
    Ok(())
}
