/// Shared resource types used across the codebase
///
/// These are read-mostly projections of backend-owned documents. Field
/// names on the wire follow the backend's Mongo-style conventions
/// (`_id`, `branchName`, `years_subfolders`, ...); the serde renames keep
/// the Rust side idiomatic while round-tripping the exact wire shape.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Branch entry as returned by the branch listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BranchSummary {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "branchName")]
    pub branch_name: String,
}

/// Full branch document with nested years and subjects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Branch {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "branchName")]
    pub branch_name: String,
    #[serde(default)]
    pub years: Vec<Year>,
}

/// A year-of-study grouping within a branch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Year {
    #[serde(rename = "_id")]
    pub id: String,
    /// Display label, e.g. "1st" (rendered as "1st Year").
    #[serde(rename = "years_subfolders")]
    pub label: String,
    #[serde(default)]
    pub subjects: Vec<Subject>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
}

/// A text post attached to a subject.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "article", default)]
    pub body: String,
    #[serde(rename = "postedByName", default)]
    pub posted_by_name: Option<String>,
    #[serde(rename = "postedByBranch", default)]
    pub posted_by_branch: Option<String>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// A binary post attached to a subject. The blob itself lives behind
/// `file_url`; the client only ever sees the metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileEntry {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "file", default)]
    pub description: String,
    #[serde(rename = "fileUrl", default)]
    pub file_url: Option<String>,
    #[serde(rename = "postedByName", default)]
    pub posted_by_name: Option<String>,
    #[serde(rename = "postedByBranch", default)]
    pub posted_by_branch: Option<String>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Everything posted under one subject.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubjectContent {
    #[serde(default)]
    pub articles: Vec<Article>,
    #[serde(default)]
    pub files: Vec<FileEntry>,
}

/// A faculty member's profile. The backend may return a partial document,
/// so every field tolerates absence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FacultyProfile {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// A single post in the flattened faculty-dashboard view.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Post {
    Article(Article),
    File(FileEntry),
}

impl Post {
    pub fn kind(&self) -> &'static str {
        match self {
            Post::Article(_) => "article",
            Post::File(_) => "file",
        }
    }

    /// One-line text shown in post listings.
    pub fn summary(&self) -> &str {
        match self {
            Post::Article(a) => &a.body,
            Post::File(f) => &f.description,
        }
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Post::Article(a) => a.created_at,
            Post::File(f) => f.created_at,
        }
    }
}

/// Identity attached to uploaded posts. Filled from the faculty profile
/// when reachable; the server remains the authority on who actually
/// posted.
#[derive(Debug, Clone)]
pub struct PostAuthor {
    pub name: String,
    pub branch: String,
}

impl PostAuthor {
    pub fn from_profile(profile: &FacultyProfile) -> Self {
        Self {
            name: profile.name.clone().unwrap_or_else(|| "Unknown".to_string()),
            branch: profile
                .department
                .clone()
                .unwrap_or_else(|| "Unknown".to_string()),
        }
    }
}

impl Default for PostAuthor {
    fn default() -> Self {
        Self {
            name: "Unknown".to_string(),
            branch: "Unknown".to_string(),
        }
    }
}
