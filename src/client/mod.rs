//! Typed client for the portal backend's REST endpoints.
//!
//! Each operation issues one HTTP call (mutations add the documented
//! refetch) and returns a parsed resource or a `ClientError`. Requests
//! carry no timeout, retry, or cancellation; a slow backend just delays
//! the rendering. Privileged calls attach `Authorization: Bearer <token>`
//! and leave the actual access decision to the server.

use std::path::Path;

use reqwest::multipart::{Form, Part};
use reqwest::Response;
use serde::Deserialize;
use serde_json::json;
use url::Url;

use crate::config;
use crate::error::ClientError;
use crate::types::{
    Article, Branch, BranchSummary, FacultyProfile, FileEntry, Post, PostAuthor, SubjectContent,
};

/// Result of a post/upload operation. `Skipped` means the input guard
/// fired and no request was issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadOutcome {
    Sent,
    Skipped,
}

impl UploadOutcome {
    pub fn is_skipped(&self) -> bool {
        matches!(self, UploadOutcome::Skipped)
    }
}

/// File blob staged for upload.
#[derive(Debug, Clone)]
pub struct FilePayload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl FilePayload {
    pub fn from_path(path: &Path) -> Result<Self, ClientError> {
        let bytes = std::fs::read(path).map_err(|source| ClientError::FilePayload {
            path: path.display().to_string(),
            source,
        })?;

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());

        Ok(Self { file_name, bytes })
    }
}

#[derive(Deserialize)]
struct FacultyDetailsResponse {
    faculty: FacultyProfile,
}

#[derive(Deserialize)]
struct FacultyPostsResponse {
    #[serde(default)]
    results: Vec<BranchPosts>,
}

/// Posts grouped per branch by the backend; the dashboard flattens them.
#[derive(Deserialize)]
struct BranchPosts {
    #[serde(default)]
    articles: Vec<Article>,
    #[serde(default)]
    files: Vec<FileEntry>,
}

#[derive(Deserialize)]
struct LoginResponse {
    token: String,
}

pub struct PortalClient {
    http: reqwest::Client,
    base_url: Url,
}

impl PortalClient {
    pub fn new() -> Self {
        Self::with_base_url(config::config().api.base_url.clone())
    }

    pub fn with_base_url(base_url: Url) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// GET `/api/upload/branches`.
    pub async fn list_branches(&self) -> Result<Vec<BranchSummary>, ClientError> {
        let url = self.endpoint("/api/upload/branches")?;
        self.log_request("GET", &url);

        let res = self.http.get(url).send().await?;
        Ok(Self::ok(res).await?.json().await?)
    }

    /// GET `/api/upload/branches/:id`.
    pub async fn get_branch(&self, branch_id: &str) -> Result<Branch, ClientError> {
        let url = self.endpoint(&format!("/api/upload/branches/{branch_id}"))?;
        self.log_request("GET", &url);

        let res = self.http.get(url).send().await?;
        Ok(Self::ok(res).await?.json().await?)
    }

    /// POST `/api/upload/subject-Content`. The capitalization is backend
    /// contract.
    pub async fn subject_content(
        &self,
        branch_id: &str,
        year_id: &str,
        subject_id: &str,
    ) -> Result<SubjectContent, ClientError> {
        let url = self.endpoint("/api/upload/subject-Content")?;
        self.log_request("POST", &url);

        let res = self
            .http
            .post(url)
            .json(&json!({
                "branchId": branch_id,
                "yearId": year_id,
                "subjectId": subject_id,
            }))
            .send()
            .await?;
        Ok(Self::ok(res).await?.json().await?)
    }

    /// POST `/api/upload/branches/:id/subjects` (auth), then refetch the
    /// branch so the caller observes the updated resource. A blank name
    /// issues no request and returns `None`.
    pub async fn create_subject(
        &self,
        branch_id: &str,
        year_id: &str,
        subject_name: &str,
        token: &str,
    ) -> Result<Option<Branch>, ClientError> {
        let name = subject_name.trim();
        if name.is_empty() {
            return Ok(None);
        }

        let url = self.endpoint(&format!("/api/upload/branches/{branch_id}/subjects"))?;
        self.log_request("POST", &url);

        let res = self
            .http
            .post(url)
            .bearer_auth(token)
            .json(&json!({
                "yearId": year_id,
                "subjectName": name,
            }))
            .send()
            .await?;
        Self::ok(res).await?;

        let branch = self.get_branch(branch_id).await?;
        Ok(Some(branch))
    }

    /// POST `/api/upload/branches/:branchId/upload` (auth) with a JSON
    /// article body. The backend expects the post fields as a *stringified*
    /// JSON object under `data`. A blank body issues no request.
    pub async fn create_article(
        &self,
        branch_id: &str,
        year_id: &str,
        subject_id: &str,
        body: &str,
        author: &PostAuthor,
        token: &str,
    ) -> Result<UploadOutcome, ClientError> {
        let content = body.trim();
        if content.is_empty() {
            return Ok(UploadOutcome::Skipped);
        }

        let url = self.upload_endpoint(branch_id)?;
        self.log_request("POST", &url);

        let data = serde_json::to_string(&json!({
            "yearId": year_id,
            "subjectId": subject_id,
            "type": "article",
            "content": content,
            "postedByName": author.name.as_str(),
            "postedByBranch": author.branch.as_str(),
        }))?;

        let res = self
            .http
            .post(url)
            .bearer_auth(token)
            .json(&json!({ "data": data }))
            .send()
            .await?;
        Self::ok(res).await?;

        Ok(UploadOutcome::Sent)
    }

    /// Multipart POST to `/api/upload/branches/:branchId/upload` (auth).
    /// Without a file payload this is a no-op: no request is issued.
    pub async fn upload_file(
        &self,
        branch_id: &str,
        year_id: &str,
        subject_id: &str,
        description: &str,
        file: Option<FilePayload>,
        author: &PostAuthor,
        token: &str,
    ) -> Result<UploadOutcome, ClientError> {
        let Some(file) = file else {
            return Ok(UploadOutcome::Skipped);
        };

        let url = self.upload_endpoint(branch_id)?;
        self.log_request("POST", &url);

        let data = serde_json::to_string(&json!({
            "file": description,
            "yearId": year_id,
            "subjectId": subject_id,
            "type": "file",
            "postedByName": author.name.as_str(),
            "postedByBranch": author.branch.as_str(),
        }))?;

        let part = Part::bytes(file.bytes).file_name(file.file_name);
        let form = Form::new().part("file", part).text("data", data);

        let res = self
            .http
            .post(url)
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await?;
        Self::ok(res).await?;

        Ok(UploadOutcome::Sent)
    }

    /// GET `/api/faculty/faculty-details` (auth).
    pub async fn faculty_details(&self, token: &str) -> Result<FacultyProfile, ClientError> {
        let url = self.endpoint("/api/faculty/faculty-details")?;
        self.log_request("GET", &url);

        let res = self.http.get(url).bearer_auth(token).send().await?;
        let details: FacultyDetailsResponse = Self::ok(res).await?.json().await?;
        Ok(details.faculty)
    }

    /// GET `/api/upload/posts/faculty` (auth), flattened across the
    /// per-branch grouping the backend returns.
    pub async fn faculty_posts(&self, token: &str) -> Result<Vec<Post>, ClientError> {
        let url = self.endpoint("/api/upload/posts/faculty")?;
        self.log_request("GET", &url);

        let res = self.http.get(url).bearer_auth(token).send().await?;
        let grouped: FacultyPostsResponse = Self::ok(res).await?.json().await?;

        let mut posts = Vec::new();
        for group in grouped.results {
            posts.extend(group.articles.into_iter().map(Post::Article));
            posts.extend(group.files.into_iter().map(Post::File));
        }
        Ok(posts)
    }

    /// POST `/api/faculty/login`. Returns the bearer token to store.
    pub async fn login(&self, email: &str, password: &str) -> Result<String, ClientError> {
        let url = self.endpoint("/api/faculty/login")?;
        self.log_request("POST", &url);

        let res = self
            .http
            .post(url)
            .json(&json!({
                "email": email,
                "password": password,
            }))
            .send()
            .await?;
        let login: LoginResponse = Self::ok(res).await?.json().await?;
        Ok(login.token)
    }

    /// The one endpoint shared by article and file uploads. Built through
    /// `endpoint()` so the path separator is always present.
    fn upload_endpoint(&self, branch_id: &str) -> Result<Url, ClientError> {
        self.endpoint(&format!("/api/upload/branches/{branch_id}/upload"))
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        Ok(self.base_url.join(path)?)
    }

    fn log_request(&self, method: &str, url: &Url) {
        if config::config().api.request_logging {
            tracing::debug!("{method} {url}");
        }
    }

    async fn ok(res: Response) -> Result<Response, ClientError> {
        let status = res.status();
        if status.is_success() {
            return Ok(res);
        }

        let message = res.text().await.unwrap_or_default();
        Err(ClientError::Status { status, message })
    }
}

impl Default for PortalClient {
    fn default() -> Self {
        Self::new()
    }
}
