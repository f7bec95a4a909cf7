//! Uploaded pet photos on local disk.

use std::path::PathBuf;
use std::sync::LazyLock;

use regex::Regex;

/// URL prefix the upload directory is served under.
pub const UPLOADS_URL_PREFIX: &str = "/uploads";

/// Fallback when sanitizing leaves nothing usable.
const DEFAULT_FILE_NAME: &str = "upload";

static UNSAFE_CHARS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_.-]").expect("valid regex"));

/// Reduce a client-supplied file name to a safe, flat ASCII name.
///
/// Path separators and whitespace become `_`, anything outside
/// `[A-Za-z0-9_.-]` is dropped, and leading/trailing `.` and `_` are trimmed
/// so the result can never escape the upload directory or be hidden.
pub fn secure_filename(name: &str) -> String {
    let flattened = name.replace(['/', '\\'], " ");
    let joined = flattened.split_whitespace().collect::<Vec<_>>().join("_");
    let cleaned = UNSAFE_CHARS_RE.replace_all(&joined, "");
    let trimmed = cleaned.trim_matches(|c: char| c == '.' || c == '_');
    if trimmed.is_empty() {
        DEFAULT_FILE_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Stored name for an upload: seconds of the submission time, then the
/// sanitized original name.
pub fn stored_file_name(submission_time: i64, original: &str) -> String {
    format!("{}_{}", submission_time / 1000, secure_filename(original))
}

#[derive(Debug, Clone)]
pub struct UploadDir {
    root: PathBuf,
}

impl UploadDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &std::path::Path {
        &self.root
    }

    /// Write an image and return the URL it is served at.
    pub async fn save(
        &self,
        submission_time: i64,
        original_name: &str,
        bytes: &[u8],
    ) -> std::io::Result<String> {
        let name = stored_file_name(submission_time, original_name);
        tokio::fs::create_dir_all(&self.root).await?;
        tokio::fs::write(self.root.join(&name), bytes).await?;
        Ok(format!("{UPLOADS_URL_PREFIX}/{name}"))
    }

    /// Delete the file behind an upload URL. URLs outside the upload prefix
    /// are ignored; a file that is already gone is not an error.
    pub async fn remove_by_url(&self, url: &str) -> std::io::Result<()> {
        let Some(name) = url
            .strip_prefix(UPLOADS_URL_PREFIX)
            .and_then(|rest| rest.strip_prefix('/'))
        else {
            return Ok(());
        };
        if name.is_empty() || name != secure_filename(name) {
            return Ok(());
        }

        match tokio::fs::remove_file(self.root.join(name)).await {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }
}
