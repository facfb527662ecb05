use std::path::PathBuf;

use log::{debug, warn};
use reqwest::multipart;

use crate::{
    error::{PeerLinkError, Result},
    models::{LocalFile, ShareEntry},
    transfer::UPLOAD_PATH,
    Client,
};

impl Client {
    /// Sends one batch of files as a single multipart request and returns
    /// the backend-assigned (invite code, filename) pairs, one per file, in
    /// submission order.
    ///
    /// The batch fails as a unit: no per-file result exists until the
    /// backend has accepted the whole request, so every transport or
    /// backend error surfaces as one `UploadFailed`.
    pub async fn upload(&self, files: Vec<LocalFile>) -> Result<Vec<ShareEntry>> {
        if files.is_empty() {
            return Err(PeerLinkError::EmptyBatch);
        }
        let submitted = files.len();

        let mut form = multipart::Form::new();
        for file in files {
            let mime = file.mime();
            let part = multipart::Part::bytes(file.bytes)
                .file_name(file.file_name)
                .mime_str(&mime)?;
            form = form.part("file", part);
        }

        debug!("uploading batch of {submitted} file(s)");

        let request = self
            .http
            .post(format!("{}{}", self.config.backend_url, UPLOAD_PATH))
            .multipart(form);

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("upload request failed: {e}");
                return Err(PeerLinkError::UploadFailed);
            }
        };

        if !response.status().is_success() {
            warn!("non-2xx upload response: {response:?}");
            return Err(PeerLinkError::UploadFailed);
        }

        let entries: Vec<ShareEntry> = match response.json().await {
            Ok(entries) => entries,
            Err(e) => {
                warn!("could not decode upload response: {e}");
                return Err(PeerLinkError::UploadFailed);
            }
        };

        // one pair per submitted file, anything else is a contract violation
        if entries.len() != submitted {
            warn!(
                "backend returned {} entries for {submitted} files",
                entries.len()
            );
            return Err(PeerLinkError::UploadFailed);
        }

        debug!("upload assigned codes: {entries:?}");

        Ok(entries)
    }

    /// Reads each path and uploads the lot as one batch.
    pub async fn upload_paths(&self, paths: &[PathBuf]) -> Result<Vec<ShareEntry>> {
        let mut files = Vec::with_capacity(paths.len());
        for path in paths {
            files.push(LocalFile::from_path(path).await?);
        }
        self.upload(files).await
    }
}
