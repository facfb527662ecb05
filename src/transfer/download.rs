use std::path::Path;

use log::{debug, info, warn};
use reqwest::header::CONTENT_DISPOSITION;

use crate::{
    code::parse_codes,
    error::{PeerLinkError, Result},
    models::{DownloadOutcome, DownloadReport, InviteCode},
    transfer::DOWNLOAD_PATH,
    Client,
};

/// Name a file is saved under when the backend response carries no usable
/// filename.
pub const FALLBACK_FILE_NAME: &str = "downloaded-file";

impl Client {
    /// Parses free text into invite codes and downloads them as one batch.
    /// Refuses to contact the backend when no valid code survives parsing.
    pub async fn receive(&self, input: &str) -> Result<DownloadReport> {
        self.download(&parse_codes(input)).await
    }

    /// Attempts every code exactly once, strictly in the order given, one
    /// request in flight at a time. A failed code is recorded and the loop
    /// moves on to the next; the report holds one outcome per input code.
    /// An empty batch is refused before any request is made.
    ///
    /// Duplicate codes are fetched again; a later save under the same
    /// resolved name overwrites the earlier file.
    pub async fn download(&self, codes: &[InviteCode]) -> Result<DownloadReport> {
        if codes.is_empty() {
            return Err(PeerLinkError::NoValidCodes);
        }

        let mut outcomes = Vec::with_capacity(codes.len());

        for &code in codes {
            match self.fetch_one(code).await {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => {
                    warn!("download for code {code} failed: {e}");
                    outcomes.push(DownloadOutcome::Failed {
                        code,
                        reason: e.to_string(),
                    });
                }
            }
        }

        Ok(DownloadReport { outcomes })
    }

    async fn fetch_one(&self, code: InviteCode) -> Result<DownloadOutcome> {
        let url = format!("{}{}/{code}", self.config.backend_url, DOWNLOAD_PATH);
        debug!("requesting {url}");

        let response = self.http.get(url).send().await?;

        if !response.status().is_success() {
            return Err(PeerLinkError::CodeRejected {
                code,
                status: response.status(),
            });
        }

        let file_name = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .and_then(filename_from_disposition)
            .unwrap_or(FALLBACK_FILE_NAME)
            .to_string();

        let bytes = response.bytes().await?;

        tokio::fs::create_dir_all(&self.config.download_dir).await?;
        let path = self.config.download_dir.join(&file_name);
        tokio::fs::write(&path, &bytes).await?;

        info!("saved code {code} as {path:?}");

        Ok(DownloadOutcome::Saved {
            code,
            file_name,
            size: bytes.len() as u64,
            path,
        })
    }
}

/// Pulls the quoted name out of a `Content-Disposition` value such as
/// `attachment; filename="report.pdf"`. Anything without a non-empty quoted
/// name yields `None`. The name is reduced to its final path component so a
/// response cannot point outside the download directory.
fn filename_from_disposition(value: &str) -> Option<&str> {
    let rest = value.split_once("filename=")?.1;
    let rest = rest.strip_prefix('"')?;
    let quoted = &rest[..rest.find('"')?];
    Path::new(quoted).file_name()?.to_str()
}
