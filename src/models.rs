use std::{
    fmt,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::error::{PeerLinkError, Result};

/// A validated invite code: the port number the backend assigned to one
/// shared file. Always within [1, 65535].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct InviteCode(u16);

impl InviteCode {
    pub fn new(value: u16) -> Option<Self> {
        if value == 0 {
            None
        } else {
            Some(Self(value))
        }
    }

    /// Parses the leading base-10 digit run of a token, so `"80abc"` reads
    /// as 80. Returns `None` for tokens with no leading digits or whose
    /// value falls outside [1, 65535].
    pub fn parse(token: &str) -> Option<Self> {
        let digits = token.strip_prefix('+').unwrap_or(token);
        let end = digits
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(digits.len());
        digits[..end]
            .parse::<u32>()
            .ok()
            .filter(|value| (1..=65535).contains(value))
            .map(|value| Self(value as u16))
    }

    pub fn get(self) -> u16 {
        self.0
    }
}

impl TryFrom<u16> for InviteCode {
    type Error = String;

    fn try_from(value: u16) -> std::result::Result<Self, Self::Error> {
        InviteCode::new(value).ok_or_else(|| format!("invite code out of range: {value}"))
    }
}

impl From<InviteCode> for u16 {
    fn from(code: InviteCode) -> u16 {
        code.0
    }
}

impl fmt::Display for InviteCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One file selected for upload: its display name plus the bytes to send.
#[derive(Debug, Clone)]
pub struct LocalFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl LocalFile {
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let metadata = tokio::fs::metadata(path).await?;
        if !metadata.is_file() {
            return Err(PeerLinkError::NotAFile);
        }

        let file_name = path
            .file_name()
            .ok_or(PeerLinkError::NotAFile)?
            .to_string_lossy()
            .to_string();
        let bytes = tokio::fs::read(path).await?;

        Ok(Self { file_name, bytes })
    }

    pub fn from_bytes(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Mime type guessed from the file name, octet-stream when unknown.
    pub fn mime(&self) -> String {
        mime_guess::from_path(&self.file_name)
            .first()
            .map(|mime| mime.to_string())
            .unwrap_or_else(|| "application/octet-stream".to_string())
    }
}

/// One entry of the backend's upload response: the invite code it assigned
/// plus the name it stored the file under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareEntry {
    pub port: InviteCode,
    pub filename: String,
}

/// The result of attempting one invite code of a download batch.
#[derive(Debug, Clone)]
pub enum DownloadOutcome {
    Saved {
        code: InviteCode,
        file_name: String,
        size: u64,
        path: PathBuf,
    },
    Failed {
        code: InviteCode,
        reason: String,
    },
}

impl DownloadOutcome {
    pub fn code(&self) -> InviteCode {
        match self {
            DownloadOutcome::Saved { code, .. } => *code,
            DownloadOutcome::Failed { code, .. } => *code,
        }
    }

    pub fn is_saved(&self) -> bool {
        matches!(self, DownloadOutcome::Saved { .. })
    }
}

/// Aggregate state of one finished batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchStatus {
    Succeeded,
    PartialFailure,
    Failed,
}

/// Per-code outcomes of one download batch, in the order the codes were
/// given. Every code that entered the batch has exactly one entry.
#[derive(Debug, Clone)]
pub struct DownloadReport {
    pub outcomes: Vec<DownloadOutcome>,
}

impl DownloadReport {
    pub fn status(&self) -> BatchStatus {
        let failed = self.outcomes.iter().filter(|o| !o.is_saved()).count();
        if failed == 0 {
            BatchStatus::Succeeded
        } else if failed == self.outcomes.len() {
            BatchStatus::Failed
        } else {
            BatchStatus::PartialFailure
        }
    }

    pub fn saved(&self) -> impl Iterator<Item = &DownloadOutcome> {
        self.outcomes.iter().filter(|o| o.is_saved())
    }

    pub fn failed(&self) -> impl Iterator<Item = &DownloadOutcome> {
        self.outcomes.iter().filter(|o| !o.is_saved())
    }
}
