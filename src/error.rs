use crate::models::InviteCode;

#[derive(Debug, thiserror::Error)]
pub enum PeerLinkError {
    #[error("IO error: {0}")]
    IOError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Request error: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Not a file")]
    NotAFile,

    #[error("No files in upload batch")]
    EmptyBatch,

    #[error("Upload failed")]
    UploadFailed,

    #[error("No valid invite codes in input")]
    NoValidCodes,

    #[error("No file available for invite code {code} (status {status})")]
    CodeRejected {
        code: InviteCode,
        status: reqwest::StatusCode,
    },

    #[error("Error: could not get $HOME value")]
    NoHomeDir,

    #[error("Could not serialize config")]
    ConfigSerializationFail(#[from] toml::ser::Error),

    #[error("Could not parse config file")]
    ConfigParseError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, PeerLinkError>;
