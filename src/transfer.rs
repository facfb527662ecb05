pub mod download;
pub mod upload;

pub(crate) const UPLOAD_PATH: &str = "/api/upload";
pub(crate) const DOWNLOAD_PATH: &str = "/api/download";
