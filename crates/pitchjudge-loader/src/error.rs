use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("unsupported format: {0}")]
    UnsupportedFormat(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("xml error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("render error: {0}")]
    Render(String),
}

impl From<LoaderError> for pitchjudge_core::PitchjudgeError {
    fn from(err: LoaderError) -> Self {
        match err {
            LoaderError::UnsupportedFormat(p) => pitchjudge_core::PitchjudgeError::UnsupportedFormat(p),
            LoaderError::Io(e) => pitchjudge_core::PitchjudgeError::Io(e),
            other => pitchjudge_core::PitchjudgeError::Render(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, LoaderError>;
