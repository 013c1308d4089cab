use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("invalid host: enter correct ip address or domain name")]
    InvalidHost,

    #[error("no operation mapped for service '{0}'")]
    UnknownService(String),

    #[error("submission failed: {0}")]
    Submit(String),

    #[error("{0}")]
    Wait(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("config file not found at {0}")]
    ConfigNotFound(PathBuf),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("probe failed: {0}")]
    Probe(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LookupError>;
