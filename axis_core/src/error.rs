use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum AxisError {
    #[error("sink error: {0}")]
    Sink(String),
    #[error("source error: {0}")]
    Source(String),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("io error: {0}")]
    Io(String),
}

#[derive(Debug, Error, Clone)]
pub enum BuildError {
    #[error("missing sink")]
    MissingSink,
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
}

pub type Result<T> = eyre::Result<T>;
pub use eyre::Report;
