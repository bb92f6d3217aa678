use thiserror::Error;

pub type Result<T> = std::result::Result<T, UnfoldError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnfoldError {
    #[error("Unsupported base {0} (expected 2..=62)")]
    InvalidBase(u32),
}
