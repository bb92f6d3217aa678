use thiserror::Error;

/// Result type for cipher registry operations
pub type Result<T> = std::result::Result<T, CipherError>;

/// Errors raised by the cipher registry.
///
/// Evaluating a cipher never fails; only looking one up by name can.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CipherError {
    /// No cipher registered under this id
    #[error("Unknown cipher: {0}")]
    UnknownCipher(String),

    /// A cipher with the same id is already registered
    #[error("Cipher already registered: {0}")]
    DuplicateCipher(String),
}

impl CipherError {
    pub fn unknown(id: impl Into<String>) -> Self {
        Self::UnknownCipher(id.into())
    }

    pub fn duplicate(id: impl Into<String>) -> Self {
        Self::DuplicateCipher(id.into())
    }
}
