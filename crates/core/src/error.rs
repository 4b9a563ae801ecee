use clinote_types::TextError;

/// Errors from the fallible edges of the note engine.
///
/// Parsing, combining and expanding never fail; these variants cover configuration loading,
/// registry construction and name lookups.
#[derive(Debug, thiserror::Error)]
pub enum NoteError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid token key: {0}")]
    InvalidKey(#[from] TextError),
    #[error("token key already registered: {0}")]
    DuplicateKey(String),
    #[error("failed to read configuration file: {0}")]
    ConfigRead(std::io::Error),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type NoteResult<T> = std::result::Result<T, NoteError>;
