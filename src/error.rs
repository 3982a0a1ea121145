use std::path::PathBuf;

use thiserror::Error;

/// All failure kinds the engine can produce. Soft conditions such as
/// "nothing to commit" are never represented here — callers report those
/// directly and return `Ok(())`.
#[derive(Error, Debug)]
pub enum Error {
    #[error("not a bit repository (or any parent up to /)")]
    NotARepository,

    #[error("path not found: {0}")]
    PathNotFound(PathBuf),

    #[error("invalid path: {0}")]
    InvalidPath(String),

    #[error("not a file or directory: {0}")]
    NotAFileOrDir(PathBuf),

    #[error("object not found: {0}")]
    ObjectNotFound(String),

    #[error("corrupt object {0}")]
    CorruptObject(String),

    #[error("malformed object: {0}")]
    MalformedObject(String),

    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: String,
    },

    #[error("tree conflict: {0} is both a file and a directory")]
    TreeConflict(String),

    #[error("no commits yet")]
    NoCommitsYet,

    #[error("branch not found: {0}")]
    BranchNotFound(String),

    #[error("branch already exists: {0}")]
    BranchExists(String),

    #[error("commit message must not be empty")]
    EmptyCommitMessage,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
