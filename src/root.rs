use std::path::{Path, PathBuf};

pub const METADIR: &str = ".bit";

/// Whether there's a `.bit` directory in `path` or its parent(s).
pub fn is_repo(path: &Path) -> bool {
    get_repo_root(path).is_some()
}

/// # Returns
/// - Some(PathBuf) if this path or one of its parents is a `bit` repository,
///   with value as the path to the repository that has `.bit` in it.
/// - None otherwise.
pub fn get_repo_root(path: &Path) -> Option<PathBuf> {
    if path.as_os_str().is_empty() {
        return None;
    }
    let mut path = path.canonicalize().unwrap_or_default();
    let mut exists = path.join(METADIR).exists();
    while !exists {
        match path.parent() {
            None => return None,
            Some(p) => path = p.to_path_buf(),
        }
        exists = path.join(METADIR).exists();
    }
    Some(path)
}
