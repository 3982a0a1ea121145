//! Working-tree traversal helpers. No I/O normalization beyond path
//! component folding.

use std::{
    collections::VecDeque,
    path::{Component, Path, PathBuf},
};

use crate::error::Result;

pub fn normalize(path: &Path) -> PathBuf {
    let mut ret = PathBuf::new();
    for comp in path.components() {
        use Component::*;
        match comp {
            Prefix(pf) => ret.push(pf.as_os_str()),
            RootDir => ret.push("/"),
            CurDir => {}
            ParentDir => {
                ret.pop();
            }
            Normal(n) => ret.push(n),
        }
    }

    ret
}

/// Traverses the given path, returning every file and directory found
/// (including `path` itself).
pub fn traverse_path(path: &Path) -> Result<Vec<PathBuf>> {
    let mut ret = Vec::new();
    let mut pathbuf_queue: VecDeque<PathBuf> = VecDeque::new();
    pathbuf_queue.push_back(path.to_path_buf());
    // technically BFS, but this is a tree, so no HashSet needed.

    while let Some(pathbuf) = pathbuf_queue.pop_front() {
        if !pathbuf.is_dir() {
            ret.push(pathbuf);
            continue;
        }

        for p in pathbuf.read_dir()? {
            let p = match p {
                Ok(p) => p,
                Err(_) => continue,
            };
            pathbuf_queue.push_back(p.path());
        }
        ret.push(pathbuf);
    }

    Ok(ret)
}

#[inline]
pub fn get_files_and_dirs(path: &Path) -> Result<(Vec<PathBuf>, Vec<PathBuf>)> {
    Ok(traverse_path(path)?.into_iter().partition(|p| p.is_dir()))
}

#[inline]
pub fn get_files_and_syms(path: &Path) -> Result<Vec<PathBuf>> {
    Ok(traverse_path(path)?
        .into_iter()
        .filter(|p| p.is_file() || p.is_symlink())
        .collect())
}

#[inline]
pub fn get_dirs(path: &Path) -> Result<Vec<PathBuf>> {
    Ok(traverse_path(path)?
        .into_iter()
        .filter(|p| p.is_dir())
        .collect())
}
