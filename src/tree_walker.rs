//! Recursive enumeration and materialization of tree objects.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::Result;
use crate::objects::{self, Tree};
use crate::store::ObjectStore;

/// Recursively enumerates `(path, digest)` pairs for every blob reachable
/// from `root_digest`. Directory entries are descended into, never
/// returned themselves.
pub fn list(store: &ObjectStore, root_digest: &str) -> Result<Vec<(String, String)>> {
    let mut out = Vec::new();
    walk(store, root_digest, "", &mut out)?;
    Ok(out)
}

fn walk(store: &ObjectStore, tree_digest: &str, prefix: &str, out: &mut Vec<(String, String)>) -> Result<()> {
    let tree = Tree::load(store, tree_digest)?;
    for entry in tree.entries {
        let path = if prefix.is_empty() {
            entry.name.clone()
        } else {
            format!("{prefix}/{}", entry.name)
        };
        if entry.is_dir() {
            walk(store, &entry.digest, &path, out)?;
        } else if entry.mode == objects::MODE_FILE {
            out.push((path, entry.digest));
        }
        // Unknown modes (none exist beyond the two handled here) are
        // skipped per spec.
    }
    Ok(())
}

/// Materializes `root_digest`'s tree into `target_dir`, creating parent
/// directories as needed and overwriting existing files. Any I/O failure
/// aborts the whole checkout.
pub fn materialize(store: &ObjectStore, root_digest: &str, target_dir: &Path) -> Result<()> {
    materialize_tree(store, root_digest, target_dir)
}

fn materialize_tree(store: &ObjectStore, tree_digest: &str, target_dir: &Path) -> Result<()> {
    let tree = Tree::load(store, tree_digest)?;
    for entry in tree.entries {
        let target = target_dir.join(&entry.name);
        if entry.is_dir() {
            fs::create_dir_all(&target)?;
            materialize_tree(store, &entry.digest, &target)?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            let (_, content) = store.read(&entry.digest)?;
            fs::write(&target, content)?;
        }
    }
    debug!(%tree_digest, dir = %target_dir.display(), "materialized tree");
    Ok(())
}

/// Deletes the files enumerated by `tree_files` from `target_dir`,
/// best-effort: per-path failures are logged and swallowed, never fatal.
pub fn remove_files(target_dir: &Path, tree_files: &[(String, String)]) {
    for (path, _digest) in tree_files {
        let target = target_dir.join(PathBuf::from(path));
        if let Err(e) = fs::remove_file(&target) {
            debug!(path = %target.display(), error = %e, "failed to remove file during checkout, continuing");
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::index::Index;
    use crate::tree_builder;

    #[test]
    fn list_enumerates_all_blobs_with_full_paths() {
        let dir = tempfile::tempdir().unwrap();
        let store = ObjectStore::new(dir.path().to_path_buf());
        let mut index = Index::default();
        index.put("dir/x", "1".repeat(40));
        index.put("z", "2".repeat(40));
        let root = tree_builder::build(&index, &store).unwrap();

        let mut listed = list(&store, &root).unwrap();
        listed.sort();
        assert_eq!(
            listed,
            vec![
                ("dir/x".to_string(), "1".repeat(40)),
                ("z".to_string(), "2".repeat(40)),
            ]
        );
    }

    #[test]
    fn materialize_writes_file_contents_into_target_dir() {
        let src_dir = tempfile::tempdir().unwrap();
        let store = ObjectStore::new(src_dir.path().to_path_buf());

        let blob_digest = store.write(crate::codec::BLOB, b"hello\n").unwrap();
        let mut index = Index::default();
        index.put("nested/a.txt", blob_digest);
        let root = tree_builder::build(&index, &store).unwrap();

        let target = tempfile::tempdir().unwrap();
        materialize(&store, &root, target.path()).unwrap();

        let content = fs::read_to_string(target.path().join("nested/a.txt")).unwrap();
        assert_eq!(content, "hello\n");
    }
}
