//! Status: three-way diff between HEAD's tree, the index, and the working
//! directory.

use std::collections::BTreeMap;
use std::fs;

use tracing::debug;

use crate::codec;
use crate::error::Result;
use crate::objects::Commit;
use crate::repo::Repository;
use crate::root::METADIR;
use crate::{fs as bitfs, tree_walker};

#[derive(Debug, PartialEq, Eq)]
pub enum StagedKind {
    NewFile,
    Modified,
}

pub struct Status {
    pub staged: Vec<(String, StagedKind)>,
    pub unstaged_modified: Vec<String>,
    pub untracked: Vec<String>,
    pub deleted: Vec<String>,
}

/// Computes §4.8's four derived sets.
pub fn status(repo: &Repository) -> Result<Status> {
    let head_files = head_tree_files(repo)?;
    let index = repo.load_index()?;
    let working_files = scan_working_tree(repo)?;

    let mut staged = Vec::new();
    for (path, index_digest) in index.iter() {
        match head_files.get(path) {
            None => staged.push((path.to_string(), StagedKind::NewFile)),
            Some(head_digest) if head_digest != index_digest => {
                staged.push((path.to_string(), StagedKind::Modified))
            }
            _ => {}
        }
    }
    staged.sort_by(|a, b| a.0.cmp(&b.0));

    let mut unstaged_modified: Vec<String> = index
        .iter()
        .filter_map(|(path, index_digest)| match working_files.get(path) {
            Some(working_digest) if working_digest != index_digest => Some(path.to_string()),
            _ => None,
        })
        .collect();
    unstaged_modified.sort();

    let mut untracked: Vec<String> = working_files
        .keys()
        .filter(|path| index.get(path).is_none() && !head_files.contains_key(path.as_str()))
        .cloned()
        .collect();
    untracked.sort();

    let mut deleted: Vec<String> = index
        .iter()
        .filter(|(path, _)| !working_files.contains_key(*path))
        .map(|(path, _)| path.to_string())
        .collect();
    deleted.sort();

    debug!(
        staged = staged.len(),
        unstaged = unstaged_modified.len(),
        untracked = untracked.len(),
        deleted = deleted.len(),
        "computed status"
    );

    Ok(Status {
        staged,
        unstaged_modified,
        untracked,
        deleted,
    })
}

fn head_tree_files(repo: &Repository) -> Result<BTreeMap<String, String>> {
    match repo.refs.resolve_head_commit()? {
        None => Ok(BTreeMap::new()),
        Some(commit_digest) => {
            let commit = Commit::load(&repo.store, &commit_digest)?;
            Ok(tree_walker::list(&repo.store, &commit.tree)?.into_iter().collect())
        }
    }
}

/// Scans the working directory (excluding `.bit`), hashing each file as a
/// blob envelope without compression — compression is irrelevant for
/// comparison purposes.
fn scan_working_tree(repo: &Repository) -> Result<BTreeMap<String, String>> {
    let mut out = BTreeMap::new();
    for path in bitfs::get_files_and_syms(&repo.repo_root)? {
        let relative = path.strip_prefix(&repo.repo_root).expect("path is under repo root");
        if relative.starts_with(METADIR) {
            continue;
        }
        let content = fs::read(&path)?;
        let env = codec::envelope(codec::BLOB, &content);
        let digest = codec::digest(&env);
        out.insert(crate::index::to_key(relative), digest);
    }
    Ok(out)
}
