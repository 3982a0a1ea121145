//! The commit engine: folds the index into a tree, links it to the
//! current branch's parent commit, and advances the branch pointer.

use chrono::Utc;
use tracing::info;

use crate::error::Result;
use crate::objects::Commit;
use crate::repo::Repository;
use crate::tree_builder;

/// Runs §4.7: builds the tree, checks for a no-op commit, persists the
/// commit object, advances the branch, and clears the index.
///
/// Returns `Ok(None)` for the soft "nothing to commit" case.
pub fn commit(repo: &Repository, message: &str, author: &str) -> Result<Option<String>> {
    let branch = repo.refs.current_branch()?;
    let mut index = repo.load_index()?;

    if index.is_empty() {
        return Ok(None);
    }

    let tree_digest = tree_builder::build(&index, &repo.store)?;

    let parent = repo.refs.read_branch(&branch)?;
    if let Some(parent_digest) = &parent {
        let parent_commit = Commit::load(&repo.store, parent_digest)?;
        if parent_commit.tree == tree_digest {
            return Ok(None);
        }
    }

    let commit = Commit {
        tree: tree_digest,
        parents: parent.into_iter().collect(),
        author: author.to_string(),
        timestamp: Utc::now().timestamp(),
        message: message.to_string(),
    };
    let commit_digest = commit.store(&repo.store)?;
    repo.refs.write_branch(&branch, &commit_digest)?;

    index.clear();
    repo.save_index(&index)?;

    info!(%commit_digest, branch, "committed");
    Ok(Some(commit_digest))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::repo::{InitOutcome, Repository};

    fn init_repo() -> (tempfile::TempDir, Repository) {
        let dir = tempfile::tempdir().unwrap();
        let repo = match Repository::init(dir.path().to_path_buf()).unwrap() {
            InitOutcome::Created(repo) => repo,
            InitOutcome::AlreadyExists => unreachable!(),
        };
        (dir, repo)
    }

    #[test]
    fn commit_with_empty_index_is_a_soft_no_op() {
        let (_dir, repo) = init_repo();
        assert_eq!(commit(&repo, "m1", "bit user <user@bit>").unwrap(), None);
    }

    #[test]
    fn committing_unchanged_tree_twice_is_a_no_op_second_time() {
        let (_dir, repo) = init_repo();
        let mut index = repo.load_index().unwrap();
        let blob_digest = repo.store.write(crate::codec::BLOB, b"hello\n").unwrap();
        index.put("a.txt", blob_digest.clone());
        repo.save_index(&index).unwrap();

        let first = commit(&repo, "m1", "bit user <user@bit>").unwrap();
        assert!(first.is_some());

        // Re-stage the exact same content; tree digest is identical.
        let mut index = repo.load_index().unwrap();
        index.put("a.txt", blob_digest);
        repo.save_index(&index).unwrap();

        let second = commit(&repo, "m2", "bit user <user@bit>").unwrap();
        assert_eq!(second, None);
    }

    #[test]
    fn second_distinct_commit_links_to_first_as_parent() {
        let (_dir, repo) = init_repo();
        let mut index = repo.load_index().unwrap();
        index.put("a.txt", repo.store.write(crate::codec::BLOB, b"a").unwrap());
        repo.save_index(&index).unwrap();
        let first = commit(&repo, "m1", "bit user <user@bit>").unwrap().unwrap();

        let mut index = repo.load_index().unwrap();
        index.put("b.txt", repo.store.write(crate::codec::BLOB, b"b").unwrap());
        repo.save_index(&index).unwrap();
        let second = commit(&repo, "m2", "bit user <user@bit>").unwrap().unwrap();

        let second_commit = Commit::load(&repo.store, &second).unwrap();
        assert_eq!(second_commit.parents, vec![first]);

        let files: std::collections::HashMap<_, _> =
            crate::tree_walker::list(&repo.store, &second_commit.tree)
                .unwrap()
                .into_iter()
                .collect();
        assert!(files.contains_key("a.txt"));
        assert!(files.contains_key("b.txt"));
    }

    #[test]
    fn commit_clears_the_index() {
        let (_dir, repo) = init_repo();
        let mut index = repo.load_index().unwrap();
        index.put("a.txt", repo.store.write(crate::codec::BLOB, b"a").unwrap());
        repo.save_index(&index).unwrap();
        commit(&repo, "m1", "bit user <user@bit>").unwrap();

        assert!(repo.load_index().unwrap().is_empty());
    }
}
