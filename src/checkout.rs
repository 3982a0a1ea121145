//! The checkout engine: switches HEAD between branches and materializes
//! the target tree. Destructive by design — no dirty-working-tree
//! protection.

use tracing::info;

use crate::error::Result;
use crate::objects::Commit;
use crate::repo::Repository;
use crate::tree_walker;

pub enum CheckoutOutcome {
    SwitchedTo(String),
    NotFound(String),
    NoCommitsYet,
}

/// Runs §4.9.
pub fn checkout(repo: &Repository, branch: &str, create: bool) -> Result<CheckoutOutcome> {
    let prev_branch = repo.refs.current_branch()?;
    let prev_files = match repo.refs.read_branch(&prev_branch)? {
        Some(commit_digest) => {
            let commit = Commit::load(&repo.store, &commit_digest)?;
            tree_walker::list(&repo.store, &commit.tree)?
        }
        None => Vec::new(),
    };

    if !repo.refs.branch_exists(branch) {
        if !create {
            return Ok(CheckoutOutcome::NotFound(branch.to_string()));
        }
        match repo.refs.resolve_head_commit()? {
            Some(current_commit) => repo.refs.write_branch(branch, &current_commit)?,
            None => return Ok(CheckoutOutcome::NoCommitsYet),
        }
    }

    tree_walker::remove_files(&repo.repo_root, &prev_files);
    repo.refs.set_head_to_branch(branch)?;

    if let Some(commit_digest) = repo.refs.read_branch(branch)? {
        let commit = Commit::load(&repo.store, &commit_digest)?;
        tree_walker::materialize(&repo.store, &commit.tree, &repo.repo_root)?;
    }

    let mut index = repo.load_index()?;
    index.clear();
    repo.save_index(&index)?;

    info!(branch, "checked out");
    Ok(CheckoutOutcome::SwitchedTo(branch.to_string()))
}
