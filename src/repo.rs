//! Repository-wide path wiring: locates the repository root and exposes
//! the object store, index and ref store rooted at it.

use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::index::Index;
use crate::refs::RefStore;
use crate::root::{self, METADIR};
use crate::store::ObjectStore;

pub struct Repository {
    pub repo_root: PathBuf,
    pub bit_path: PathBuf,
    pub index_path: PathBuf,
    pub store: ObjectStore,
    pub refs: RefStore,
}

impl Repository {
    /// Discovers the repository rooted at or above the current directory.
    pub fn discover() -> Result<Self> {
        let repo_root =
            root::get_repo_root(std::env::current_dir()?.as_path()).ok_or(Error::NotARepository)?;
        Ok(Self::at(repo_root))
    }

    pub fn at(repo_root: PathBuf) -> Self {
        let bit_path = repo_root.join(METADIR);
        let index_path = bit_path.join("index");
        let store = ObjectStore::new(bit_path.join("objects"));
        let refs = RefStore::new(bit_path.clone());
        Self {
            repo_root,
            bit_path,
            index_path,
            store,
            refs,
        }
    }

    pub fn load_index(&self) -> Result<Index> {
        Index::load(&self.index_path)
    }

    pub fn save_index(&self, index: &Index) -> Result<()> {
        index.save(&self.index_path)
    }

    /// Creates `.bit/{objects,refs/heads}`, an empty index, and HEAD →
    /// `refs/heads/master`. A repository already present at `repo_root` is
    /// a soft condition, not an error.
    pub fn init(repo_root: PathBuf) -> Result<InitOutcome> {
        if root::is_repo(&repo_root) {
            return Ok(InitOutcome::AlreadyExists);
        }
        let repo = Self::at(repo_root);
        std::fs::create_dir_all(&repo.bit_path)?;
        std::fs::create_dir_all(repo.bit_path.join("objects"))?;
        repo.refs.init()?;
        Index::default().save(&repo.index_path)?;
        Ok(InitOutcome::Created(repo))
    }
}

pub enum InitOutcome {
    Created(Repository),
    AlreadyExists,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn init_creates_expected_layout() {
        let dir = tempfile::tempdir().unwrap();
        let repo = match Repository::init(dir.path().to_path_buf()).unwrap() {
            InitOutcome::Created(repo) => repo,
            InitOutcome::AlreadyExists => panic!("expected a fresh repository"),
        };
        assert!(repo.bit_path.join("objects").is_dir());
        assert!(repo.bit_path.join("refs").join("heads").is_dir());
        assert!(repo.bit_path.join("HEAD").is_file());
        assert!(repo.index_path.is_file());
    }

    #[test]
    fn init_twice_reports_already_exists() {
        let dir = tempfile::tempdir().unwrap();
        Repository::init(dir.path().to_path_buf()).unwrap();
        assert!(matches!(
            Repository::init(dir.path().to_path_buf()).unwrap(),
            InitOutcome::AlreadyExists
        ));
    }
}
