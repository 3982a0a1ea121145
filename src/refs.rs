//! HEAD and branch refs.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

pub enum Head {
    Symbolic(String),
    Detached(String),
}

pub struct RefStore {
    bit_path: PathBuf,
}

impl RefStore {
    pub fn new(bit_path: PathBuf) -> Self {
        Self { bit_path }
    }

    fn head_path(&self) -> PathBuf {
        self.bit_path.join("HEAD")
    }

    fn branch_path(&self, name: &str) -> PathBuf {
        self.bit_path.join("refs").join("heads").join(name)
    }

    /// Initializes HEAD to `ref: refs/heads/master` and creates the
    /// `refs/heads` directory (with no branches yet).
    pub fn init(&self) -> Result<()> {
        fs::create_dir_all(self.bit_path.join("refs").join("heads"))?;
        write_atomic(&self.head_path(), b"ref: refs/heads/master\n")
    }

    pub fn read_head(&self) -> Result<Head> {
        let text = fs::read_to_string(self.head_path())?;
        let trimmed = text.trim();
        match trimmed.strip_prefix("ref: ") {
            Some(rest) => Ok(Head::Symbolic(rest.to_string())),
            None => Ok(Head::Detached(trimmed.to_string())),
        }
    }

    pub fn current_branch(&self) -> Result<String> {
        match self.read_head()? {
            Head::Symbolic(r) => r
                .strip_prefix("refs/heads/")
                .map(str::to_string)
                .ok_or_else(|| Error::MalformedObject(format!("unexpected ref path {r:?}"))),
            Head::Detached(digest) => Ok(digest),
        }
    }

    pub fn set_head_to_branch(&self, branch: &str) -> Result<()> {
        write_atomic(
            &self.head_path(),
            format!("ref: refs/heads/{branch}\n").as_bytes(),
        )
    }

    pub fn branch_exists(&self, name: &str) -> bool {
        self.branch_path(name).exists()
    }

    /// Reads the commit digest a branch points at, if the branch exists.
    pub fn read_branch(&self, name: &str) -> Result<Option<String>> {
        let path = self.branch_path(name);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?.trim().to_string()))
    }

    pub fn write_branch(&self, name: &str, commit_digest: &str) -> Result<()> {
        let path = self.branch_path(name);
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        write_atomic(&path, format!("{commit_digest}\n").as_bytes())
    }

    pub fn delete_branch(&self, name: &str) -> Result<()> {
        let path = self.branch_path(name);
        if !path.exists() {
            return Err(Error::BranchNotFound(name.to_string()));
        }
        fs::remove_file(path)?;
        Ok(())
    }

    /// Resolves the commit digest the current branch points at, or `None`
    /// if there have been no commits yet.
    pub fn resolve_head_commit(&self) -> Result<Option<String>> {
        let branch = self.current_branch()?;
        self.read_branch(&branch)
    }

    pub fn list_branches(&self) -> Result<Vec<String>> {
        let dir = self.bit_path.join("refs").join("heads");
        let mut names = Vec::new();
        if dir.exists() {
            for entry in fs::read_dir(dir)? {
                let entry = entry?;
                if let Some(name) = entry.file_name().to_str() {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = path.parent().expect("ref path always has a parent");
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
