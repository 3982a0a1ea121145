use std::fs;
use std::path::{Path, PathBuf};

use bit::error::Error;
use bit::objects::Blob;
use bit::repo::Repository;
use bit::root::METADIR;
use bit::{fs as bitfs, Result};

/// Stages a file, or recursively every file under a directory, for each of
/// `paths`. Anything under the metadata directory is always excluded.
pub fn run(paths: &[PathBuf]) -> Result<()> {
    let repo = Repository::discover()?;
    let mut index = repo.load_index()?;

    for path in paths {
        let absolute = std::env::current_dir()?.join(path);
        if !absolute.exists() {
            return Err(Error::PathNotFound(path.clone()));
        }

        for file in bitfs::get_files_and_syms(&absolute)? {
            let relative = file
                .strip_prefix(&repo.repo_root)
                .map_err(|_| Error::InvalidPath(file.display().to_string()))?;
            if relative.starts_with(METADIR) {
                continue;
            }

            stage_file(&repo, &mut index, &file, relative)?;
        }
    }

    repo.save_index(&index)?;
    Ok(())
}

fn stage_file(
    repo: &Repository,
    index: &mut bit::index::Index,
    absolute: &Path,
    relative: &Path,
) -> Result<()> {
    let content = fs::read(absolute)?;
    let digest = Blob { content: &content }.store(&repo.store)?;
    index.put(bit::index::to_key(relative), digest);
    Ok(())
}
