use bit::status::{self, StagedKind};
use bit::repo::Repository;
use bit::Result;

pub fn run() -> Result<()> {
    let repo = Repository::discover()?;
    let st = status::status(&repo)?;

    if !st.staged.is_empty() {
        println!("Changes to be committed:");
        for (path, kind) in &st.staged {
            let label = match kind {
                StagedKind::NewFile => "new file",
                StagedKind::Modified => "modified",
            };
            println!("\t{label}: {path}");
        }
        println!();
    }

    if !st.unstaged_modified.is_empty() || !st.deleted.is_empty() {
        println!("Changes not staged for commit:");
        for path in &st.unstaged_modified {
            println!("\tmodified: {path}");
        }
        for path in &st.deleted {
            println!("\tdeleted:  {path}");
        }
        println!();
    }

    if !st.untracked.is_empty() {
        println!("Untracked files:");
        for path in &st.untracked {
            println!("\t{path}");
        }
        println!();
    }

    if st.staged.is_empty()
        && st.unstaged_modified.is_empty()
        && st.untracked.is_empty()
        && st.deleted.is_empty()
    {
        println!("nothing to commit, working tree clean");
    }

    Ok(())
}
