use bit::error::Error;
use bit::repo::Repository;
use bit::Result;

pub fn run(name: Option<&str>, delete: bool) -> Result<()> {
    let repo = Repository::discover()?;

    if delete {
        let name = name.ok_or_else(|| Error::InvalidPath("branch name required for -d".into()))?;
        repo.refs.delete_branch(name)?;
        println!("Deleted branch {name}");
        return Ok(());
    }

    match name {
        None => {
            let current = repo.refs.current_branch()?;
            for branch in repo.refs.list_branches()? {
                let marker = if branch == current { "*" } else { " " };
                println!("{marker} {branch}");
            }
        }
        Some(name) => {
            if repo.refs.branch_exists(name) {
                return Err(Error::BranchExists(name.to_string()));
            }
            match repo.refs.resolve_head_commit()? {
                Some(head_commit) => {
                    repo.refs.write_branch(name, &head_commit)?;
                    println!("Created branch {name}");
                }
                None => println!("No commits yet, cannot create a new branch"),
            }
        }
    }
    Ok(())
}
