use bit::repo::{InitOutcome, Repository};
use bit::Result;

pub fn run() -> Result<()> {
    let repo_root = std::env::current_dir()?;
    match Repository::init(repo_root)? {
        InitOutcome::Created(repo) => println!(
            "Initialized empty bit repository in {}",
            repo.repo_root.display()
        ),
        InitOutcome::AlreadyExists => println!("Repository already exists"),
    }
    Ok(())
}
