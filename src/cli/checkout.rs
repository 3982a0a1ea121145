use bit::checkout::{self, CheckoutOutcome};
use bit::repo::Repository;
use bit::Result;

pub fn run(branch: &str, create: bool) -> Result<()> {
    let repo = Repository::discover()?;
    match checkout::checkout(&repo, branch, create)? {
        CheckoutOutcome::SwitchedTo(name) => println!("Switched to branch {name}"),
        CheckoutOutcome::NotFound(name) => println!("branch {name} not found"),
        CheckoutOutcome::NoCommitsYet => println!("no commits yet"),
    }
    Ok(())
}
