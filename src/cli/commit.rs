use bit::error::Error;
use bit::repo::Repository;
use bit::Result;

const DEFAULT_IDENTITY: &str = "bit user <user@bit>";

pub fn run(message: &str, author: Option<&str>) -> Result<()> {
    if message.is_empty() {
        return Err(Error::EmptyCommitMessage);
    }

    let repo = Repository::discover()?;
    let author = author.unwrap_or(DEFAULT_IDENTITY);

    match bit::commit::commit(&repo, message, author)? {
        Some(digest) => println!("Committed as {}", &digest[..7]),
        None => println!("nothing to commit"),
    }
    Ok(())
}
