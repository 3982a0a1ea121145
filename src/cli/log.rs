use bit::objects::Commit;
use bit::repo::Repository;
use bit::Result;

/// Walks the first-parent chain from HEAD, printing up to `limit` commits.
pub fn run(limit: usize) -> Result<()> {
    let repo = Repository::discover()?;

    let mut next = repo.refs.resolve_head_commit()?;
    if next.is_none() {
        println!("no commits yet");
        return Ok(());
    }

    let mut printed = 0;
    while let Some(digest) = next {
        if printed >= limit {
            break;
        }
        let commit = Commit::load(&repo.store, &digest)?;
        println!("commit {digest}");
        println!("Author: {}", commit.author);
        println!("Date:   {}", commit.timestamp);
        println!();
        for line in commit.message.lines() {
            println!("    {line}");
        }
        println!();

        printed += 1;
        next = commit.parents.first().cloned();
    }
    Ok(())
}
