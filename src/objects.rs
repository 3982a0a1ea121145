//! Typed blob/tree/commit objects: canonical encoders and decoders layered
//! on the envelope codec.

use crate::codec::{BLOB, COMMIT, TREE};
use crate::error::{Error, Result};
use crate::store::ObjectStore;

pub const MODE_FILE: &str = "100644";
pub const MODE_DIR: &str = "40000";

/// The well-known digest of the empty tree, re-derived at compile time in
/// tests — spelled out here because it's the canonical fixed point every
/// fresh repository's `commit` ultimately builds on.
pub const EMPTY_TREE_DIGEST: &str = "4b825dc642cb6eb9a060e54bf8d69288fbee4904";

/// Opaque file content. No normalization is ever applied.
pub struct Blob<'a> {
    pub content: &'a [u8],
}

impl<'a> Blob<'a> {
    pub fn store(&self, store: &ObjectStore) -> Result<String> {
        store.write(BLOB, self.content)
    }
}

/// One named child of a tree: either a file (`100644`) or a subdirectory
/// (`40000`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    pub mode: &'static str,
    pub name: String,
    pub digest: String,
}

impl TreeEntry {
    pub fn file(name: impl Into<String>, digest: impl Into<String>) -> Self {
        Self {
            mode: MODE_FILE,
            name: name.into(),
            digest: digest.into(),
        }
    }

    pub fn dir(name: impl Into<String>, digest: impl Into<String>) -> Self {
        Self {
            mode: MODE_DIR,
            name: name.into(),
            digest: digest.into(),
        }
    }

    pub fn is_dir(&self) -> bool {
        self.mode == MODE_DIR
    }
}

/// A directory listing: entries are always serialized sorted by
/// `(mode, name)` so that two trees with equal entry sets hash identically
/// regardless of construction order.
pub struct Tree {
    pub entries: Vec<TreeEntry>,
}

impl Tree {
    pub fn new(mut entries: Vec<TreeEntry>) -> Result<Self> {
        entries.sort_by(|a, b| (a.mode, &a.name).cmp(&(b.mode, &b.name)));
        let mut seen = std::collections::HashSet::new();
        for e in &entries {
            if !seen.insert(&e.name) {
                return Err(Error::TreeConflict(e.name.clone()));
            }
        }
        Ok(Self { entries })
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        for entry in &self.entries {
            let digest_bytes = hex::decode(&entry.digest)
                .map_err(|_| Error::MalformedObject(format!("bad digest {}", entry.digest)))?;
            if digest_bytes.len() != 20 {
                return Err(Error::MalformedObject(format!(
                    "digest {} is not 20 bytes",
                    entry.digest
                )));
            }
            buf.extend_from_slice(entry.mode.as_bytes());
            buf.push(b' ');
            buf.extend_from_slice(entry.name.as_bytes());
            buf.push(0);
            buf.extend_from_slice(&digest_bytes);
        }
        Ok(buf)
    }

    pub fn decode(content: &[u8]) -> Result<Self> {
        let mut entries = Vec::new();
        let mut rest = content;
        while !rest.is_empty() {
            let nul_pos = rest
                .iter()
                .position(|&b| b == 0)
                .ok_or_else(|| Error::MalformedObject("truncated tree entry".into()))?;
            let header = std::str::from_utf8(&rest[..nul_pos])
                .map_err(|_| Error::MalformedObject("tree entry header is not utf-8".into()))?;
            let (mode, name) = header
                .split_once(' ')
                .ok_or_else(|| Error::MalformedObject(format!("bad tree entry {header:?}")))?;
            let mode = match mode {
                MODE_FILE => MODE_FILE,
                MODE_DIR => MODE_DIR,
                other => {
                    return Err(Error::MalformedObject(format!(
                        "unknown tree entry mode {other:?}"
                    )))
                }
            };
            if rest.len() < nul_pos + 1 + 20 {
                return Err(Error::MalformedObject("truncated tree entry digest".into()));
            }
            let digest_bytes = &rest[nul_pos + 1..nul_pos + 1 + 20];
            entries.push(TreeEntry {
                mode,
                name: name.to_string(),
                digest: hex::encode(digest_bytes),
            });
            rest = &rest[nul_pos + 1 + 20..];
        }
        Ok(Self { entries })
    }

    pub fn store(&self, store: &ObjectStore) -> Result<String> {
        store.write(TREE, &self.encode()?)
    }

    pub fn load(store: &ObjectStore, digest: &str) -> Result<Self> {
        let (ty, content) = store.read(digest)?;
        if ty != TREE {
            return Err(Error::TypeMismatch {
                expected: TREE,
                found: ty,
            });
        }
        Self::decode(&content)
    }
}

/// Commit authorship: an arbitrary UTF-8 identity string, reused for both
/// `author` and `committer` (this engine never distinguishes them).
pub struct Commit {
    pub tree: String,
    pub parents: Vec<String>,
    pub author: String,
    pub timestamp: i64,
    pub message: String,
}

const TZ_OFFSET: &str = "+0000";

impl Commit {
    pub fn encode(&self) -> Vec<u8> {
        let mut text = format!("tree {}\n", self.tree);
        for parent in &self.parents {
            text.push_str(&format!("parent {parent}\n"));
        }
        text.push_str(&format!(
            "author {} {} {}\n",
            self.author, self.timestamp, TZ_OFFSET
        ));
        text.push_str(&format!(
            "committer {} {} {}\n",
            self.author, self.timestamp, TZ_OFFSET
        ));
        text.push('\n');
        text.push_str(&self.message);
        text.into_bytes()
    }

    pub fn decode(content: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(content)
            .map_err(|_| Error::MalformedObject("commit content is not utf-8".into()))?;
        let (header, message) = text
            .split_once("\n\n")
            .ok_or_else(|| Error::MalformedObject("commit missing header/message separator".into()))?;

        let mut tree = None;
        let mut parents = Vec::new();
        let mut author = None;
        let mut timestamp = 0i64;

        for line in header.lines() {
            if let Some(rest) = line.strip_prefix("tree ") {
                tree = Some(rest.to_string());
            } else if let Some(rest) = line.strip_prefix("parent ") {
                parents.push(rest.to_string());
            } else if let Some(rest) = line.strip_prefix("author ") {
                let (identity, ts) = split_identity_and_timestamp(rest)?;
                author = Some(identity);
                timestamp = ts;
            } else if line.strip_prefix("committer ").is_some() {
                // Author and committer are identical in this engine; only
                // the author line's timestamp is authoritative.
            } else if !line.is_empty() {
                return Err(Error::MalformedObject(format!("unexpected header line {line:?}")));
            }
        }

        Ok(Self {
            tree: tree.ok_or_else(|| Error::MalformedObject("commit missing tree".into()))?,
            parents,
            author: author.ok_or_else(|| Error::MalformedObject("commit missing author".into()))?,
            timestamp,
            message: message.to_string(),
        })
    }

    pub fn store(&self, store: &ObjectStore) -> Result<String> {
        store.write(COMMIT, &self.encode())
    }

    pub fn load(store: &ObjectStore, digest: &str) -> Result<Self> {
        let (ty, content) = store.read(digest)?;
        if ty != COMMIT {
            return Err(Error::TypeMismatch {
                expected: COMMIT,
                found: ty,
            });
        }
        Self::decode(&content)
    }
}

fn split_identity_and_timestamp(rest: &str) -> Result<(String, i64)> {
    // "<identity> SP <unix-seconds> SP <tz-offset>" — identity itself may
    // contain spaces, so split from the right.
    let mut parts = rest.rsplitn(3, ' ');
    let _tz = parts.next();
    let ts = parts.next();
    let identity = parts.next();
    match (identity, ts) {
        (Some(identity), Some(ts)) => {
            let ts: i64 = ts
                .parse()
                .map_err(|_| Error::MalformedObject(format!("bad timestamp {ts:?}")))?;
            Ok((identity.to_string(), ts))
        }
        _ => Err(Error::MalformedObject(format!("malformed author line {rest:?}"))),
    }
}

/// Persists and returns the digest of the canonical empty tree.
pub fn empty_tree(store: &ObjectStore) -> Result<String> {
    store.write(TREE, &[])
}
