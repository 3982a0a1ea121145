//! Folds a flat index into the nested tree objects it represents.
//!
//! Builds an owned trie, consumes it post-order to mint tree objects, and
//! drops it — cycles are impossible since the input is just a set of
//! slash-separated paths (design note in SPEC_FULL.md §9).

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::index::Index;
use crate::objects::{self, Tree, TreeEntry};
use crate::store::ObjectStore;

#[derive(Default)]
struct TrieNode {
    files: BTreeMap<String, String>,
    children: BTreeMap<String, TrieNode>,
}

impl TrieNode {
    fn insert(&mut self, components: &[&str], digest: &str) -> Result<()> {
        let (head, rest) = components
            .split_first()
            .expect("insert is never called with an empty path");

        if head.is_empty() || head.contains('\0') {
            return Err(Error::InvalidPath(components.join("/")));
        }

        if rest.is_empty() {
            if self.children.contains_key(*head) {
                return Err(Error::TreeConflict(head.to_string()));
            }
            self.files.insert(head.to_string(), digest.to_string());
        } else {
            if self.files.contains_key(*head) {
                return Err(Error::TreeConflict(head.to_string()));
            }
            self.children
                .entry(head.to_string())
                .or_default()
                .insert(rest, digest)?;
        }
        Ok(())
    }

    fn build(self, store: &ObjectStore) -> Result<String> {
        let mut entries = Vec::with_capacity(self.files.len() + self.children.len());
        for (name, digest) in self.files {
            entries.push(TreeEntry::file(name, digest));
        }
        for (name, child) in self.children {
            let digest = child.build(store)?;
            entries.push(TreeEntry::dir(name, digest));
        }
        Tree::new(entries)?.store(store)
    }
}

/// Builds and persists the nested tree objects described by `index`,
/// returning the root tree's digest.
pub fn build(index: &Index, store: &ObjectStore) -> Result<String> {
    if index.is_empty() {
        return objects::empty_tree(store);
    }

    let mut root = TrieNode::default();
    for (path, digest) in index.iter() {
        let components: Vec<&str> = path.split('/').collect();
        if components.is_empty() {
            return Err(Error::InvalidPath(path.to_string()));
        }
        root.insert(&components, digest)?;
    }

    root.build(store)
}
