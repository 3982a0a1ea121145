//! The staging index: a persisted path→blob-digest map.
//!
//! On-disk format is line-oriented, one entry per line:
//! `<40-hex-digest>\t<escaped-path>\n`, escaping backslash, tab and newline
//! so any byte-safe path round-trips losslessly.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::Result;

#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct Index {
    entries: BTreeMap<String, String>,
}

impl Index {
    /// A missing file yields the empty map.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)?;
        let mut entries = BTreeMap::new();
        for line in text.lines() {
            if line.is_empty() {
                continue;
            }
            let (digest, escaped_path) = line
                .split_once('\t')
                .expect("index lines are always digest-tab-path");
            entries.insert(unescape(escaped_path), digest.to_string());
        }
        Ok(Self { entries })
    }

    /// Whole-file rewrite, via temp-file + rename.
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut buf = Vec::new();
        for (path_key, digest) in &self.entries {
            buf.extend_from_slice(digest.as_bytes());
            buf.push(b'\t');
            buf.extend_from_slice(escape(path_key).as_bytes());
            buf.push(b'\n');
        }
        let dir = path.parent().expect("index path always has a parent");
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(&buf)?;
        tmp.persist(path).map_err(|e| e.error)?;
        Ok(())
    }

    pub fn put(&mut self, path: impl Into<String>, digest: impl Into<String>) {
        self.entries.insert(path.into(), digest.into());
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.entries.get(path).map(String::as_str)
    }

    pub fn remove(&mut self, path: &str) -> Option<String> {
        self.entries.remove(path)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(p, d)| (p.as_str(), d.as_str()))
    }
}

/// Normalizes a working-tree-relative path to the index's slash-separated
/// key form, regardless of host path separator conventions.
pub fn to_key(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

pub fn to_path(key: &str) -> PathBuf {
    PathBuf::from(key)
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out
}

fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('\\') => out.push('\\'),
                Some('t') => out.push('\t'),
                Some('n') => out.push('\n'),
                Some(other) => {
                    out.push('\\');
                    out.push(other);
                }
                None => out.push('\\'),
            }
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn missing_file_yields_empty_map() {
        let dir = tempfile::tempdir().unwrap();
        let index = Index::load(&dir.path().join("index")).unwrap();
        assert!(index.is_empty());
    }

    #[test]
    fn save_then_load_roundtrips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index");
        let mut index = Index::default();
        index.put("a.txt", "1".repeat(40));
        index.put("dir/b.txt", "2".repeat(40));
        index.save(&path).unwrap();

        let loaded = Index::load(&path).unwrap();
        assert_eq!(loaded, index);
    }

    #[test]
    fn paths_with_tabs_and_newlines_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index");
        let mut index = Index::default();
        index.put("weird\tname\nwith\\stuff", "3".repeat(40));
        index.save(&path).unwrap();

        let loaded = Index::load(&path).unwrap();
        assert_eq!(loaded, index);
    }

    #[test]
    fn put_get_remove_clear() {
        let mut index = Index::default();
        index.put("a", "d".repeat(40));
        assert_eq!(index.get("a"), Some("d".repeat(40)).as_deref());
        index.remove("a");
        assert_eq!(index.get("a"), None);
        index.put("b", "e".repeat(40));
        index.clear();
        assert!(index.is_empty());
    }
}
