//! The content-addressed object store: `<repo>/.bit/objects/<xx>/<38-hex>`.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::codec;
use crate::error::{Error, Result};

pub struct ObjectStore {
    objects_dir: PathBuf,
}

impl ObjectStore {
    pub fn new(objects_dir: PathBuf) -> Self {
        Self { objects_dir }
    }

    fn path_for(&self, digest: &str) -> PathBuf {
        self.objects_dir.join(&digest[..2]).join(&digest[2..])
    }

    /// Persists `(type, content)`, returning its digest. No-op if the
    /// digest already exists — writes are idempotent under re-insertion.
    pub fn write(&self, object_type: &str, content: &[u8]) -> Result<String> {
        let env = codec::envelope(object_type, content);
        let digest = codec::digest(&env);
        let path = self.path_for(&digest);

        if path.exists() {
            debug!(%digest, "object already present, skipping write");
            return Ok(digest);
        }

        let dir = path.parent().expect("object path always has a parent");
        fs::create_dir_all(dir)?;
        let compressed = codec::compress(&env)?;
        write_atomic(&path, &compressed)?;
        debug!(%digest, object_type, bytes = content.len(), "wrote object");
        Ok(digest)
    }

    /// Loads and parses the envelope for `digest`.
    pub fn read(&self, digest: &str) -> Result<(String, Vec<u8>)> {
        let path = self.path_for(digest);
        if !path.exists() {
            return Err(Error::ObjectNotFound(digest.to_string()));
        }
        let compressed = fs::read(&path)?;
        let env = codec::decompress(&compressed)?;
        debug!(%digest, "read object");
        codec::parse_envelope(&env)
    }
}

/// Write-to-temp-then-rename, to limit torn writes on crash.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = path.parent().expect("object path always has a parent");
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    std::io::Write::write_all(&mut tmp, bytes)?;
    tmp.persist(path)
        .map_err(|e| Error::Io(e.error))?;
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn write_then_read_roundtrips_blob_content() {
        let dir = tempfile::tempdir().unwrap();
        let store = ObjectStore::new(dir.path().to_path_buf());
        let digest = store.write(codec::BLOB, b"hello\n").unwrap();
        assert_eq!(digest, "ce013625030ba8dba906f756967f9e9ca394464a");

        let (ty, content) = store.read(&digest).unwrap();
        assert_eq!(ty, codec::BLOB);
        assert_eq!(content, b"hello\n");
    }

    #[test]
    fn write_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = ObjectStore::new(dir.path().to_path_buf());
        let d1 = store.write(codec::BLOB, b"same bytes").unwrap();
        let d2 = store.write(codec::BLOB, b"same bytes").unwrap();
        assert_eq!(d1, d2);
    }

    #[test]
    fn read_missing_digest_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = ObjectStore::new(dir.path().to_path_buf());
        let err = store.read("0".repeat(40).as_str()).unwrap_err();
        assert!(matches!(err, Error::ObjectNotFound(_)));
    }
}
