//! Envelope framing, hashing and compression — the primitives every object
//! kind is built from.
//!
//! Envelope layout: `<type> SP <len> NUL <content>`. The digest is the
//! SHA-1 of the *uncompressed* envelope; only the on-disk bytes are
//! deflated.

use std::io::{Read, Write};

use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use sha1::{Digest, Sha1};

use crate::error::{Error, Result};

pub const BLOB: &str = "blob";
pub const TREE: &str = "tree";
pub const COMMIT: &str = "commit";

/// Builds the envelope `<type> SP <len> NUL <content>`.
pub fn envelope(object_type: &str, content: &[u8]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(object_type.len() + 1 + 20 + 1 + content.len());
    buf.extend_from_slice(object_type.as_bytes());
    buf.push(b' ');
    buf.extend_from_slice(content.len().to_string().as_bytes());
    buf.push(0);
    buf.extend_from_slice(content);
    buf
}

/// Hashes an envelope (or any bytes) and renders the digest as 40 lowercase
/// hex characters.
pub fn digest(bytes: &[u8]) -> String {
    let mut hasher = Sha1::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Splits an envelope back into `(type, content)`, validating the header.
pub fn parse_envelope(bytes: &[u8]) -> Result<(String, Vec<u8>)> {
    let nul_pos = bytes
        .iter()
        .position(|&b| b == 0)
        .ok_or_else(|| Error::MalformedObject("missing NUL byte in envelope".into()))?;

    let header = std::str::from_utf8(&bytes[..nul_pos])
        .map_err(|_| Error::MalformedObject("envelope header is not valid utf-8".into()))?;

    let (object_type, len_str) = header
        .split_once(' ')
        .ok_or_else(|| Error::MalformedObject(format!("missing space in header {header:?}")))?;

    if !matches!(object_type, BLOB | TREE | COMMIT) {
        return Err(Error::MalformedObject(format!(
            "unknown object type {object_type:?}"
        )));
    }

    let declared_len: usize = len_str
        .parse()
        .map_err(|_| Error::MalformedObject(format!("invalid length {len_str:?}")))?;

    let content = &bytes[nul_pos + 1..];
    if content.len() != declared_len {
        return Err(Error::MalformedObject(format!(
            "declared length {declared_len} does not match actual content length {}",
            content.len()
        )));
    }

    Ok((object_type.to_string(), content.to_vec()))
}

/// Deflates bytes with the standard zlib framing.
pub fn compress(bytes: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(bytes)?;
    Ok(encoder.finish()?)
}

/// Inflates zlib-framed bytes. Any failure is a corrupt object.
pub fn decompress(bytes: &[u8]) -> Result<Vec<u8>> {
    let mut decoder = ZlibDecoder::new(bytes);
    let mut out = Vec::new();
    decoder
        .read_to_end(&mut out)
        .map_err(|e| Error::CorruptObject(e.to_string()))?;
    Ok(out)
}
