use crate::error::{MonitorError, Result};
use crate::storage::Fingerprint;
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Bytes read per chunk when streaming a file through the digest.
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

pub fn hash_bytes(data: &[u8]) -> Fingerprint {
    Fingerprint::from_digest(&Sha256::digest(data))
}

/// Hash a file's full content in `DEFAULT_CHUNK_SIZE` chunks.
///
/// # Errors
///
/// Returns `MonitorError::Io` if the file cannot be opened or a read fails.
pub fn hash_file(path: &Path) -> Result<Fingerprint> {
    hash_file_with_chunk_size(path, DEFAULT_CHUNK_SIZE)
}

/// Hash a file's full content, reading at most `chunk_size` bytes at a time.
///
/// A `chunk_size` of 0 falls back to `DEFAULT_CHUNK_SIZE`.
///
/// # Errors
///
/// Returns `MonitorError::Io` if:
/// - The file cannot be opened
/// - The opened handle is not a regular file (replaced since it was listed)
/// - A read fails mid-stream
pub fn hash_file_with_chunk_size(path: &Path, chunk_size: usize) -> Result<Fingerprint> {
    let io_error = |source: io::Error| MonitorError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(io_error)?;
    if !file.metadata().map_err(io_error)?.is_file() {
        return Err(io_error(io::Error::new(
            io::ErrorKind::InvalidInput,
            "not a regular file",
        )));
    }

    hash_reader(file, chunk_size).map_err(io_error)
}

/// Stream any reader through SHA-256.
///
/// Memory use is bounded by `chunk_size` regardless of input length.
///
/// # Errors
///
/// Returns the underlying error if a read fails (interrupted reads are retried).
pub fn hash_reader<R: Read>(mut reader: R, chunk_size: usize) -> io::Result<Fingerprint> {
    let chunk_size = if chunk_size == 0 {
        DEFAULT_CHUNK_SIZE
    } else {
        chunk_size
    };

    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; chunk_size];

    loop {
        let bytes_read = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(Fingerprint::from_digest(&hasher.finalize()))
}
