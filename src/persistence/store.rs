use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use compio::fs;
use snafu::{ResultExt, Snafu};
use tracing::{debug, info};

use crate::filesystem::FilesystemSnapshot;

const COMPRESSION_LEVEL: i32 = 3;

/// Reads and writes the tree snapshot on the host disk.
///
/// The file holds a zstd-compressed, bincode-encoded `FilesystemSnapshot`.
/// Version checks and migrations happen in the caller.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns `None` when nothing has been saved yet.
    pub async fn load(&self) -> Result<Option<FilesystemSnapshot>, StoreError> {
        debug!("Reading snapshot from {}", self.path.display());
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!("No saved file system found at {}", self.path.display());
                return Ok(None);
            }
            Err(err) => return Err(err).context(ReadSnafu { path: &self.path }),
        };

        let snapshot = decode(&bytes)?;
        debug!(
            "Loaded snapshot version {} ({} bytes)",
            snapshot.version,
            bytes.len()
        );
        Ok(Some(snapshot))
    }

    pub async fn save(&self, snapshot: &FilesystemSnapshot) -> Result<(), StoreError> {
        let bytes = encode(snapshot)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .context(WriteSnafu { path: parent })?;
        }

        let size = bytes.len();
        let result = fs::write(&self.path, bytes).await;
        result.0.context(WriteSnafu { path: &self.path })?;
        debug!("Saved snapshot to {} ({size} bytes)", self.path.display());
        Ok(())
    }
}

pub fn encode(snapshot: &FilesystemSnapshot) -> Result<Vec<u8>, StoreError> {
    let raw = bincode::encode_to_vec(snapshot, bincode::config::standard()).context(EncodeSnafu)?;
    zstd::encode_all(raw.as_slice(), COMPRESSION_LEVEL).context(CompressSnafu)
}

pub fn decode(bytes: &[u8]) -> Result<FilesystemSnapshot, StoreError> {
    let raw = zstd::decode_all(bytes).context(DecompressSnafu)?;
    let (snapshot, _) =
        bincode::decode_from_slice(&raw, bincode::config::standard()).context(DecodeSnafu)?;
    Ok(snapshot)
}

#[derive(Debug, Snafu)]
pub enum StoreError {
    #[snafu(display("Failed to read saved file system: {}", path.display()))]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("Failed to write saved file system: {}", path.display()))]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("Failed to encode the file system"))]
    EncodeError { source: bincode::error::EncodeError },
    #[snafu(display("Saved file system could not be decoded"))]
    DecodeError { source: bincode::error::DecodeError },
    #[snafu(display("Failed to compress the file system"))]
    CompressError { source: std::io::Error },
    #[snafu(display("Saved file system is not valid compressed data"))]
    DecompressError { source: std::io::Error },
}
