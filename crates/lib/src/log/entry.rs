use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use super::codec;
use super::store::LogStore;
use super::types::{Artifact, LogError};

/// Log entry for a single highstate run.
///
/// Borrows the store it belongs to and never outlives it. An entry handle
/// does not imply that any file exists yet: entries returned by
/// [`LogStore::new_entry`] start with both slots empty.
#[derive(Debug, Clone)]
pub struct LogEntry<'a> {
  store: &'a LogStore,
  timestamp: String,
}

impl<'a> LogEntry<'a> {
  pub(crate) fn new(store: &'a LogStore, timestamp: String) -> Self {
    Self { store, timestamp }
  }

  /// Run identifier, `YYYY-MM-DDTHH:MM:SS`.
  pub fn timestamp(&self) -> &str {
    &self.timestamp
  }

  pub fn store(&self) -> &'a LogStore {
    self.store
  }

  /// Path of the file backing `artifact`.
  pub fn path(&self, artifact: Artifact) -> PathBuf {
    self.store.artifact_path(&self.timestamp, artifact)
  }

  /// Whether `artifact` has been written for this entry.
  pub fn exists(&self, artifact: Artifact) -> bool {
    self.path(artifact).is_file()
  }

  /// Write the state data of this run.
  pub fn write_highstate<T>(&self, data: &T) -> Result<(), LogError>
  where
    T: Serialize + ?Sized,
  {
    self.write(Artifact::Highstate, data)
  }

  /// Write the result of this run.
  pub fn write_result<T>(&self, result: &T) -> Result<(), LogError>
  where
    T: Serialize + ?Sized,
  {
    self.write(Artifact::Result, result)
  }

  /// Read the state data of this run, `None` if it was never written.
  pub fn read_highstate<T: DeserializeOwned>(&self) -> Result<Option<T>, LogError> {
    self.read(Artifact::Highstate)
  }

  /// Read the result of this run, `None` if it was never written.
  pub fn read_result<T: DeserializeOwned>(&self) -> Result<Option<T>, LogError> {
    self.read(Artifact::Result)
  }

  /// Write an artifact exactly once.
  ///
  /// The compressed document is written to a temporary file next to its
  /// destination, synced, and then linked into place without replacing an
  /// existing file. A crash leaves at most a stray `.tmp` file behind, and a
  /// concurrent writer of the same slot loses with
  /// [`LogError::AlreadyExists`] instead of clobbering.
  pub fn write<T>(&self, artifact: Artifact, data: &T) -> Result<(), LogError>
  where
    T: Serialize + ?Sized,
  {
    let path = self.path(artifact);
    if path.exists() {
      return Err(LogError::AlreadyExists { artifact, path });
    }

    let json = codec::to_json(data).map_err(|source| LogError::Serialize { artifact, source })?;
    codec::check_readable(&json).map_err(|source| LogError::Unreadable { artifact, source })?;

    let prefix = format!(".{}{}.", self.timestamp, artifact.suffix());
    let mut builder = tempfile::Builder::new();
    builder.prefix(&prefix).suffix(".tmp");
    #[cfg(unix)]
    {
      use std::os::unix::fs::PermissionsExt;
      // Same mode as a plain create; the process umask still applies.
      builder.permissions(std::fs::Permissions::from_mode(0o666));
    }
    let mut temp = builder
      .tempfile_in(self.store.directory())
      .map_err(|source| write_error(&path, source))?;

    codec::compress(temp.as_file_mut(), &json).map_err(|source| write_error(&path, source))?;
    temp.as_file().sync_all().map_err(|source| write_error(&path, source))?;

    temp.persist_noclobber(&path).map_err(|err| {
      if err.error.kind() == io::ErrorKind::AlreadyExists {
        LogError::AlreadyExists {
          artifact,
          path: path.clone(),
        }
      } else {
        write_error(&path, err.error)
      }
    })?;

    info!(
      timestamp = %self.timestamp,
      artifact = %artifact,
      bytes = json.len(),
      "wrote log artifact"
    );
    Ok(())
  }

  /// Read an artifact.
  ///
  /// A missing file is `Ok(None)`, and so is a slot taken by something other
  /// than a regular file. A file that exists but does not decompress or does
  /// not parse is an error, never `None`.
  pub fn read<T: DeserializeOwned>(&self, artifact: Artifact) -> Result<Option<T>, LogError> {
    let path = self.path(artifact);

    if path.exists() && !path.is_file() {
      debug!(timestamp = %self.timestamp, artifact = %artifact, path = %path.display(), "artifact slot is not a file");
      return Ok(None);
    }

    let file = match File::open(&path) {
      Ok(file) => file,
      Err(e) if e.kind() == io::ErrorKind::NotFound => {
        debug!(timestamp = %self.timestamp, artifact = %artifact, "artifact not written");
        return Ok(None);
      }
      Err(source) => return Err(LogError::Read { path, source }),
    };

    let json = match codec::decompress(BufReader::new(file)) {
      Ok(json) => json,
      Err(source) if is_corruption(&source) => return Err(LogError::Decompress { path, source }),
      Err(source) => return Err(LogError::Read { path, source }),
    };

    let value = serde_json::from_slice(&json).map_err(|source| LogError::Parse { path, source })?;
    debug!(timestamp = %self.timestamp, artifact = %artifact, "read log artifact");
    Ok(Some(value))
  }
}

fn write_error(path: &std::path::Path, source: io::Error) -> LogError {
  LogError::Write {
    path: path.to_path_buf(),
    source,
  }
}

/// Whether a decoder error means bad bytes rather than a failing device.
fn is_corruption(err: &io::Error) -> bool {
  matches!(
    err.kind(),
    io::ErrorKind::InvalidData | io::ErrorKind::InvalidInput | io::ErrorKind::UnexpectedEof
  )
}
