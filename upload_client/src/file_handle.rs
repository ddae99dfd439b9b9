use std::path::{Path, PathBuf};
use std::sync::Arc;

use bytes::Bytes;

use crate::error::{Result, TransportError};

#[derive(Clone, Debug)]
enum FileSource {
    Path(PathBuf),
    Memory(Bytes),
}

/// A local blob to upload: its display name, its size, and where its bytes come from.
///
/// The size is captured when the handle is created and never changes; if the file on disk
/// has changed size by the time it is read, the read fails instead of silently uploading
/// different contents.
#[derive(Clone, Debug)]
pub struct FileHandle {
    name: Arc<str>,
    size: u64,
    source: FileSource,
}

impl FileHandle {
    /// Creates a handle for a file on disk, reading its current size.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let metadata = tokio::fs::metadata(path).await?;

        if !metadata.is_file() {
            return Err(TransportError::IOError(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("{path:?} is not a regular file"),
            )));
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());

        Ok(Self {
            name: name.into(),
            size: metadata.len(),
            source: FileSource::Path(path.to_path_buf()),
        })
    }

    pub fn from_bytes(name: impl Into<Arc<str>>, data: impl Into<Bytes>) -> Self {
        let data = data.into();
        Self {
            name: name.into(),
            size: data.len() as u64,
            source: FileSource::Memory(data),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn shared_name(&self) -> Arc<str> {
        self.name.clone()
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn path(&self) -> Option<&Path> {
        match &self.source {
            FileSource::Path(p) => Some(p.as_path()),
            FileSource::Memory(_) => None,
        }
    }

    /// MIME type guessed from the file name's extension.
    pub fn mime_type(&self) -> String {
        mime_guess::from_path(self.name.as_ref()).first_or_octet_stream().to_string()
    }

    /// Loads the full contents of the file.
    pub async fn read(&self) -> Result<Bytes> {
        let data = match &self.source {
            FileSource::Memory(data) => return Ok(data.clone()),
            FileSource::Path(path) => Bytes::from(tokio::fs::read(path).await?),
        };

        if data.len() as u64 != self.size {
            return Err(TransportError::FileSizeMismatch {
                name: self.name.to_string(),
                expected: self.size,
                actual: data.len() as u64,
            });
        }

        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[tokio::test]
    async fn test_from_path_reads_size_and_contents() {
        let mut file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
        file.write_all(b"0123456789").unwrap();

        let handle = FileHandle::from_path(file.path()).await.unwrap();
        assert_eq!(handle.size(), 10);
        assert_eq!(handle.mime_type(), "image/png");
        assert_eq!(handle.path(), Some(file.path()));
        assert_eq!(handle.read().await.unwrap(), Bytes::from_static(b"0123456789"));
    }

    #[tokio::test]
    async fn test_changed_file_is_rejected_on_read() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"abc").unwrap();

        let handle = FileHandle::from_path(file.path()).await.unwrap();
        file.write_all(b"def").unwrap();
        file.flush().unwrap();

        let err = handle.read().await.unwrap_err();
        assert!(matches!(err, TransportError::FileSizeMismatch { expected: 3, actual: 6, .. }));
    }

    #[tokio::test]
    async fn test_directory_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        assert!(FileHandle::from_path(dir.path()).await.is_err());
    }

    #[test]
    fn test_in_memory_handle() {
        let handle = FileHandle::from_bytes("notes.unknownext", vec![1u8, 2, 3]);
        assert_eq!(handle.name(), "notes.unknownext");
        assert_eq!(handle.size(), 3);
        assert_eq!(handle.path(), None);
        assert_eq!(handle.mime_type(), "application/octet-stream");
    }
}
