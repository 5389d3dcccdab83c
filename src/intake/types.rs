//! Work items and file candidates.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Largest accepted upload: 10 MiB, inclusive.
pub const MAX_FILE_BYTES: u64 = 10 * 1024 * 1024;

/// Accepted file extensions, compared case-insensitively.
pub const ALLOWED_EXTENSIONS: [&str; 2] = ["txt", "pdf"];

/// Source label reported for typed (non-file) input.
pub const DIRECT_TEXT_SOURCE: &str = "direct text";

/// A file the user selected, not yet validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRef {
    pub name: String,
    pub size_bytes: u64,
    pub payload: Vec<u8>,
}

impl FileRef {
    /// Build a candidate from in-memory bytes; the size is the payload length.
    pub fn from_bytes(name: impl Into<String>, payload: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            size_bytes: payload.len() as u64,
            payload,
        }
    }

    /// Load a candidate from disk.
    ///
    /// Oversized or wrongly typed files are not read: only their metadata is
    /// needed for the rejection, so the payload is left empty.
    pub async fn from_path(path: impl AsRef<Path>) -> crate::Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("file")
            .to_string();
        let size_bytes = tokio::fs::metadata(path).await?.len();

        let payload = if has_allowed_extension(&name) && size_bytes <= MAX_FILE_BYTES {
            tokio::fs::read(path).await?
        } else {
            Vec::new()
        };

        Ok(Self {
            name,
            size_bytes,
            payload,
        })
    }

    /// Check the acceptance policy, ignoring duplicates.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !has_allowed_extension(&self.name) {
            return Err(ValidationError::InvalidExtension {
                name: self.name.clone(),
            });
        }
        if self.size_bytes == 0 {
            return Err(ValidationError::EmptyFile {
                name: self.name.clone(),
            });
        }
        if self.size_bytes > MAX_FILE_BYTES {
            return Err(ValidationError::TooLarge {
                name: self.name.clone(),
                size_bytes: self.size_bytes,
                max_bytes: MAX_FILE_BYTES,
            });
        }
        Ok(())
    }
}

/// Lower-cased extension after the last dot, if any.
pub fn extension_of(name: &str) -> Option<String> {
    let (stem, ext) = name.rsplit_once('.')?;
    if stem.is_empty() && ext.is_empty() {
        return None;
    }
    Some(ext.to_lowercase())
}

/// Whether the file name ends in one of [`ALLOWED_EXTENSIONS`].
pub fn has_allowed_extension(name: &str) -> bool {
    extension_of(name).is_some_and(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
}

/// One unit of input to classify.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WorkItem {
    /// Typed email text, already trimmed.
    Text { content: String },
    /// An uploaded `.txt` or `.pdf` file.
    File {
        name: String,
        size_bytes: u64,
        #[serde(skip)]
        payload: Vec<u8>,
    },
}

impl WorkItem {
    /// Label identifying where this item came from.
    pub fn source(&self) -> &str {
        match self {
            Self::Text { .. } => DIRECT_TEXT_SOURCE,
            Self::File { name, .. } => name,
        }
    }

    /// Short label for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text { .. } => "text",
            Self::File { .. } => "file",
        }
    }
}

impl From<FileRef> for WorkItem {
    fn from(file: FileRef) -> Self {
        Self::File {
            name: file.name,
            size_bytes: file.size_bytes,
            payload: file.payload,
        }
    }
}

/// A file candidate that was refused, with the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub name: String,
    pub reason: ValidationError,
}

impl Rejection {
    /// Stable reason code (`invalid-extension`, `too-large`, ...).
    pub fn code(&self) -> &'static str {
        self.reason.code()
    }
}

/// Display line for a pending file, e.g. `PDF • 0.01 MB`.
pub fn size_summary(name: &str, size_bytes: u64) -> String {
    let kind = extension_of(name).unwrap_or_default().to_uppercase();
    let mib = size_bytes as f64 / (1024.0 * 1024.0);
    format!("{kind} • {mib:.2} MB")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_is_case_insensitive() {
        assert!(has_allowed_extension("mail.TXT"));
        assert!(has_allowed_extension("scan.Pdf"));
        assert!(!has_allowed_extension("mail.docx"));
        assert!(!has_allowed_extension("README"));
        assert!(!has_allowed_extension("archive.pdf.zip"));
    }

    #[test]
    fn extension_of_uses_last_dot() {
        assert_eq!(extension_of("a.b.TXT").as_deref(), Some("txt"));
        assert_eq!(extension_of("noext"), None);
    }

    #[test]
    fn validate_boundary_sizes() {
        let at_max = FileRef {
            name: "big.pdf".into(),
            size_bytes: MAX_FILE_BYTES,
            payload: vec![],
        };
        assert!(at_max.validate().is_ok());

        let over = FileRef {
            size_bytes: MAX_FILE_BYTES + 1,
            ..at_max
        };
        assert_eq!(over.validate().unwrap_err().code(), "too-large");
    }

    #[test]
    fn validate_extension_wins_over_size() {
        let file = FileRef {
            name: "huge.exe".into(),
            size_bytes: MAX_FILE_BYTES * 3,
            payload: vec![],
        };
        assert_eq!(file.validate().unwrap_err().code(), "invalid-extension");
    }

    #[test]
    fn validate_rejects_empty_file() {
        let file = FileRef::from_bytes("empty.txt", vec![]);
        assert_eq!(file.validate().unwrap_err().code(), "empty-file");
    }

    #[test]
    fn work_item_sources() {
        let text = WorkItem::Text {
            content: "hello".into(),
        };
        assert_eq!(text.source(), "direct text");
        assert_eq!(text.kind(), "text");

        let file: WorkItem = FileRef::from_bytes("inbox.txt", b"hi".to_vec()).into();
        assert_eq!(file.source(), "inbox.txt");
        assert_eq!(file.kind(), "file");
    }

    #[test]
    fn size_summary_format() {
        assert_eq!(size_summary("report.pdf", 10_486), "PDF • 0.01 MB");
        assert_eq!(size_summary("mail.txt", 5 * 1024 * 1024), "TXT • 5.00 MB");
    }

    #[tokio::test]
    async fn from_path_reads_allowed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("email.txt");
        tokio::fs::write(&path, b"Preciso do status do chamado 123")
            .await
            .unwrap();

        let file = FileRef::from_path(&path).await.unwrap();
        assert_eq!(file.name, "email.txt");
        assert_eq!(file.size_bytes, 32);
        assert_eq!(file.payload, b"Preciso do status do chamado 123");
    }

    #[tokio::test]
    async fn from_path_skips_payload_for_rejected_type() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.png");
        tokio::fs::write(&path, [0u8; 16]).await.unwrap();

        let file = FileRef::from_path(&path).await.unwrap();
        assert_eq!(file.size_bytes, 16);
        assert!(file.payload.is_empty());
        assert_eq!(file.validate().unwrap_err().code(), "invalid-extension");
    }

    #[tokio::test]
    async fn from_path_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileRef::from_path(dir.path().join("missing.txt"))
            .await
            .unwrap_err();
        assert!(matches!(err, crate::Error::Io(_)));
    }
}
