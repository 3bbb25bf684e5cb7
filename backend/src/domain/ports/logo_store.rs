//! Port abstraction for logo file storage adapters.

use async_trait::async_trait;

use crate::domain::{LogoReference, LogoUpload};

/// Storage errors raised by logo store adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LogoStoreError {
    /// The file could not be written to the public area.
    #[error("logo storage failed: {message}")]
    Io {
        /// Adapter-level description of the failure.
        message: String,
    },
}

impl LogoStoreError {
    /// Create an I/O error with the given message.
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }
}

/// Driven port for storing uploaded logo files.
///
/// Storage is a single blocking write with no retry. The returned reference
/// is what the listing record keeps; if the subsequent record write fails
/// the stored file is orphaned and nothing cleans it up.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LogoStore: Send + Sync {
    /// Store the upload and return the relative-path reference.
    async fn store(&self, upload: &LogoUpload) -> Result<LogoReference, LogoStoreError>;
}
