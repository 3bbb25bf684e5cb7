//! Filesystem-backed `LogoStore` using a capability-scoped directory.
//!
//! The public root is opened once with ambient authority; every write after
//! that goes through the capability, so a compromised file name can never
//! escape the directory. Names are additionally prefixed with a fresh UUID
//! so two uploads of `logo.png` never collide.

use std::io;
use std::path::Path;

use async_trait::async_trait;
use cap_std::ambient_authority;
use cap_std::fs::Dir;
use uuid::Uuid;

use crate::domain::ports::{LogoStore, LogoStoreError};
use crate::domain::{LogoReference, LogoUpload};

const LOGOS_SUBDIR: &str = "logos";

/// Logo store writing into the public file area.
pub struct FsLogoStore {
    root: Dir,
}

impl FsLogoStore {
    /// Open (creating if necessary) the public root directory.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        std::fs::create_dir_all(&path)?;
        let root = Dir::open_ambient_dir(path, ambient_authority())?;
        Ok(Self { root })
    }
}

fn map_io_error(error: io::Error) -> LogoStoreError {
    LogoStoreError::io(error.to_string())
}

#[async_trait]
impl LogoStore for FsLogoStore {
    async fn store(&self, upload: &LogoUpload) -> Result<LogoReference, LogoStoreError> {
        self.root
            .create_dir_all(LOGOS_SUBDIR)
            .map_err(map_io_error)?;

        let file_name = format!("{}-{}", Uuid::new_v4(), upload.file_name());
        let relative = format!("{LOGOS_SUBDIR}/{file_name}");
        self.root
            .write(&relative, upload.bytes())
            .map_err(map_io_error)?;

        Ok(LogoReference::new(relative))
    }
}
