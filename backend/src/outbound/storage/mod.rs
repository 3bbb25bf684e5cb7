//! File storage adapters.

mod fs_logo_store;

pub use fs_logo_store::FsLogoStore;
