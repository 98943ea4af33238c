#![forbid(unsafe_code)]

pub mod error;
pub mod flags;
pub mod fs;

pub mod util {
    pub mod cursor;
    pub mod varint;
}

pub mod codec {
    pub mod data;
    pub mod file;
    pub mod node;
    pub mod tree;
}

pub mod scan;
pub mod walk;

pub mod pack {
    pub mod build;
}

pub mod read {
    pub mod extract;
}

pub mod list;

// Re-exports: stable API surface
pub use error::{DcError, Result};
pub use fs::{EntryStore, FsEntry, OsEntryStore};
pub use list::{ListEntry, list};
pub use pack::build::{ARCHIVE_EXTENSION, build, compress};
pub use read::extract::{Archive, decode, extract};
