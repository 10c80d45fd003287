//! A library for reading the index of [Windows
//! cabinet](https://en.wikipedia.org/wiki/Cabinet_(file_format)) (CAB) files:
//! the cabinet header, the folder table, and the file table.
//!
//! Folder data is never decompressed; each folder records which compression
//! scheme its data blocks use.
//!
//! ```no_run
//! # fn main() -> cabinet_index::Result<()> {
//! let cabinet = cabinet_index::open("setup.cab")?;
//! for (index, folder) in cabinet.folder_entries().enumerate() {
//!     println!("Folder #{}: {:?}", index, folder.compression_type());
//!     for file in folder.file_entries() {
//!         println!("  {} ({} bytes)", file.name(), file.uncompressed_size());
//!     }
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

#[macro_use]
mod macros;

mod cabinet;
mod consts;
mod ctype;
mod cursor;
mod datetime;
mod error;
mod file;
mod folder;
mod window;

pub use crate::cabinet::{open, parse, Cabinet, CabinetFile, CabinetRef};
pub use crate::ctype::CompressionType;
pub use crate::error::{CabError, Result};
pub use crate::file::{FileEntries, FileEntry};
pub use crate::folder::{FolderEntries, FolderEntry};
