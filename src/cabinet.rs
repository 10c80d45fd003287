use std::borrow::Cow;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::ops::Deref;
use std::path::Path;

use crate::consts;
use crate::cursor::ByteCursor;
use crate::error::{CabError, Result};
use crate::file::{parse_file_entry, FileEntry};
use crate::folder::{parse_folder_entry, FolderEntries, FolderEntry};

/// The parsed index of a cabinet file: header fields, folders, and the files
/// within each folder.
#[derive(Debug, Clone)]
pub struct Cabinet {
    total_size: u32,
    major_version: u8,
    minor_version: u8,
    cabinet_set_id: u16,
    cabinet_set_index: u16,
    header_reserve_size: u16,
    folder_reserve_size: u8,
    data_reserve_size: u8,
    prev_cabinet: Option<CabinetRef>,
    next_cabinet: Option<CabinetRef>,
    folders: Vec<FolderEntry>,
}

/// A reference to a neighboring cabinet in a multi-cabinet set.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct CabinetRef {
    cabinet_name: Vec<u8>,
    disk_name: Vec<u8>,
}

impl CabinetRef {
    /// Returns the file name of the referenced cabinet.
    pub fn cabinet_name(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.cabinet_name)
    }

    /// Returns the label of the disk the referenced cabinet is stored on.
    pub fn disk_name(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.disk_name)
    }
}

/// Fixed header fields that steer the rest of the parse.
#[derive(Debug)]
struct Header {
    total_size: u32,
    first_file_offset: u32,
    minor_version: u8,
    major_version: u8,
    num_folders: u16,
    num_files: u16,
    cabinet_set_id: u16,
    cabinet_set_index: u16,
    header_reserve_size: u16,
    folder_reserve_size: u8,
    data_reserve_size: u8,
    prev_cabinet: Option<CabinetRef>,
    next_cabinet: Option<CabinetRef>,
}

impl Cabinet {
    /// Parses the cabinet stored in the first `length` bytes of `reader`.
    /// Nothing outside that range is read.  A negative `length` is rejected
    /// before the reader is touched.
    pub fn parse<R: Read + Seek>(reader: R, length: i64) -> Result<Cabinet> {
        if length < 0 {
            invalid_argument!(
                "Cabinet length cannot be negative ({})",
                length
            );
        }
        let mut cursor = ByteCursor::new(reader, length as u64)?;
        let header = read_header(&mut cursor)?;
        if header.total_size as i64 != length {
            tracing::warn!(
                total_size = header.total_size,
                length,
                "cabinet header size disagrees with source length"
            );
        }
        let mut folders = read_folder_table(&mut cursor, &header)?;
        seek_file_table(&mut cursor, &header)?;
        read_file_table(&mut cursor, &header, &mut folders)?;
        Ok(Cabinet {
            total_size: header.total_size,
            major_version: header.major_version,
            minor_version: header.minor_version,
            cabinet_set_id: header.cabinet_set_id,
            cabinet_set_index: header.cabinet_set_index,
            header_reserve_size: header.header_reserve_size,
            folder_reserve_size: header.folder_reserve_size,
            data_reserve_size: header.data_reserve_size,
            prev_cabinet: header.prev_cabinet,
            next_cabinet: header.next_cabinet,
            folders,
        })
    }

    /// Parses a cabinet that occupies the whole of `reader`.
    pub fn new<R: Read + Seek>(mut reader: R) -> Result<Cabinet> {
        let length = reader.seek(SeekFrom::End(0))?;
        let length = match i64::try_from(length) {
            Ok(length) => length,
            Err(_) => invalid_argument!("Source is too large ({})", length),
        };
        Cabinet::parse(reader, length)
    }

    /// Returns the total size of the cabinet in bytes, as recorded in its
    /// header.
    pub fn total_size(&self) -> u32 {
        self.total_size
    }

    /// Returns the (major, minor) format version recorded in the header.
    pub fn version(&self) -> (u8, u8) {
        (self.major_version, self.minor_version)
    }

    /// Returns the cabinet set ID for this cabinet (an arbitrary number used
    /// to group together a set of cabinets).
    pub fn cabinet_set_id(&self) -> u16 {
        self.cabinet_set_id
    }

    /// Returns this cabinet's (zero-based) index within its cabinet set.
    pub fn cabinet_set_index(&self) -> u16 {
        self.cabinet_set_index
    }

    /// Returns the sizes of the header, per-folder, and per-data-block
    /// reserve areas.  All three are zero unless the header declares them.
    pub fn reserve_sizes(&self) -> (u16, u8, u8) {
        (
            self.header_reserve_size,
            self.folder_reserve_size,
            self.data_reserve_size,
        )
    }

    /// Returns the previous cabinet in the set, if the header names one.
    pub fn prev_cabinet(&self) -> Option<&CabinetRef> {
        self.prev_cabinet.as_ref()
    }

    /// Returns the next cabinet in the set, if the header names one.
    pub fn next_cabinet(&self) -> Option<&CabinetRef> {
        self.next_cabinet.as_ref()
    }

    /// Returns an iterator over the folder entries in this cabinet.
    pub fn folder_entries(&self) -> FolderEntries {
        FolderEntries { iter: self.folders.iter() }
    }

    /// Returns an iterator over every file in the cabinet, folder by folder.
    pub fn file_entries(&self) -> impl Iterator<Item = &FileEntry> + '_ {
        self.folders.iter().flat_map(|folder| folder.files.iter())
    }

    /// Returns the number of files in the cabinet.
    pub fn num_files(&self) -> usize {
        self.folders.iter().map(|folder| folder.files.len()).sum()
    }

    /// Returns the entry for the file with the given name, if any.
    pub fn get_file_entry(&self, name: &str) -> Option<&FileEntry> {
        self.file_entries().find(|file| file.name_bytes() == name.as_bytes())
    }
}

#[tracing::instrument(skip(cursor))]
fn read_header<R: Read + Seek>(cursor: &mut ByteCursor<R>) -> Result<Header> {
    let signature = cursor.read_u32();
    cursor.check()?;
    if signature != consts::FILE_SIGNATURE {
        return Err(CabError::InvalidSignature(signature));
    }
    cursor.skip(4);
    let total_size = cursor.read_u32();
    cursor.skip(4);
    let first_file_offset = cursor.read_u32();
    cursor.skip(4);
    let minor_version = cursor.read_u8();
    let major_version = cursor.read_u8();
    let num_folders = cursor.read_u16();
    let num_files = cursor.read_u16();
    let flags = cursor.read_u16();
    let cabinet_set_id = cursor.read_u16();
    let cabinet_set_index = cursor.read_u16();
    let mut header_reserve_size = 0u16;
    let mut folder_reserve_size = 0u8;
    let mut data_reserve_size = 0u8;
    if (flags & consts::FLAG_RESERVE_PRESENT) != 0 {
        header_reserve_size = cursor.read_u16();
        folder_reserve_size = cursor.read_u8();
        data_reserve_size = cursor.read_u8();
    }
    cursor.skip(header_reserve_size as u64);
    let prev_cabinet = if (flags & consts::FLAG_PREV_CABINET) != 0 {
        Some(read_cabinet_ref(cursor))
    } else {
        None
    };
    let next_cabinet = if (flags & consts::FLAG_NEXT_CABINET) != 0 {
        Some(read_cabinet_ref(cursor))
    } else {
        None
    };
    cursor.check()?;
    let header = Header {
        total_size,
        first_file_offset,
        minor_version,
        major_version,
        num_folders,
        num_files,
        cabinet_set_id,
        cabinet_set_index,
        header_reserve_size,
        folder_reserve_size,
        data_reserve_size,
        prev_cabinet,
        next_cabinet,
    };
    tracing::debug!(?header, flags, "read cabinet header");
    Ok(header)
}

fn read_cabinet_ref<R: Read + Seek>(
    cursor: &mut ByteCursor<R>,
) -> CabinetRef {
    let cabinet_name = cursor.read_cstring();
    let disk_name = cursor.read_cstring();
    CabinetRef { cabinet_name, disk_name }
}

#[tracing::instrument(
    skip(cursor, header),
    fields(num_folders = header.num_folders)
)]
fn read_folder_table<R: Read + Seek>(
    cursor: &mut ByteCursor<R>,
    header: &Header,
) -> Result<Vec<FolderEntry>> {
    let num_folders = header.num_folders as usize;
    let mut folders = Vec::with_capacity(num_folders);
    for _ in 0..num_folders {
        let entry =
            parse_folder_entry(cursor, header.folder_reserve_size as u64);
        tracing::trace!(?entry, "read folder entry");
        folders.push(entry);
    }
    cursor.check()?;
    Ok(folders)
}

/// The file table need not follow the folder table directly, so it is
/// located through the header's offset.
#[tracing::instrument(
    skip(cursor, header),
    fields(offset = header.first_file_offset)
)]
fn seek_file_table<R: Read + Seek>(
    cursor: &mut ByteCursor<R>,
    header: &Header,
) -> Result<()> {
    cursor.reseek(header.first_file_offset as u64);
    cursor.check()?;
    Ok(())
}

#[tracing::instrument(
    skip(cursor, header, folders),
    fields(num_files = header.num_files)
)]
fn read_file_table<R: Read + Seek>(
    cursor: &mut ByteCursor<R>,
    header: &Header,
    folders: &mut [FolderEntry],
) -> Result<()> {
    for _ in 0..header.num_files {
        let entry =
            parse_file_entry(cursor, header.data_reserve_size as u64);
        cursor.check()?;
        let folder_index = entry.folder_index as usize;
        if folder_index >= folders.len() {
            structural_violation!(
                "folder index out of range ({}; cabinet has {} folders)",
                folder_index,
                folders.len()
            );
        }
        tracing::trace!(?entry, "read file entry");
        folders[folder_index].files.push(entry);
    }
    Ok(())
}

/// A cabinet parsed from a file on disk, together with the open file.
pub struct CabinetFile {
    cabinet: Cabinet,
    file: File,
}

impl CabinetFile {
    /// Returns the parsed index.
    pub fn cabinet(&self) -> &Cabinet {
        &self.cabinet
    }

    /// Splits into the parsed index and the underlying file.
    pub fn into_parts(self) -> (Cabinet, File) {
        (self.cabinet, self.file)
    }

    /// Closes the underlying file, keeping the parsed index.  As with
    /// dropping any [`File`], an error from the operating system's close is
    /// ignored; nothing was written through the handle.
    pub fn close(self) -> Cabinet {
        let (cabinet, file) = self.into_parts();
        drop(file);
        cabinet
    }
}

impl Deref for CabinetFile {
    type Target = Cabinet;

    fn deref(&self) -> &Cabinet {
        &self.cabinet
    }
}

/// Opens and parses the cabinet file at `path`.  If parsing fails the file is
/// closed before the error is returned.
pub fn open<P: AsRef<Path>>(path: P) -> Result<CabinetFile> {
    let path = path.as_ref();
    let mut file = File::open(path)?;
    let length = file.metadata()?.len();
    let length = match i64::try_from(length) {
        Ok(length) => length,
        Err(_) => invalid_argument!("File is too large ({})", length),
    };
    tracing::debug!(path = %path.display(), length, "opening cabinet");
    let cabinet = Cabinet::parse(&mut file, length)?;
    Ok(CabinetFile { cabinet, file })
}

/// Parses the cabinet stored in the first `length` bytes of `reader`.  See
/// [`Cabinet::parse`].
pub fn parse<R: Read + Seek>(reader: R, length: i64) -> Result<Cabinet> {
    Cabinet::parse(reader, length)
}
