use std::borrow::Cow;
use std::io::{Read, Seek};
use std::slice;

use time::PrimitiveDateTime;

use crate::consts;
use crate::cursor::ByteCursor;
use crate::datetime::datetime_from_bits;

/// An iterator over the file entries in a folder.
#[derive(Clone)]
pub struct FileEntries<'a> {
    pub(crate) iter: slice::Iter<'a, FileEntry>,
}

/// Metadata about one file stored in a cabinet.
#[derive(Debug, Clone)]
pub struct FileEntry {
    name: Vec<u8>,
    uncompressed_size: u32,
    uncompressed_offset: u32,
    date: u16,
    time: u16,
    attributes: u16,
    pub(crate) folder_index: u16,
}

impl<'a> Iterator for FileEntries<'a> {
    type Item = &'a FileEntry;

    fn next(&mut self) -> Option<&'a FileEntry> {
        self.iter.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<'a> ExactSizeIterator for FileEntries<'a> {}

impl FileEntry {
    /// Returns the name of the file.  Names are stored as raw bytes; any
    /// bytes that are not valid UTF-8 are replaced with U+FFFD.
    pub fn name(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.name)
    }

    /// Returns the name of the file exactly as stored, without its null
    /// terminator.
    pub fn name_bytes(&self) -> &[u8] {
        &self.name
    }

    /// Returns the total size of the file when decompressed, in bytes.
    pub fn uncompressed_size(&self) -> u32 {
        self.uncompressed_size
    }

    /// Returns the offset of the file's first byte within its folder's
    /// decompressed data.
    pub fn uncompressed_offset(&self) -> u32 {
        self.uncompressed_offset
    }

    /// Returns the index of the folder this file is stored in.
    pub fn folder_index(&self) -> u16 {
        self.folder_index
    }

    /// Returns the packed MS-DOS date word, undecoded.
    pub fn raw_date(&self) -> u16 {
        self.date
    }

    /// Returns the packed MS-DOS time word, undecoded.
    pub fn raw_time(&self) -> u16 {
        self.time
    }

    /// Decodes the datetime for this file.  According to the CAB spec, this
    /// "is typically considered the 'last modified' time in local time, but
    /// the actual definition is application-defined."
    ///
    /// Note that this will return [`None`] if the datetime in the cabinet file
    /// was not a valid date/time.
    pub fn datetime(&self) -> Option<PrimitiveDateTime> {
        datetime_from_bits(self.date, self.time)
    }

    /// Returns the raw attribute bit field.
    pub fn attributes(&self) -> u16 {
        self.attributes
    }

    /// Returns true if this file has the "read-only" attribute set.
    pub fn is_read_only(&self) -> bool {
        (self.attributes & consts::ATTR_READ_ONLY) != 0
    }

    /// Returns true if this file has the "hidden" attribute set.
    pub fn is_hidden(&self) -> bool {
        (self.attributes & consts::ATTR_HIDDEN) != 0
    }

    /// Returns true if this file has the "system file" attribute set.
    pub fn is_system(&self) -> bool {
        (self.attributes & consts::ATTR_SYSTEM) != 0
    }

    /// Returns true if this file has the "archive" (modified since last
    /// backup) attribute set.
    pub fn is_archive(&self) -> bool {
        (self.attributes & consts::ATTR_ARCH) != 0
    }

    /// Returns true if this file has the "execute after extraction" attribute
    /// set.
    pub fn is_exec(&self) -> bool {
        (self.attributes & consts::ATTR_EXEC) != 0
    }

    /// Returns true if this file has the "name is UTF" attribute set.  The
    /// flag is reported only; [`FileEntry::name`] decodes the same way
    /// either way.
    pub fn is_name_utf(&self) -> bool {
        (self.attributes & consts::ATTR_NAME_IS_UTF) != 0
    }
}

/// Reads one file table record followed by `reserve_size` bytes of per-file
/// reserve data.  The values are garbage if the cursor fails part way.
pub(crate) fn parse_file_entry<R: Read + Seek>(
    cursor: &mut ByteCursor<R>,
    reserve_size: u64,
) -> FileEntry {
    let uncompressed_size = cursor.read_u32();
    let uncompressed_offset = cursor.read_u32();
    let folder_index = cursor.read_u16();
    let date = cursor.read_u16();
    let time = cursor.read_u16();
    let attributes = cursor.read_u16();
    let name = cursor.read_cstring();
    cursor.skip(reserve_size);
    FileEntry {
        name,
        uncompressed_size,
        uncompressed_offset,
        date,
        time,
        attributes,
        folder_index,
    }
}
