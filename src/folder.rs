use std::io::{Read, Seek};
use std::slice;

use crate::ctype::CompressionType;
use crate::cursor::ByteCursor;
use crate::file::{FileEntries, FileEntry};

/// An iterator over the folder entries in a cabinet.
#[derive(Clone)]
pub struct FolderEntries<'a> {
    pub(crate) iter: slice::Iter<'a, FolderEntry>,
}

/// Metadata about one folder in a cabinet.
#[derive(Debug, Clone)]
pub struct FolderEntry {
    first_data_block_offset: u32,
    num_data_blocks: u16,
    compression_bits: u16,
    compression_method: u8,
    pub(crate) files: Vec<FileEntry>,
}

impl<'a> Iterator for FolderEntries<'a> {
    type Item = &'a FolderEntry;

    fn next(&mut self) -> Option<&'a FolderEntry> {
        self.iter.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<'a> ExactSizeIterator for FolderEntries<'a> {}

impl FolderEntry {
    /// Returns the absolute offset of this folder's first data block within
    /// the cabinet.
    pub fn first_data_block_offset(&self) -> u32 {
        self.first_data_block_offset
    }

    /// Returns the number of data blocks used to store this folder's data.
    pub fn num_data_blocks(&self) -> u16 {
        self.num_data_blocks
    }

    /// Returns the scheme used to compress this folder's data.
    pub fn compression_type(&self) -> CompressionType {
        CompressionType::from_fields(
            self.compression_method,
            self.compression_bits,
        )
    }

    /// Returns the method-specific compression bit field exactly as stored.
    pub fn compression_bits(&self) -> u16 {
        self.compression_bits
    }

    /// Returns the compression method id exactly as stored.
    pub fn compression_method(&self) -> u8 {
        self.compression_method
    }

    /// Returns an iterator over the file entries in this folder, in file
    /// table order.
    pub fn file_entries(&self) -> FileEntries {
        FileEntries { iter: self.files.iter() }
    }
}

/// Reads one folder table record followed by `reserve_size` bytes of
/// per-folder reserve data.
pub(crate) fn parse_folder_entry<R: Read + Seek>(
    cursor: &mut ByteCursor<R>,
    reserve_size: u64,
) -> FolderEntry {
    let first_data_block_offset = cursor.read_u32();
    let num_data_blocks = cursor.read_u16();
    let compression_bits = cursor.read_u16();
    let compression_method = cursor.read_u8();
    cursor.skip(reserve_size);
    FolderEntry {
        first_data_block_offset,
        num_data_blocks,
        compression_bits,
        compression_method,
        files: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::parse_folder_entry;
    use crate::ctype::CompressionType;
    use crate::cursor::ByteCursor;

    #[test]
    fn parse_lzx_folder_entry() {
        let binary: &[u8] = b"\x5b\0\0\0\x02\0\0\x13\x03";
        let mut cursor =
            ByteCursor::new(Cursor::new(binary), binary.len() as u64)
                .unwrap();
        let entry = parse_folder_entry(&mut cursor, 0);
        cursor.check().unwrap();
        assert_eq!(entry.first_data_block_offset(), 0x5b);
        assert_eq!(entry.num_data_blocks(), 2);
        assert_eq!(entry.compression_bits(), 0x1300);
        assert_eq!(entry.compression_method(), 3);
        assert_eq!(entry.compression_type(), CompressionType::Lzx(19));
        assert_eq!(entry.file_entries().len(), 0);
    }

    #[test]
    fn consecutive_folder_entries_stay_aligned() {
        let binary: &[u8] = b"\x10\0\0\0\x01\0\0\0\x01\
            \0\x02\0\0\x07\0\0\x15\x03";
        let mut cursor =
            ByteCursor::new(Cursor::new(binary), binary.len() as u64)
                .unwrap();
        let first = parse_folder_entry(&mut cursor, 0);
        let second = parse_folder_entry(&mut cursor, 0);
        cursor.check().unwrap();
        assert_eq!(first.first_data_block_offset(), 0x10);
        assert_eq!(first.num_data_blocks(), 1);
        assert_eq!(first.compression_type(), CompressionType::MsZip);
        assert_eq!(second.first_data_block_offset(), 0x200);
        assert_eq!(second.num_data_blocks(), 7);
        assert_eq!(second.compression_type(), CompressionType::Lzx(21));
    }

    #[test]
    fn folder_reserve_is_skipped() {
        let binary: &[u8] =
            b"\x43\0\0\0\x01\0\0\0\x01\x01\x02\x03\x04\x7f";
        let mut cursor =
            ByteCursor::new(Cursor::new(binary), binary.len() as u64)
                .unwrap();
        let entry = parse_folder_entry(&mut cursor, 4);
        assert_eq!(cursor.read_u8(), 0x7f);
        cursor.check().unwrap();
        assert_eq!(entry.compression_type(), CompressionType::MsZip);
    }

    #[test]
    fn truncated_folder_entry_fails() {
        let binary: &[u8] = b"\x43\0\0\0\x01\0\0\0";
        let mut cursor =
            ByteCursor::new(Cursor::new(binary), binary.len() as u64)
                .unwrap();
        let _ = parse_folder_entry(&mut cursor, 0);
        let error = cursor.check().unwrap_err();
        assert_eq!(error.kind(), std::io::ErrorKind::UnexpectedEof);
    }
}
