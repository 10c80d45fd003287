//! Buffered forward-only reads with a sticky error.
//!
//! A [`ByteCursor`] remembers the first I/O error it runs into.  After that
//! every read returns a zero value without touching the source, so a batch
//! of field reads can be written without a `?` on each line.  The caller
//! must call [`ByteCursor::check`] at the end of every batch; values read
//! after a failure are meaningless.

use std::io::{self, BufRead, BufReader, Read, Seek, SeekFrom};

use byteorder::{LittleEndian, ReadBytesExt};

use crate::window::Window;

pub(crate) struct ByteCursor<R> {
    reader: BufReader<Window<R>>,
    error: Option<io::Error>,
    failed: bool,
}

impl<R: Read + Seek> ByteCursor<R> {
    /// Opens a cursor on the byte range `[0, len)` of `reader`.
    pub(crate) fn new(reader: R, len: u64) -> io::Result<ByteCursor<R>> {
        let window = Window::new(reader, len)?;
        Ok(ByteCursor {
            reader: BufReader::new(window),
            error: None,
            failed: false,
        })
    }

    pub(crate) fn read_u8(&mut self) -> u8 {
        self.latch(|reader| reader.read_u8())
    }

    pub(crate) fn read_u16(&mut self) -> u16 {
        self.latch(|reader| reader.read_u16::<LittleEndian>())
    }

    pub(crate) fn read_u32(&mut self) -> u32 {
        self.latch(|reader| reader.read_u32::<LittleEndian>())
    }

    /// Discards exactly `count` bytes.
    pub(crate) fn skip(&mut self, count: u64) {
        self.latch(|reader| {
            let skipped =
                io::copy(&mut reader.by_ref().take(count), &mut io::sink())?;
            if skipped < count {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    format!(
                        "Expected to skip {} bytes, but only {} remain",
                        count, skipped
                    ),
                ));
            }
            Ok(())
        })
    }

    /// Returns the bytes up to (not including) the next NUL, consuming the
    /// NUL as well.
    pub(crate) fn read_cstring(&mut self) -> Vec<u8> {
        self.latch(|reader| {
            let mut bytes = Vec::new();
            reader.read_until(0, &mut bytes)?;
            if bytes.pop() != Some(0) {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "String is missing its null terminator",
                ));
            }
            Ok(bytes)
        })
    }

    /// Moves to an absolute offset within the range, dropping any buffered
    /// bytes.
    pub(crate) fn reseek(&mut self, offset: u64) {
        self.latch(|reader| reader.seek(SeekFrom::Start(offset)).map(|_| ()))
    }

    /// Reports the first error latched since the cursor was created.  Once
    /// an error has been reported the cursor stays unusable, and later calls
    /// keep failing.
    pub(crate) fn check(&mut self) -> io::Result<()> {
        if let Some(error) = self.error.take() {
            return Err(error);
        }
        if self.failed {
            return Err(io::Error::new(
                io::ErrorKind::Other,
                "Cursor used after a reported failure",
            ));
        }
        Ok(())
    }

    fn latch<T, F>(&mut self, op: F) -> T
    where
        T: Default,
        F: FnOnce(&mut BufReader<Window<R>>) -> io::Result<T>,
    {
        if self.failed {
            return T::default();
        }
        match op(&mut self.reader) {
            Ok(value) => value,
            Err(error) => {
                tracing::trace!(%error, "cursor latched an error");
                self.failed = true;
                self.error = Some(error);
                T::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, ErrorKind};

    use super::ByteCursor;

    fn cursor(data: &[u8]) -> ByteCursor<Cursor<&[u8]>> {
        ByteCursor::new(Cursor::new(data), data.len() as u64).unwrap()
    }

    #[test]
    fn reads_little_endian_fields() {
        let mut cursor = cursor(b"\x01\x34\x12\x78\x56\x34\x12");
        assert_eq!(cursor.read_u8(), 0x01);
        assert_eq!(cursor.read_u16(), 0x1234);
        assert_eq!(cursor.read_u32(), 0x12345678);
        cursor.check().unwrap();
    }

    #[test]
    fn reads_null_terminated_strings() {
        let mut cursor = cursor(b"hi.txt\0\0bye\0");
        assert_eq!(cursor.read_cstring(), b"hi.txt");
        assert_eq!(cursor.read_cstring(), b"");
        assert_eq!(cursor.read_cstring(), b"bye");
        cursor.check().unwrap();
    }

    #[test]
    fn unterminated_string_is_truncation() {
        let mut cursor = cursor(b"abc");
        assert_eq!(cursor.read_cstring(), b"");
        let error = cursor.check().unwrap_err();
        assert_eq!(error.kind(), ErrorKind::UnexpectedEof);
    }

    #[test]
    fn skip_then_read() {
        let mut cursor = cursor(b"\xff\xff\xff\x2a");
        cursor.skip(3);
        assert_eq!(cursor.read_u8(), 0x2a);
        cursor.skip(0);
        cursor.check().unwrap();
    }

    #[test]
    fn skip_past_end_fails() {
        let mut cursor = cursor(b"\0\0");
        cursor.skip(3);
        let error = cursor.check().unwrap_err();
        assert_eq!(error.kind(), ErrorKind::UnexpectedEof);
    }

    #[test]
    fn first_error_sticks_and_later_reads_are_zero() {
        let mut cursor = cursor(b"\x01\x02\x03");
        assert_eq!(cursor.read_u32(), 0);
        // Bytes remain, but the cursor no longer reads them.
        assert_eq!(cursor.read_u8(), 0);
        assert_eq!(cursor.read_u16(), 0);
        assert_eq!(cursor.read_cstring(), b"");
        cursor.reseek(0);
        assert_eq!(cursor.read_u8(), 0);
        let error = cursor.check().unwrap_err();
        assert_eq!(error.kind(), ErrorKind::UnexpectedEof);
        assert!(cursor.check().is_err());
    }

    #[test]
    fn reseek_discards_buffered_bytes() {
        let mut cursor = cursor(b"\x0a\x0b\x0c\x0d");
        assert_eq!(cursor.read_u8(), 0x0a);
        cursor.reseek(3);
        assert_eq!(cursor.read_u8(), 0x0d);
        cursor.reseek(1);
        assert_eq!(cursor.read_u8(), 0x0b);
        cursor.check().unwrap();
    }

    #[test]
    fn reseek_past_end_fails() {
        let mut cursor = cursor(b"\0\0\0\0");
        cursor.reseek(5);
        let error = cursor.check().unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn reads_stay_within_declared_length() {
        let data: &[u8] = b"\x01\x00\x02\x00";
        let mut cursor = ByteCursor::new(Cursor::new(data), 2).unwrap();
        assert_eq!(cursor.read_u16(), 1);
        assert_eq!(cursor.read_u16(), 0);
        let error = cursor.check().unwrap_err();
        assert_eq!(error.kind(), ErrorKind::UnexpectedEof);
    }
}
