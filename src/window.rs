use std::io::{self, Read, Seek, SeekFrom};

/// A view of the byte range `[0, len)` of an underlying reader.  Reads stop
/// at `len` even if the underlying reader has more data.
pub(crate) struct Window<R> {
    inner: R,
    len: u64,
    pos: u64,
}

impl<R: Read + Seek> Window<R> {
    pub(crate) fn new(mut inner: R, len: u64) -> io::Result<Window<R>> {
        inner.seek(SeekFrom::Start(0))?;
        Ok(Window { inner, len, pos: 0 })
    }
}

impl<R: Read> Read for Window<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        debug_assert!(self.pos <= self.len);
        let bytes_remaining = self.len - self.pos;
        let max_bytes = bytes_remaining.min(buf.len() as u64) as usize;
        if max_bytes == 0 {
            return Ok(0);
        }
        let bytes_read = self.inner.read(&mut buf[..max_bytes])?;
        self.pos += bytes_read as u64;
        Ok(bytes_read)
    }
}

impl<R: Seek> Seek for Window<R> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let new_pos = match pos {
            SeekFrom::Start(offset) => offset as i128,
            SeekFrom::Current(delta) => self.pos as i128 + delta as i128,
            SeekFrom::End(delta) => self.len as i128 + delta as i128,
        };
        if new_pos < 0 || new_pos > self.len as i128 {
            invalid_input!(
                "Cannot seek to {}, cabinet length is {}",
                new_pos,
                self.len
            );
        }
        let new_pos = new_pos as u64;
        self.inner.seek(SeekFrom::Start(new_pos))?;
        self.pos = new_pos;
        Ok(new_pos)
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, ErrorKind, Read, Seek, SeekFrom};

    use super::Window;

    #[test]
    fn reads_stop_at_window_end() {
        let data: &[u8] = b"0123456789";
        let mut window = Window::new(Cursor::new(data), 4).unwrap();
        let mut output = Vec::new();
        window.read_to_end(&mut output).unwrap();
        assert_eq!(output, b"0123");
    }

    #[test]
    fn window_starts_at_offset_zero() {
        let mut cursor = Cursor::new(b"abcdef".to_vec());
        cursor.seek(SeekFrom::Start(3)).unwrap();
        let mut window = Window::new(cursor, 6).unwrap();
        let mut output = [0u8; 2];
        window.read_exact(&mut output).unwrap();
        assert_eq!(&output, b"ab");
    }

    #[test]
    fn seek_within_window() {
        let data: &[u8] = b"0123456789";
        let mut window = Window::new(Cursor::new(data), 8).unwrap();
        assert_eq!(window.seek(SeekFrom::Start(5)).unwrap(), 5);
        assert_eq!(window.seek(SeekFrom::End(-1)).unwrap(), 7);
        let mut output = Vec::new();
        window.read_to_end(&mut output).unwrap();
        assert_eq!(output, b"7");
    }

    #[test]
    fn seek_past_window_end_fails() {
        let data: &[u8] = b"0123456789";
        let mut window = Window::new(Cursor::new(data), 8).unwrap();
        let error = window.seek(SeekFrom::Start(9)).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidInput);
        let error = window.seek(SeekFrom::Current(-1)).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidInput);
    }
}
