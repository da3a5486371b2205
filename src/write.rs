use std::io::{self, ErrorKind, Write};

use crate::str_ptr::FfiStrPtr;

impl FfiStrPtr<'_> {
    /// Write this view to `writer` once.
    ///
    /// Returns the number of bytes actually written, which may be less than
    /// the length of the view.
    #[inline]
    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<usize> {
        writer.write(self.as_bytes())
    }

    /// Write the whole view to `writer`.
    ///
    /// Retries with the remaining unwritten suffix until every byte has been
    /// written. A single attempt that writes zero bytes is permanent failure
    /// and is reported as [ErrorKind::WriteZero].
    pub fn write_all_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        let mut pos = 0;

        while pos < self.len() {
            let rest = self.substr(pos, self.len() - pos);
            let written = rest.write_to(&mut writer)?;

            if written == 0 {
                return Err(io::Error::new(
                    ErrorKind::WriteZero,
                    "sink accepted no bytes",
                ));
            }

            pos += written;
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    /// Accepts one byte per write call.
    struct ByteAtATime {
        bytes: Vec<u8>,
    }

    impl Write for ByteAtATime {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if buf.is_empty() {
                return Ok(0);
            }

            self.bytes.push(buf[0]);
            Ok(1)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Never accepts anything.
    struct Stuck;

    impl Write for Stuck {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Ok(0)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_all_in_one_attempt() {
        let str = FfiStrPtr::from_str("hello world");
        let mut sink: Vec<u8> = Vec::new();

        str.write_all_to(&mut sink).unwrap();

        assert_eq!(&sink[..], b"hello world");
    }

    #[test]
    fn write_all_retries_partial_writes() {
        let str = FfiStrPtr::from_str("hello world");
        let mut sink = ByteAtATime { bytes: Vec::new() };

        str.write_all_to(&mut sink).unwrap();

        assert_eq!(&sink.bytes[..], b"hello world");
    }

    #[test]
    fn write_all_fails_on_zero_byte_write() {
        let str = FfiStrPtr::from_str("hello");

        let err = str.write_all_to(Stuck).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::WriteZero);
    }

    #[test]
    fn write_all_empty_view() {
        let mut sink = Stuck;
        FfiStrPtr::empty().write_all_to(&mut sink).unwrap();
    }

    #[test]
    fn write_reports_bytes_written() {
        let str = FfiStrPtr::from_str("hello");
        let mut sink = ByteAtATime { bytes: Vec::new() };

        let written = str.write_to(&mut sink).unwrap();

        assert_eq!(written, 1);
        assert_eq!(&sink.bytes[..], b"h");
    }
}
