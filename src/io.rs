//! Blocking byte-stream primitives.
//!
//! `Reader` and `Writer` extend `std::io::Read` and `std::io::Write` with the
//! exact-length operations the framing layer is written against. Any std
//! stream qualifies; in-memory endpoints are byte slices and `Vec<u8>`.

use std::io;

use thiserror::Error;

/// Error types for raw stream operations
#[derive(Debug, Error)]
pub enum StreamError {
    /// The stream ended before the requested number of bytes arrived.
    #[error("EOF")]
    Eof,

    #[error("invalid UTF-8 in message: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// A binary stream reader
pub trait Reader: io::Read {
    /// Reads bytes into `out`, blocking until either `out` is full or the end
    /// of the stream has been reached. Returns the number of bytes read; a
    /// count less than `out.len()` means the stream ended.
    fn read_full(&mut self, out: &mut [u8]) -> io::Result<usize> {
        let mut filled = 0;
        while filled < out.len() {
            match self.read(&mut out[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(filled)
    }

    /// Reads a string of exactly `len` bytes from the stream.
    fn read_string(&mut self, len: usize) -> Result<String, StreamError> {
        let mut buf = vec![0u8; len];
        if self.read_full(&mut buf)? != len {
            return Err(StreamError::Eof);
        }
        Ok(String::from_utf8(buf)?)
    }
}

impl<R: io::Read + ?Sized> Reader for R {}

/// A binary stream writer
pub trait Writer: io::Write {
    /// Writes the whole of `text` to the stream, blocking until the write has
    /// finished.
    fn write_text(&mut self, text: &str) -> Result<(), StreamError> {
        self.write_all(text.as_bytes())?;
        Ok(())
    }
}

impl<W: io::Write + ?Sized> Writer for W {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_full_stops_at_end_of_stream() {
        let mut stream: &[u8] = b"hello";
        let mut buf = [0u8; 8];
        let n = stream.read_full(&mut buf).unwrap();
        assert_eq!(n, 5);
        assert_eq!(&buf[..n], b"hello");
    }

    #[test]
    fn read_string_exact() {
        let mut stream: &[u8] = b"hello world";
        assert_eq!(stream.read_string(5).unwrap(), "hello");
        assert_eq!(stream.read_string(6).unwrap(), " world");
    }

    #[test]
    fn read_string_short_stream_is_eof() {
        let mut stream: &[u8] = b"hi";
        let err = stream.read_string(3).unwrap_err();
        assert_eq!(err.to_string(), "EOF");
    }

    #[test]
    fn write_text_appends() {
        let mut out = Vec::new();
        out.write_text("hello").unwrap();
        out.write_text(" world").unwrap();
        assert_eq!(out, b"hello world");
    }
}
