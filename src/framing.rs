//! LSP message framing.
//!
//! Messages travel as `Content-Length: <length>\r\n\r\n<content>` envelopes,
//! as specified by the Language Server Protocol. Exactly one body per
//! envelope; no other headers are recognised.

use thiserror::Error;
use tracing::trace;

use crate::io::{Reader, StreamError, Writer};

const CONTENT_LENGTH: &str = "Content-Length: ";

/// Error types for envelope encoding and decoding
#[derive(Debug, Error)]
pub enum FramingError {
    #[error(transparent)]
    Stream(#[from] StreamError),

    #[error("invalid content length value")]
    InvalidContentLength,

    #[error("end of stream while parsing content length")]
    EndOfStreamInContentLength,

    #[error("expected '{expected}' got '{got}'")]
    HeaderMismatch { expected: String, got: String },

    /// `got` carries `\r` rendered as `␍` and `\n` as `␊` so the diagnostic
    /// stays printable.
    #[error("expected '␍␊␍␊' got '␍{got}'")]
    SeparatorMismatch { got: String },
}

/// Reads a single framed message body from `reader`, blocking until the whole
/// envelope has arrived.
pub fn read_content<R: Reader + ?Sized>(reader: &mut R) -> Result<String, FramingError> {
    match_literal(reader, CONTENT_LENGTH)?;

    let mut len: u64 = 0;
    loop {
        let mut byte = [0u8; 1];
        if reader.read_full(&mut byte).map_err(StreamError::from)? != 1 {
            return Err(FramingError::EndOfStreamInContentLength);
        }
        match byte[0] {
            b'0'..=b'9' => len = len * 10 + u64::from(byte[0] - b'0'),
            b'\r' => break,
            _ => return Err(FramingError::InvalidContentLength),
        }
    }

    let separator = reader.read_string(3)?;
    if separator != "\n\r\n" {
        return Err(FramingError::SeparatorMismatch {
            got: separator.replace('\r', "␍").replace('\n', "␊"),
        });
    }

    let content = reader.read_string(len as usize)?;
    trace!("read framed message ({len} bytes)");
    Ok(content)
}

/// Writes `content` to `writer`, framed with a `Content-Length` header.
pub fn write_content<W: Writer + ?Sized>(writer: &mut W, content: &str) -> Result<(), FramingError> {
    trace!("writing framed message ({} bytes)", content.len());
    writer.write_text(&format!("{CONTENT_LENGTH}{}\r\n\r\n{content}", content.len()))?;
    Ok(())
}

fn match_literal<R: Reader + ?Sized>(reader: &mut R, expected: &str) -> Result<(), FramingError> {
    let got = reader.read_string(expected.len())?;
    if got != expected {
        return Err(FramingError::HeaderMismatch {
            expected: expected.to_string(),
            got,
        });
    }
    Ok(())
}
