//! Newline-delimited message framing.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use super::errors::{ProtocolError, Result};
use crate::game::constants::MAX_MESSAGE_SIZE;

/// Room for a `\r\n` terminator plus one byte to detect overflow.
const READ_LIMIT: u64 = MAX_MESSAGE_SIZE as u64 + 3;

/// Drop leading NULs and trailing line terminators/NULs. C clients
/// that send `strlen + 1` bytes put a NUL after every line, so it shows
/// up at the front of the next read.
fn trim_frame(bytes: &[u8]) -> &[u8] {
    let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
    let end = bytes
        .iter()
        .rposition(|&b| !matches!(b, b'\n' | b'\r' | 0))
        .map_or(start, |idx| idx + 1);
    &bytes[start..end.max(start)]
}

/// Read one message. Returns `Ok(None)` once the peer closes the
/// connection. A last line without a newline is still a message unless
/// it's only padding.
///
/// # Errors
///
/// Fails on I/O errors, lines longer than [`MAX_MESSAGE_SIZE`], and
/// non-UTF-8 input.
pub async fn read_message<R: AsyncBufRead + Unpin>(reader: &mut R) -> Result<Option<String>> {
    let mut buf = Vec::with_capacity(64);
    let read = (&mut *reader)
        .take(READ_LIMIT)
        .read_until(b'\n', &mut buf)
        .await?;
    if read == 0 {
        return Ok(None);
    }

    let terminated = buf.last() == Some(&b'\n');
    let frame = trim_frame(&buf);
    if frame.len() > MAX_MESSAGE_SIZE || (!terminated && read as u64 == READ_LIMIT) {
        return Err(ProtocolError::MessageTooLarge {
            actual: frame.len(),
            max: MAX_MESSAGE_SIZE,
        }
        .into());
    }
    if !terminated && frame.is_empty() {
        return Ok(None);
    }

    match String::from_utf8(frame.to_vec()) {
        Ok(message) => Ok(Some(message)),
        Err(_) => Err(ProtocolError::InvalidEncoding.into()),
    }
}

/// Write one message followed by a newline, all in one chunk.
///
/// # Errors
///
/// Fails on I/O errors and messages longer than [`MAX_MESSAGE_SIZE`].
pub async fn write_message<W: AsyncWrite + Unpin>(writer: &mut W, message: &str) -> Result<()> {
    if message.len() > MAX_MESSAGE_SIZE {
        return Err(ProtocolError::MessageTooLarge {
            actual: message.len(),
            max: MAX_MESSAGE_SIZE,
        }
        .into());
    }
    let mut buf = Vec::with_capacity(message.len() + 1);
    buf.extend_from_slice(message.as_bytes());
    buf.push(b'\n');
    writer.write_all(&buf).await?;
    writer.flush().await?;
    Ok(())
}
