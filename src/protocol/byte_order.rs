//! Byte order and primitive reads
//!
//! Both peers must agree on the byte order out of band; nothing on the wire
//! says which one is in use.

use std::fmt;
use std::io::{ErrorKind, Read};
use std::str::FromStr;

use bytes::BufMut;

use crate::error::{Field, Operation, Result, SearchError};

/// Byte order applied to every multi-byte integer on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ByteOrder {
    #[default]
    Little,
    Big,
}

impl ByteOrder {
    /// Byte order of the host this process runs on
    pub fn native() -> Self {
        if cfg!(target_endian = "big") {
            ByteOrder::Big
        } else {
            ByteOrder::Little
        }
    }

    pub fn put_u32<B: BufMut>(self, buf: &mut B, value: u32) {
        match self {
            ByteOrder::Little => buf.put_u32_le(value),
            ByteOrder::Big => buf.put_u32(value),
        }
    }

    pub fn put_i32<B: BufMut>(self, buf: &mut B, value: i32) {
        match self {
            ByteOrder::Little => buf.put_i32_le(value),
            ByteOrder::Big => buf.put_i32(value),
        }
    }

    pub fn u32_from(self, bytes: [u8; 4]) -> u32 {
        match self {
            ByteOrder::Little => u32::from_le_bytes(bytes),
            ByteOrder::Big => u32::from_be_bytes(bytes),
        }
    }

    pub fn i32_from(self, bytes: [u8; 4]) -> i32 {
        match self {
            ByteOrder::Little => i32::from_le_bytes(bytes),
            ByteOrder::Big => i32::from_be_bytes(bytes),
        }
    }
}

impl fmt::Display for ByteOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ByteOrder::Little => f.write_str("little"),
            ByteOrder::Big => f.write_str("big"),
        }
    }
}

impl FromStr for ByteOrder {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "little" | "le" => Ok(ByteOrder::Little),
            "big" | "be" => Ok(ByteOrder::Big),
            "native" => Ok(ByteOrder::native()),
            other => Err(SearchError::Config(format!(
                "Unknown byte order: {:?} (expected little or big)",
                other
            ))),
        }
    }
}

// =============================================================================
// Stream-based read helpers
// =============================================================================

/// Fill `buf` completely from `reader`
///
/// End of stream before `buf` is full is a `ShortRead` for `field`; an
/// elapsed read deadline is a `Timeout`. Bytes consumed before the failure
/// are lost.
pub(crate) fn read_field<R: Read>(reader: &mut R, buf: &mut [u8], field: Field) -> Result<()> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => {
                return Err(SearchError::ShortRead {
                    field,
                    expected: buf.len(),
                    got: filled,
                })
            }
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) if is_timeout(&e) => {
                return Err(SearchError::Timeout {
                    operation: Operation::Reading,
                })
            }
            Err(e) => return Err(SearchError::Io(e)),
        }
    }
    Ok(())
}

/// Read one 4-byte signed integer
pub(crate) fn read_i32<R: Read>(reader: &mut R, order: ByteOrder, field: Field) -> Result<i32> {
    let mut raw = [0u8; 4];
    read_field(reader, &mut raw, field)?;
    Ok(order.i32_from(raw))
}

/// Read `len` bytes into a fresh buffer
pub(crate) fn read_vec<R: Read>(reader: &mut R, len: usize, field: Field) -> Result<Vec<u8>> {
    let mut buf = vec![0u8; len];
    read_field(reader, &mut buf, field)?;
    Ok(buf)
}

/// Socket timeouts surface as `WouldBlock` on unix and `TimedOut` on Windows
pub(crate) fn is_timeout(err: &std::io::Error) -> bool {
    matches!(err.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut)
}
