//! Protocol codec
//!
//! Encoding of search requests and streaming decoding of occurrence records.
//!
//! ## Wire Format
//!
//! ### Request Format
//! ```text
//! ┌──────────┬──────────┬─────────────────────────────┐
//! │ Mode (1) │ Len (4)  │         Needle              │
//! └──────────┴──────────┴─────────────────────────────┘
//! ```
//!
//! ### Response Record
//! ```text
//! ┌──────────┬────────────┬──────────────┬─────────────────┐
//! │ Size (4) │ Data[Size] │ NeedleLen(4) │ Needle[Len * 4] │
//! └──────────┴────────────┴──────────────┴─────────────────┘
//! ```
//! - Data is present when Size > 0
//! - NeedleLen and Needle are present when the NEEDLE flag is set
//! - A negative Size ends the stream and carries no further fields

use std::io::{Read, Write};

use bytes::{BufMut, Bytes, BytesMut};

use super::byte_order::{is_timeout, read_i32, read_vec};
use super::{ByteOrder, MatchedNeedle, Occurrence, Occurrences, SearchMode, CHARACTER_SIZE};
use crate::error::{Field, Operation, Result, SearchError};

/// Header size: 1 byte mode + 4 bytes needle length
pub const HEADER_SIZE: usize = 5;

/// Default cap on any decoded length field (16 MB)
pub const DEFAULT_MAX_FIELD_SIZE: usize = 16 * 1024 * 1024;

/// Decoded record header
///
/// The wire reuses one signed slot for both "is there another record" and
/// "how large is its data".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordHeader {
    /// Negative sentinel, no record follows
    EndOfStream,

    /// A record follows with `data_size` bytes of user data
    Record { data_size: usize },
}

/// Codec parameters shared by the encoding and decoding sides
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Codec {
    byte_order: ByteOrder,
    max_field_size: usize,
}

impl Default for Codec {
    fn default() -> Self {
        Self::new(ByteOrder::default())
    }
}

impl Codec {
    pub fn new(byte_order: ByteOrder) -> Self {
        Self {
            byte_order,
            max_field_size: DEFAULT_MAX_FIELD_SIZE,
        }
    }

    /// Cap the size of any single decoded field
    ///
    /// Lengths above the cap fail with `FieldTooLarge` before anything is
    /// allocated.
    pub fn with_max_field_size(mut self, max: usize) -> Self {
        self.max_field_size = max;
        self
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    pub fn max_field_size(&self) -> usize {
        self.max_field_size
    }

    // =========================================================================
    // Request Encoding
    // =========================================================================

    /// Encode a search request to bytes
    ///
    /// Format: mode (1) + needle_len (4) + needle
    pub fn encode_request(&self, needle: &[u8], mode: SearchMode) -> Result<Bytes> {
        let needle_len = u32::try_from(needle.len()).map_err(|_| {
            SearchError::Protocol(format!(
                "Needle of {} bytes does not fit a 32-bit length",
                needle.len()
            ))
        })?;

        let mut frame = BytesMut::with_capacity(HEADER_SIZE + needle.len());
        frame.put_u8(mode.bits());
        self.byte_order.put_u32(&mut frame, needle_len);
        frame.put_slice(needle);

        Ok(frame.freeze())
    }

    /// Write a search request to a stream as a single write
    pub fn write_request<W: Write>(
        &self,
        writer: &mut W,
        needle: &[u8],
        mode: SearchMode,
    ) -> Result<()> {
        let frame = self.encode_request(needle, mode)?;
        writer
            .write_all(&frame)
            .and_then(|()| writer.flush())
            .map_err(|e| {
                if is_timeout(&e) {
                    SearchError::Timeout {
                        operation: Operation::Writing,
                    }
                } else {
                    SearchError::Io(e)
                }
            })
    }

    // =========================================================================
    // Response Decoding
    // =========================================================================

    /// Read the next record header
    pub fn read_record_header<R: Read>(&self, reader: &mut R) -> Result<RecordHeader> {
        let size = read_i32(reader, self.byte_order, Field::DataSize)?;
        if size < 0 {
            return Ok(RecordHeader::EndOfStream);
        }
        let data_size = self.check_size(Field::DataSize, size as usize)?;
        Ok(RecordHeader::Record { data_size })
    }

    /// Read the body of one record whose header has already been consumed
    pub fn read_record_body<R: Read>(
        &self,
        reader: &mut R,
        data_size: usize,
        mode: SearchMode,
    ) -> Result<Occurrence> {
        let data_value = if data_size > 0 {
            read_vec(reader, data_size, Field::DataValue)?
        } else {
            Vec::new()
        };

        let needle = if mode.needle() {
            Some(self.read_needle(reader)?)
        } else {
            None
        };

        Ok(Occurrence { data_value, needle })
    }

    /// Read every occurrence of one response
    ///
    /// Stops at the end-of-stream sentinel, or right after the first record
    /// when `mode` has FIRST set. In that case nothing past the first record
    /// is read: a server that keeps sending leaves those bytes on the stream.
    /// Any error discards the records decoded so far.
    pub fn read_occurrences<R: Read>(&self, reader: &mut R, mode: SearchMode) -> Result<Occurrences> {
        let mut occurrences = Occurrences::new();

        while let RecordHeader::Record { data_size } = self.read_record_header(reader)? {
            occurrences.push(self.read_record_body(reader, data_size, mode)?);

            if mode.first() {
                break;
            }
        }

        Ok(occurrences)
    }

    fn read_needle<R: Read>(&self, reader: &mut R) -> Result<MatchedNeedle> {
        let length = read_i32(reader, self.byte_order, Field::NeedleLength)?;
        if length < 0 {
            return Err(SearchError::Protocol(format!(
                "Negative needle length: {}",
                length
            )));
        }

        let byte_len = (length as usize)
            .checked_mul(CHARACTER_SIZE)
            .ok_or_else(|| SearchError::Protocol(format!("Needle length overflow: {}", length)))?;
        let byte_len = self.check_size(Field::Needle, byte_len)?;

        let bytes = read_vec(reader, byte_len, Field::Needle)?;
        Ok(MatchedNeedle { bytes })
    }

    fn check_size(&self, field: Field, size: usize) -> Result<usize> {
        if size > self.max_field_size {
            return Err(SearchError::FieldTooLarge {
                field,
                size,
                max: self.max_field_size,
            });
        }
        Ok(size)
    }
}
