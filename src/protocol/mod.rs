//! Protocol Module
//!
//! Defines the wire protocol for client-server communication.
//!
//! ## Protocol Format
//!
//! ### Request Format
//! ```text
//! ┌──────────┬──────────┬─────────────────────────────┐
//! │ Mode (1) │ Len (4)  │         Needle              │
//! └──────────┴──────────┴─────────────────────────────┘
//! ```
//!
//! ### Mode Flags
//! - 0x01: FIRST     - only the first occurrence is sent
//! - 0x02: NEEDLE    - records carry the matched needle
//! - 0x04: USER_DATA - records carry user data
//!
//! ### Response Stream
//! ```text
//! ┌──────────┬──────────┬──────────┬─────┬──────────┐
//! │ Record 1 │ Record 2 │ Record 3 │ ... │ -1 (4)   │
//! └──────────┴──────────┴──────────┴─────┴──────────┘
//! ```
//!
//! All integers use the byte order both peers were configured with.

mod byte_order;
mod codec;
mod mode;
mod occurrence;

pub use byte_order::ByteOrder;
pub use codec::{Codec, RecordHeader, DEFAULT_MAX_FIELD_SIZE, HEADER_SIZE};
pub use mode::SearchMode;
pub use occurrence::{MatchedNeedle, Occurrence, Occurrences, CHARACTER_SIZE};
