//! # datsearch
//!
//! Client for a remote string search service:
//! - Byte-exact encoding of search requests
//! - Streaming decoding of occurrence records
//! - Configurable wire byte order and per-call deadlines
//! - TCP and Unix domain socket transports
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    CLI / Caller                              │
//! │               (needle + search mode)                         │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                      Client                                  │
//! │        (deadlines, one exchange at a time)                   │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │   Encoder   │          │   Decoder   │
//!   │  (request)  │          │ (response)  │
//!   └──────┬──────┘          └──────▲──────┘
//!          │                        │
//!          ▼                        │
//!   ┌─────────────────────────────────────┐
//!   │      Transport (TCP / Unix)         │
//!   └─────────────────────────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod network;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{SearchError, Result};
pub use config::{Config, Endpoint};
pub use network::{Client, SharedClient};
pub use protocol::{ByteOrder, Codec, Occurrence, Occurrences, SearchMode};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of datsearch
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
