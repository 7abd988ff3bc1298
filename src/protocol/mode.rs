//! Search mode flags
//!
//! Selects which optional fields the server emits per occurrence and
//! whether only the first occurrence is wanted.

use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};
use std::str::FromStr;

use crate::error::{Result, SearchError};

/// Bitset of search flags, sent verbatim as the first request byte
///
/// Any combination is legal, including no flags and bits this crate does
/// not name. The same value must be used for a request and for decoding
/// its response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SearchMode(u8);

impl SearchMode {
    /// No optional fields, all occurrences
    pub const NONE: SearchMode = SearchMode(0);

    /// Stop after the first occurrence
    pub const FIRST: SearchMode = SearchMode(0b0000_0001);

    /// Each occurrence carries the matched needle
    pub const NEEDLE: SearchMode = SearchMode(0b0000_0010);

    /// Each occurrence carries its user data payload
    pub const USER_DATA: SearchMode = SearchMode(0b0000_0100);

    /// Every named flag
    pub const ALL: SearchMode = SearchMode(0b0000_0111);

    pub const fn from_bits(bits: u8) -> Self {
        SearchMode(bits)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    /// True if every flag in `other` is set in `self`
    pub const fn contains(self, other: SearchMode) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn first(self) -> bool {
        self.contains(SearchMode::FIRST)
    }

    pub fn needle(self) -> bool {
        self.contains(SearchMode::NEEDLE)
    }

    pub fn user_data(self) -> bool {
        self.contains(SearchMode::USER_DATA)
    }
}

impl BitOr for SearchMode {
    type Output = SearchMode;

    fn bitor(self, rhs: SearchMode) -> SearchMode {
        SearchMode(self.0 | rhs.0)
    }
}

impl BitOrAssign for SearchMode {
    fn bitor_assign(&mut self, rhs: SearchMode) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for SearchMode {
    type Output = SearchMode;

    fn bitand(self, rhs: SearchMode) -> SearchMode {
        SearchMode(self.0 & rhs.0)
    }
}

impl From<u8> for SearchMode {
    fn from(bits: u8) -> Self {
        SearchMode(bits)
    }
}

impl From<SearchMode> for u8 {
    fn from(mode: SearchMode) -> u8 {
        mode.0
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = [
            (SearchMode::FIRST, "first"),
            (SearchMode::NEEDLE, "needle"),
            (SearchMode::USER_DATA, "user-data"),
        ]
        .iter()
        .filter(|(flag, _)| self.contains(*flag))
        .map(|(_, name)| *name)
        .collect();

        let unknown = self.0 & !SearchMode::ALL.0;
        match (names.is_empty(), unknown) {
            (true, 0) => f.write_str("none"),
            (false, 0) => f.write_str(&names.join("|")),
            (true, bits) => write!(f, "0x{:02x}", bits),
            (false, bits) => write!(f, "{}|0x{:02x}", names.join("|"), bits),
        }
    }
}

impl FromStr for SearchMode {
    type Err = SearchError;

    /// Parse either a raw integer (`7`, `0x07`, `0b101`) or flag names
    /// joined by `|` or `,` (`first|needle`)
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Some(bits) = parse_bits(s) {
            return Ok(SearchMode(bits));
        }

        let mut mode = SearchMode::NONE;
        for name in s.split(['|', ',']).map(str::trim) {
            mode |= match name.to_ascii_lowercase().as_str() {
                "first" => SearchMode::FIRST,
                "needle" => SearchMode::NEEDLE,
                "user-data" | "user_data" | "userdata" | "data" => SearchMode::USER_DATA,
                "all" => SearchMode::ALL,
                "none" | "" => SearchMode::NONE,
                other => {
                    return Err(SearchError::Config(format!(
                        "Unknown search mode flag: {:?}",
                        other
                    )))
                }
            };
        }
        Ok(mode)
    }
}

fn parse_bits(s: &str) -> Option<u8> {
    if let Some(hex) = s.strip_prefix("0x") {
        u8::from_str_radix(hex, 16).ok()
    } else if let Some(bin) = s.strip_prefix("0b") {
        u8::from_str_radix(bin, 2).ok()
    } else {
        s.parse().ok()
    }
}
