//! Occurrence definitions
//!
//! Represents match records decoded from a response stream.

use super::ByteOrder;

/// Bytes per needle character on the wire (one UTF-32 code unit)
pub const CHARACTER_SIZE: usize = 4;

/// One matched record
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Occurrence {
    /// User data payload, empty when the record's data size is zero
    pub data_value: Vec<u8>,

    /// Matched needle, present only when the search mode asked for it
    pub needle: Option<MatchedNeedle>,
}

impl Occurrence {
    /// Data size as sent on the wire
    pub fn data_size(&self) -> usize {
        self.data_value.len()
    }
}

/// Needle text of an occurrence, as fixed-width wide characters
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MatchedNeedle {
    /// Raw character bytes, `CHARACTER_SIZE` per character
    pub bytes: Vec<u8>,
}

impl MatchedNeedle {
    /// Number of characters (the wire's needle length)
    pub fn len(&self) -> usize {
        self.bytes.len() / CHARACTER_SIZE
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Decode the characters as UTF-32 in `order`
    ///
    /// Values that are not Unicode scalar values become U+FFFD.
    pub fn to_string_lossy(&self, order: ByteOrder) -> String {
        self.bytes
            .chunks_exact(CHARACTER_SIZE)
            .map(|unit| {
                let code = order.u32_from([unit[0], unit[1], unit[2], unit[3]]);
                char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER)
            })
            .collect()
    }
}

/// Ordered occurrences of one search, in the order the server sent them
///
/// Empty means the needle matched nothing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Occurrences {
    items: Vec<Occurrence>,
}

impl Occurrences {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, occurrence: Occurrence) {
        self.items.push(occurrence);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn first(&self) -> Option<&Occurrence> {
        self.items.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Occurrence> {
        self.items.iter()
    }

    pub fn into_vec(self) -> Vec<Occurrence> {
        self.items
    }
}

impl IntoIterator for Occurrences {
    type Item = Occurrence;
    type IntoIter = std::vec::IntoIter<Occurrence>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a Occurrences {
    type Item = &'a Occurrence;
    type IntoIter = std::slice::Iter<'a, Occurrence>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl From<Vec<Occurrence>> for Occurrences {
    fn from(items: Vec<Occurrence>) -> Self {
        Self { items }
    }
}
