//! In-memory BIN lookup.
//!
//! Provides an offline BIN source using a vector of BIN ranges sorted by
//! start. Ranges may nest; the narrowest covering range wins. Tables can be
//! built in code or loaded from JSON keyed by BIN, each value shaped like the
//! HTTP service payload:
//!
//! ```json
//! {
//!   "457173": { "scheme": "visa", "type": "debit", "bank": { "name": "Jyske Bank" } },
//!   "411111-411199": { "scheme": "visa" }
//! }
//! ```

use std::collections::BTreeMap;

use async_trait::async_trait;

use super::{check_bin, BinLookup, BinLookupResponse, EnrichmentResult};
use crate::error::EnrichmentError;

/// An inclusive range of six-digit BINs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct BinRange {
    /// Start of the range (inclusive).
    pub start: u32,
    /// End of the range (inclusive).
    pub end: u32,
}

impl BinRange {
    /// Creates a new BIN range.
    pub fn new(start: u32, end: u32) -> Self {
        Self {
            start: start.min(end),
            end: start.max(end),
        }
    }

    /// Creates a range for a single BIN.
    pub fn single(bin: u32) -> Self {
        Self { start: bin, end: bin }
    }

    /// Number of BINs after `start` covered by the range.
    #[inline]
    pub fn width(&self) -> u32 {
        self.end - self.start
    }

    /// Checks if a BIN falls within this range.
    #[inline]
    pub fn contains(&self, bin: u32) -> bool {
        bin >= self.start && bin <= self.end
    }

    /// Parses a six-digit BIN string.
    pub fn parse_bin(bin: &str) -> Option<u32> {
        check_bin(bin).ok()?;
        bin.parse().ok()
    }

    /// Parses `"411111"` or `"411111-411199"`.
    pub fn parse(key: &str) -> Option<Self> {
        match key.split_once('-') {
            Some((start, end)) => Some(Self::new(
                Self::parse_bin(start.trim())?,
                Self::parse_bin(end.trim())?,
            )),
            None => Self::parse_bin(key.trim()).map(Self::single),
        }
    }
}

/// In-memory BIN lookup over ranges sorted by start.
///
/// Overlapping ranges are kept as given. When several ranges cover a BIN the
/// narrowest one wins. Equally wide ranges resolve to the later start, and
/// identical ranges to the one added last.
///
/// # Example
///
/// ```
/// use card_validator::enrich::{EnrichmentResult, MemoryBinLookup};
///
/// let lookup = MemoryBinLookup::builder()
///     .add("457173", EnrichmentResult { scheme: "visa".into(), ..Default::default() })
///     .build();
///
/// assert!(lookup.get("457173").is_some());
/// assert!(lookup.get("411111").is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryBinLookup {
    /// Entries sorted by range start.
    entries: Vec<(BinRange, EnrichmentResult)>,
}

impl MemoryBinLookup {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a builder.
    pub fn builder() -> MemoryBinLookupBuilder {
        MemoryBinLookupBuilder::new()
    }

    /// Loads a table from a JSON object keyed by BIN or BIN range.
    ///
    /// Keys that are not a BIN or `start-end` range are skipped with a
    /// warning. Keys are added in sorted order.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let map: BTreeMap<String, BinLookupResponse> = serde_json::from_str(json)?;

        let mut builder = MemoryBinLookupBuilder::new();
        for (key, payload) in map {
            match BinRange::parse(&key) {
                Some(range) => builder = builder.add_range(range, payload.into()),
                None => tracing::warn!(key = %key, "skipping malformed BIN key"),
            }
        }
        Ok(builder.build())
    }

    /// Returns the entry covering `bin`, if any.
    pub fn get(&self, bin: &str) -> Option<&EnrichmentResult> {
        let bin = BinRange::parse_bin(bin)?;
        let candidates = self.entries.partition_point(|(range, _)| range.start <= bin);
        self.entries[..candidates]
            .iter()
            .rev()
            .filter(|(range, _)| range.contains(bin))
            .min_by_key(|(range, _)| range.width())
            .map(|(_, info)| info)
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl BinLookup for MemoryBinLookup {
    async fn lookup(&self, bin: &str) -> Result<EnrichmentResult, EnrichmentError> {
        check_bin(bin)?;
        self.get(bin)
            .cloned()
            .ok_or_else(|| EnrichmentError::NotFound(bin.to_string()))
    }
}

/// Builder for creating [`MemoryBinLookup`] instances.
#[derive(Debug, Default)]
pub struct MemoryBinLookupBuilder {
    entries: Vec<(BinRange, EnrichmentResult)>,
}

impl MemoryBinLookupBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a single BIN. Malformed BINs are ignored.
    pub fn add(self, bin: &str, info: EnrichmentResult) -> Self {
        match BinRange::parse_bin(bin) {
            Some(bin) => self.add_range(BinRange::single(bin), info),
            None => self,
        }
    }

    /// Adds a BIN range.
    pub fn add_range(mut self, range: BinRange, info: EnrichmentResult) -> Self {
        self.entries.push((range, info));
        self
    }

    /// Sorts the entries by range start and builds the table.
    ///
    /// The sort is stable, so insertion order breaks ties.
    pub fn build(mut self) -> MemoryBinLookup {
        self.entries.sort_by_key(|(range, _)| range.start);
        MemoryBinLookup {
            entries: self.entries,
        }
    }
}
