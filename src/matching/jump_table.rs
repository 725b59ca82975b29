//! Per-state dispatch: map one path segment to the next automaton state.
//!
//! Every variant answers the same question, "given this segment, where next?", and every
//! variant must give the same answer for the same literal set:
//!
//! - a zero-length segment always yields the exit destination
//! - a segment equal (ASCII case-insensitively) to a registered literal yields its destination
//! - anything else yields the default destination
//!
//! The builder picks a variant per state with [`JumpTable::build`]; see
//! [`MatcherOptions`] for the cost model.

use smallvec::SmallVec;
use std::collections::HashMap;
use std::fmt;
use std::hash::{BuildHasherDefault, Hasher};

use super::ascii::{scalar_eq, AsciiLiteral};
use super::options::MatcherOptions;
use super::segment::PathSegment;
use super::trie::CompiledTrieJumpTable;

/// Destination returned when no state accepts the segment.
pub const NO_MATCH: usize = usize::MAX;

/// Which variant a table is, for logging and dumps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum JumpTableKind {
    ZeroEntry,
    SingleEntry,
    LinearSearch,
    Dictionary,
    CompiledTrie,
}

impl fmt::Display for JumpTableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            JumpTableKind::ZeroEntry => "zero-entry",
            JumpTableKind::SingleEntry => "single-entry",
            JumpTableKind::LinearSearch => "linear-search",
            JumpTableKind::Dictionary => "dictionary",
            JumpTableKind::CompiledTrie => "compiled-trie",
        };
        f.write_str(s)
    }
}

/// A state with no literal edges: only the default and exit destinations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZeroEntryJumpTable {
    default_destination: usize,
    exit_destination: usize,
}

impl ZeroEntryJumpTable {
    #[must_use]
    pub fn new(default_destination: usize, exit_destination: usize) -> Self {
        Self {
            default_destination,
            exit_destination,
        }
    }

    #[inline]
    #[must_use]
    pub fn destination(&self, _path: &str, segment: PathSegment) -> usize {
        if segment.is_empty() {
            self.exit_destination
        } else {
            self.default_destination
        }
    }
}

/// One literal edge, optionally compared with the chunked ASCII comparator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SingleEntryJumpTable {
    default_destination: usize,
    exit_destination: usize,
    text: Box<str>,
    destination: usize,
    ascii: Option<AsciiLiteral>,
}

impl SingleEntryJumpTable {
    /// Scalar single-entry table.
    #[must_use]
    pub fn new(default_destination: usize, exit_destination: usize, text: &str, destination: usize) -> Self {
        Self {
            default_destination,
            exit_destination,
            text: text.into(),
            destination,
            ascii: None,
        }
    }

    /// Single-entry table using the chunked comparator when `text` is ASCII.
    #[must_use]
    pub fn vectorized(
        default_destination: usize,
        exit_destination: usize,
        text: &str,
        destination: usize,
    ) -> Self {
        Self {
            ascii: AsciiLiteral::new(text.as_bytes()),
            ..Self::new(default_destination, exit_destination, text, destination)
        }
    }

    /// Whether lookups take the chunked path.
    #[must_use]
    pub fn is_vectorized(&self) -> bool {
        self.ascii.is_some()
    }

    #[inline]
    #[must_use]
    pub fn destination(&self, path: &str, segment: PathSegment) -> usize {
        if segment.is_empty() {
            return self.exit_destination;
        }
        if segment.length as usize != self.text.len() {
            return self.default_destination;
        }

        let bytes = segment.bytes(path);
        let hit = match &self.ascii {
            Some(lit) => lit.matches(bytes),
            None => scalar_eq(bytes, self.text.as_bytes()),
        };
        if hit {
            self.destination
        } else {
            self.default_destination
        }
    }
}

/// A handful of literal edges scanned in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinearSearchJumpTable {
    default_destination: usize,
    exit_destination: usize,
    entries: Box<[(Box<str>, usize)]>,
}

impl LinearSearchJumpTable {
    #[must_use]
    pub fn new(default_destination: usize, exit_destination: usize, entries: &[(String, usize)]) -> Self {
        Self {
            default_destination,
            exit_destination,
            entries: entries
                .iter()
                .map(|(text, dest)| (text.as_str().into(), *dest))
                .collect(),
        }
    }

    #[inline]
    #[must_use]
    pub fn destination(&self, path: &str, segment: PathSegment) -> usize {
        if segment.is_empty() {
            return self.exit_destination;
        }

        let bytes = segment.bytes(path);
        self.entries
            .iter()
            .find(|(text, _)| scalar_eq(bytes, text.as_bytes()))
            .map_or(self.default_destination, |(_, dest)| *dest)
    }
}

/// FNV-1a over ASCII-folded bytes.
///
/// Computed straight from the segment slice so a lookup never materialises a key.
#[inline]
fn folded_hash(bytes: &[u8]) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;
    bytes.iter().fold(OFFSET, |hash, b| {
        (hash ^ u64::from(b.to_ascii_lowercase())).wrapping_mul(PRIME)
    })
}

/// Passes an already computed [`folded_hash`] through unchanged.
#[derive(Debug, Default, Clone, Copy)]
struct PrehashedHasher(u64);

impl Hasher for PrehashedHasher {
    #[inline]
    fn finish(&self) -> u64 {
        self.0
    }

    #[inline]
    fn write_u64(&mut self, hash: u64) {
        self.0 = hash;
    }

    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.0 = (self.0 << 8) | u64::from(b);
        }
    }
}

type Prehashed = BuildHasherDefault<PrehashedHasher>;

type Buckets = HashMap<u64, SmallVec<[(Box<str>, usize); 1]>, Prehashed>;

/// Hashed literal edges for states with many siblings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryJumpTable {
    default_destination: usize,
    exit_destination: usize,
    buckets: Buckets,
}

impl DictionaryJumpTable {
    #[must_use]
    pub fn new(default_destination: usize, exit_destination: usize, entries: &[(String, usize)]) -> Self {
        let mut buckets = Buckets::with_capacity_and_hasher(entries.len(), Prehashed::default());
        for (text, dest) in entries {
            buckets
                .entry(folded_hash(text.as_bytes()))
                .or_default()
                .push((text.as_str().into(), *dest));
        }
        Self {
            default_destination,
            exit_destination,
            buckets,
        }
    }

    #[inline]
    #[must_use]
    pub fn destination(&self, path: &str, segment: PathSegment) -> usize {
        if segment.is_empty() {
            return self.exit_destination;
        }

        let bytes = segment.bytes(path);
        self.buckets
            .get(&folded_hash(bytes))
            .and_then(|bucket| {
                bucket
                    .iter()
                    .find(|(text, _)| scalar_eq(bytes, text.as_bytes()))
            })
            .map_or(self.default_destination, |(_, dest)| *dest)
    }
}

/// Segment dispatch for one automaton state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JumpTable {
    ZeroEntry(ZeroEntryJumpTable),
    SingleEntry(SingleEntryJumpTable),
    LinearSearch(LinearSearchJumpTable),
    Dictionary(DictionaryJumpTable),
    CompiledTrie(CompiledTrieJumpTable),
}

impl JumpTable {
    /// Pick a variant for `entries` using the cost model in `options`.
    ///
    /// `entries` must hold case-insensitively distinct literals.
    #[must_use]
    pub fn build(
        default_destination: usize,
        exit_destination: usize,
        entries: &[(String, usize)],
        options: &MatcherOptions,
    ) -> Self {
        match entries {
            [] => JumpTable::ZeroEntry(ZeroEntryJumpTable::new(default_destination, exit_destination)),
            [(text, dest)] => {
                if options.vectorize.applies_to(text.len()) {
                    JumpTable::SingleEntry(SingleEntryJumpTable::vectorized(
                        default_destination,
                        exit_destination,
                        text,
                        *dest,
                    ))
                } else {
                    JumpTable::SingleEntry(SingleEntryJumpTable::new(
                        default_destination,
                        exit_destination,
                        text,
                        *dest,
                    ))
                }
            }
            _ if entries.len() <= options.linear_search_max => JumpTable::LinearSearch(
                LinearSearchJumpTable::new(default_destination, exit_destination, entries),
            ),
            _ if options.trie_threshold.is_some_and(|min| entries.len() >= min) => {
                JumpTable::CompiledTrie(CompiledTrieJumpTable::new(
                    default_destination,
                    exit_destination,
                    entries,
                    options.vectorize,
                ))
            }
            _ => JumpTable::Dictionary(DictionaryJumpTable::new(
                default_destination,
                exit_destination,
                entries,
            )),
        }
    }

    /// Next state for `segment` of `path`.
    #[inline]
    #[must_use]
    pub fn destination(&self, path: &str, segment: PathSegment) -> usize {
        match self {
            JumpTable::ZeroEntry(t) => t.destination(path, segment),
            JumpTable::SingleEntry(t) => t.destination(path, segment),
            JumpTable::LinearSearch(t) => t.destination(path, segment),
            JumpTable::Dictionary(t) => t.destination(path, segment),
            JumpTable::CompiledTrie(t) => t.destination(path, segment),
        }
    }

    #[must_use]
    pub fn kind(&self) -> JumpTableKind {
        match self {
            JumpTable::ZeroEntry(_) => JumpTableKind::ZeroEntry,
            JumpTable::SingleEntry(_) => JumpTableKind::SingleEntry,
            JumpTable::LinearSearch(_) => JumpTableKind::LinearSearch,
            JumpTable::Dictionary(_) => JumpTableKind::Dictionary,
            JumpTable::CompiledTrie(_) => JumpTableKind::CompiledTrie,
        }
    }

    #[must_use]
    pub fn default_destination(&self) -> usize {
        match self {
            JumpTable::ZeroEntry(t) => t.default_destination,
            JumpTable::SingleEntry(t) => t.default_destination,
            JumpTable::LinearSearch(t) => t.default_destination,
            JumpTable::Dictionary(t) => t.default_destination,
            JumpTable::CompiledTrie(t) => t.default_destination(),
        }
    }

    #[must_use]
    pub fn exit_destination(&self) -> usize {
        match self {
            JumpTable::ZeroEntry(t) => t.exit_destination,
            JumpTable::SingleEntry(t) => t.exit_destination,
            JumpTable::LinearSearch(t) => t.exit_destination,
            JumpTable::Dictionary(t) => t.exit_destination,
            JumpTable::CompiledTrie(t) => t.exit_destination(),
        }
    }
}

pub(crate) struct DisplayDestination(pub usize);

impl fmt::Display for DisplayDestination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == NO_MATCH {
            f.write_str("none")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl fmt::Display for JumpTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} default={} exit={}",
            self.kind(),
            DisplayDestination(self.default_destination()),
            DisplayDestination(self.exit_destination())
        )?;
        match self {
            JumpTable::ZeroEntry(_) => Ok(()),
            JumpTable::SingleEntry(t) => {
                write!(f, " [{} -> {}]", t.text, DisplayDestination(t.destination))
            }
            JumpTable::LinearSearch(t) => write!(f, " ({} literals)", t.entries.len()),
            JumpTable::Dictionary(t) => {
                write!(f, " ({} literals)", t.buckets.values().map(|b| b.len()).sum::<usize>())
            }
            JumpTable::CompiledTrie(t) => write!(f, " ({} literals)", t.len()),
        }
    }
}
