//! Case-insensitive literal comparison.
//!
//! Two comparators share one definition of "equal": ASCII letters fold `A-Z` ↔ `a-z`, every
//! other byte (digits, punctuation, and the bytes of non-ASCII UTF-8 sequences) must match
//! exactly. [`scalar_eq`] is the reference; [`AsciiLiteral`] is the SWAR fast path used by
//! single-entry tables and trie leaves. They must agree for every input.

/// High bit of every byte lane.
const HIGH_BITS_64: u64 = 0x8080_8080_8080_8080;
/// `0x80 - 'A'` in every lane: lanes `>= 'A'` carry into the high bit.
const LOWER_BOUND_64: u64 = 0x3F3F_3F3F_3F3F_3F3F;
/// `0x80 - ('Z' + 1)` in every lane: lanes `> 'Z'` carry into the high bit.
const UPPER_BOUND_64: u64 = 0x2525_2525_2525_2525;

const HIGH_BITS_32: u32 = 0x8080_8080;
const LOWER_BOUND_32: u32 = 0x3F3F_3F3F;
const UPPER_BOUND_32: u32 = 0x2525_2525;

/// Minimum literal length before the chunked comparator is worth it.
pub const MIN_VECTORIZED_LEN: usize = 4;

/// Reference comparison: ASCII case-insensitive, byte-exact otherwise.
#[inline]
#[must_use]
pub fn scalar_eq(segment: &[u8], literal: &[u8]) -> bool {
    segment.len() == literal.len() && segment.eq_ignore_ascii_case(literal)
}

/// Lowercase the `A-Z` lanes of a word whose lanes are all ASCII.
///
/// For a lane `c <= 0x7F` neither addition can carry out of the lane, so the high bit of
/// `lower ^ upper` is set exactly when `'A' <= c <= 'Z'`. Shifting that bit down to bit 5
/// and xoring it in flips those lanes to lowercase and leaves every other lane untouched.
#[inline]
#[must_use]
pub const fn fold_u64(value: u64) -> u64 {
    let lower = value.wrapping_add(LOWER_BOUND_64);
    let upper = value.wrapping_add(UPPER_BOUND_64);
    let mask = (lower ^ upper) & HIGH_BITS_64;
    value ^ (mask >> 2)
}

/// Four-lane variant of [`fold_u64`].
#[inline]
#[must_use]
pub const fn fold_u32(value: u32) -> u32 {
    let lower = value.wrapping_add(LOWER_BOUND_32);
    let upper = value.wrapping_add(UPPER_BOUND_32);
    let mask = (lower ^ upper) & HIGH_BITS_32;
    value ^ (mask >> 2)
}

#[inline]
fn load_u64(chunk: &[u8]) -> u64 {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(chunk);
    u64::from_le_bytes(buf)
}

#[inline]
fn load_u32(chunk: &[u8]) -> u32 {
    let mut buf = [0u8; 4];
    buf.copy_from_slice(chunk);
    u32::from_le_bytes(buf)
}

/// A pure-ASCII literal precomputed for chunked comparison.
///
/// The literal is split into lowercased 8-byte words, at most one lowercased 4-byte word,
/// and up to three residual bytes stored as `(lower, upper)` pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsciiLiteral {
    len: usize,
    words: Box<[u64]>,
    half: Option<u32>,
    residual: Box<[(u8, u8)]>,
}

impl AsciiLiteral {
    /// Precompute `literal`, or `None` if it contains non-ASCII bytes.
    #[must_use]
    pub fn new(literal: &[u8]) -> Option<Self> {
        if !literal.is_ascii() {
            return None;
        }

        let lowered = literal.to_ascii_lowercase();
        let mut words_iter = lowered.chunks_exact(8);
        let words: Box<[u64]> = words_iter.by_ref().map(load_u64).collect();

        let tail = words_iter.remainder();
        let (half, residual) = if tail.len() >= 4 {
            (Some(load_u32(&tail[..4])), &tail[4..])
        } else {
            (None, tail)
        };

        let residual = residual
            .iter()
            .map(|b| (b.to_ascii_lowercase(), b.to_ascii_uppercase()))
            .collect();

        Some(Self {
            len: literal.len(),
            words,
            half,
            residual,
        })
    }

    /// Literal length in bytes.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the literal is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Compare `segment` against the literal, eight bytes at a time.
    #[must_use]
    pub fn matches(&self, segment: &[u8]) -> bool {
        if segment.len() != self.len {
            return false;
        }

        let mut chunks = segment.chunks_exact(8);
        for (chunk, expected) in chunks.by_ref().zip(self.words.iter()) {
            let value = load_u64(chunk);
            if value & HIGH_BITS_64 != 0 || fold_u64(value) != *expected {
                return false;
            }
        }

        let mut tail = chunks.remainder();
        if let Some(expected) = self.half {
            let value = load_u32(&tail[..4]);
            if value & HIGH_BITS_32 != 0 || fold_u32(value) != expected {
                return false;
            }
            tail = &tail[4..];
        }

        tail.iter()
            .zip(self.residual.iter())
            .all(|(&b, &(lower, upper))| b == lower || b == upper)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_only_touches_uppercase_letters() {
        for b in 0u8..=0x7F {
            let word = u64::from_le_bytes([b; 8]);
            let folded = fold_u64(word).to_le_bytes();
            assert!(folded.iter().all(|&f| f == b.to_ascii_lowercase()), "byte {b:#x}");

            let word = u32::from_le_bytes([b; 4]);
            let folded = fold_u32(word).to_le_bytes();
            assert!(folded.iter().all(|&f| f == b.to_ascii_lowercase()), "byte {b:#x}");
        }
    }

    #[test]
    fn test_fold_mixed_lanes() {
        let word = load_u64(b"He-Lo_9Z");
        assert_eq!(fold_u64(word).to_le_bytes(), *b"he-lo_9z");
    }

    #[test]
    fn test_hello_world_matches_any_case() {
        let lit = AsciiLiteral::new(b"hello-world").expect("ascii literal");
        assert!(lit.matches(b"HELLO-WORLD"));
        assert!(lit.matches(b"hello-world"));
        assert!(lit.matches(b"HeLlO-wOrLd"));
        assert!(!lit.matches(b"hello_world"));
        assert!(!lit.matches(b"hillo-goodbye"));
    }

    #[test]
    fn test_non_letters_are_not_folded() {
        // '@' (0x40) and '`' (0x60) sit next to the letter ranges; '[' and '{' likewise.
        let lit = AsciiLiteral::new(b"a@[`{z").expect("ascii literal");
        assert!(lit.matches(b"A@[`{Z"));
        assert!(!lit.matches(b"A`{@[Z"));
        assert!(!scalar_eq(b"A`{@[Z", b"a@[`{z"));
    }

    #[test]
    fn test_non_ascii_rejected_by_both_paths() {
        let lit = AsciiLiteral::new(b"cafe").expect("ascii literal");
        let probe = "caf\u{e9}".as_bytes();
        assert!(!lit.matches(probe));
        assert!(!scalar_eq(probe, b"cafe"));
        assert!(AsciiLiteral::new("caf\u{e9}".as_bytes()).is_none());
    }

    #[test]
    fn test_every_length_and_case_agrees_with_scalar() {
        let alphabet = b"aZ0-";
        for len in 0..=20usize {
            let literal: Vec<u8> = (0..len).map(|i| alphabet[i % alphabet.len()]).collect();
            let lit = AsciiLiteral::new(&literal).expect("ascii literal");
            let upper = literal.to_ascii_uppercase();
            let lower = literal.to_ascii_lowercase();
            for probe in [&literal, &upper, &lower] {
                assert_eq!(lit.matches(probe), scalar_eq(probe, &literal), "len {len}");
                assert!(lit.matches(probe));
            }
            for i in 0..len {
                let mut flipped = literal.clone();
                flipped[i] ^= 0x01;
                assert_eq!(lit.matches(&flipped), scalar_eq(&flipped, &literal));
            }
        }
    }
}
