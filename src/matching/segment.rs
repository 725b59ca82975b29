//! Path segments and the fast-path tokenizer.
//!
//! A [`PathSegment`] is an `(offset, length)` view into a request path that the caller owns
//! for the duration of one match. The tokenizer writes segments into a caller-provided
//! buffer and never allocates: callers size the buffer with
//! `DfaMatcher::segment_buffer_len` so any path deeper than every registered route is
//! detected as a no-match instead of growing the buffer.

/// One `/`-delimited component of a request path.
///
/// Offsets are byte offsets into the path string. A zero-length segment denotes an empty
/// component (`//`, or a trailing `/`) and is never compared as text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PathSegment {
    /// Byte offset of the first byte of the segment
    pub start: u32,
    /// Length of the segment in bytes
    pub length: u32,
}

impl PathSegment {
    /// Create a segment covering `path[start..start + length]`.
    #[inline]
    #[must_use]
    pub const fn new(start: u32, length: u32) -> Self {
        Self { start, length }
    }

    /// Whether this segment is an empty path component.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// The segment bytes within `path`.
    ///
    /// Returns an empty slice if the segment does not lie inside `path`, which can only
    /// happen when a segment is paired with the wrong path.
    #[inline]
    #[must_use]
    pub fn bytes<'p>(&self, path: &'p str) -> &'p [u8] {
        let start = self.start as usize;
        let end = start + self.length as usize;
        path.as_bytes().get(start..end).unwrap_or_default()
    }

    /// The segment text within `path`.
    #[inline]
    #[must_use]
    pub fn text<'p>(&self, path: &'p str) -> &'p str {
        let start = self.start as usize;
        let end = start + self.length as usize;
        path.get(start..end).unwrap_or_default()
    }

    /// The remainder of `path` starting at this segment (used for catch-all values).
    #[inline]
    #[must_use]
    pub fn rest<'p>(&self, path: &'p str) -> &'p str {
        path.get(self.start as usize..).unwrap_or_default()
    }
}

/// Split `path` into `/`-delimited segments, writing at most `segments.len()` entries.
///
/// - a leading `/` is skipped, so `/` and `""` yield zero segments
/// - adjacent `/` characters and a trailing `/` produce zero-length segments
/// - tokenization stops once the buffer is full; the tail is left unconsumed
///
/// Returns the number of segments written.
pub fn tokenize(path: &str, segments: &mut [PathSegment]) -> usize {
    let bytes = path.as_bytes();
    if bytes.is_empty() || segments.is_empty() || bytes.len() > u32::MAX as usize {
        return 0;
    }

    let mut start = usize::from(bytes[0] == b'/');
    if start == bytes.len() {
        return 0;
    }

    let mut count = 0;
    while count < segments.len() {
        match bytes[start..].iter().position(|&b| b == b'/') {
            Some(len) => {
                segments[count] = PathSegment::new(start as u32, len as u32);
                count += 1;
                start += len + 1;
            }
            None => {
                segments[count] = PathSegment::new(start as u32, (bytes.len() - start) as u32);
                count += 1;
                break;
            }
        }
    }
    count
}
