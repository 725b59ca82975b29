use proptest::prelude::*;
use routedfa::matching::ascii::{scalar_eq, AsciiLiteral};
use routedfa::matching::jump_table::{DictionaryJumpTable, LinearSearchJumpTable, SingleEntryJumpTable};
use routedfa::matching::trie::CompiledTrieJumpTable;
use routedfa::matching::{JumpTable, MatcherOptions, PathSegment, Vectorize, NO_MATCH};

const DEFAULT: usize = 1000;
const EXIT: usize = 2000;

/// Literal tables keyed case-insensitively, destinations 0..n.
fn literal_entries() -> impl Strategy<Value = Vec<(String, usize)>> {
    prop::collection::vec("[a-zA-Z0-9_.-]{1,20}", 1..48).prop_map(|texts| {
        let mut seen = std::collections::HashSet::new();
        texts
            .into_iter()
            .filter(|t| seen.insert(t.to_ascii_lowercase()))
            .enumerate()
            .map(|(i, t)| (t, i))
            .collect()
    })
}

/// What every variant must answer for `segment`.
fn expected(entries: &[(String, usize)], segment: &str) -> usize {
    if segment.is_empty() {
        return EXIT;
    }
    entries
        .iter()
        .find(|(text, _)| text.eq_ignore_ascii_case(segment))
        .map_or(DEFAULT, |(_, dest)| *dest)
}

fn toggle_case(text: &str, mask: u64) -> String {
    text.chars()
        .enumerate()
        .map(|(i, c)| {
            if mask >> (i % 64) & 1 == 1 {
                c.to_ascii_uppercase()
            } else {
                c.to_ascii_lowercase()
            }
        })
        .collect()
}

/// Lookup `segment` with every variant, wrapped as `/{segment}` so offsets are non-zero.
fn all_variants(entries: &[(String, usize)], segment: &str) -> Vec<(&'static str, usize)> {
    let path = format!("/{segment}");
    let seg = PathSegment::new(1, segment.len() as u32);
    let mut results = vec![
        (
            "linear",
            LinearSearchJumpTable::new(DEFAULT, EXIT, entries).destination(&path, seg),
        ),
        (
            "dictionary",
            DictionaryJumpTable::new(DEFAULT, EXIT, entries).destination(&path, seg),
        ),
        (
            "trie-scalar",
            CompiledTrieJumpTable::new(DEFAULT, EXIT, entries, Vectorize::Never).destination(&path, seg),
        ),
        (
            "trie-vectorized",
            CompiledTrieJumpTable::new(DEFAULT, EXIT, entries, Vectorize::Always).destination(&path, seg),
        ),
        (
            "cost-model",
            JumpTable::build(DEFAULT, EXIT, entries, &MatcherOptions::default()).destination(&path, seg),
        ),
    ];
    if let [(text, dest)] = entries {
        results.push((
            "single",
            SingleEntryJumpTable::new(DEFAULT, EXIT, text, *dest).destination(&path, seg),
        ));
        results.push((
            "single-vectorized",
            SingleEntryJumpTable::vectorized(DEFAULT, EXIT, text, *dest).destination(&path, seg),
        ));
    }
    results
}

proptest! {
    #[test]
    fn prop_variants_agree_on_registered_literals(entries in literal_entries(), mask in any::<u64>()) {
        for (text, _) in &entries {
            let probe = toggle_case(text, mask);
            let want = expected(&entries, &probe);
            for (variant, got) in all_variants(&entries, &probe) {
                prop_assert_eq!(got, want, "{} on {:?}", variant, probe);
            }
        }
    }

    #[test]
    fn prop_variants_agree_on_arbitrary_segments(
        entries in literal_entries(),
        probe in "[a-zA-Z0-9_.-]{0,24}",
    ) {
        let want = expected(&entries, &probe);
        for (variant, got) in all_variants(&entries, &probe) {
            prop_assert_eq!(got, want, "{} on {:?}", variant, probe);
        }
    }

    #[test]
    fn prop_single_entry_variants_agree(text in "[a-zA-Z0-9-]{1,40}", probe in "[a-zA-Z0-9-]{0,40}") {
        let entries = vec![(text.clone(), 7)];
        let want = expected(&entries, &probe);
        for (variant, got) in all_variants(&entries, &probe) {
            prop_assert_eq!(got, want, "{} on {:?}", variant, probe);
        }
        let upper = text.to_ascii_uppercase();
        for (variant, got) in all_variants(&entries, &upper) {
            prop_assert_eq!(got, 7, "{} on {:?}", variant, upper);
        }
    }

    #[test]
    fn prop_chunked_comparator_matches_scalar(literal in "[ -~]{0,40}", segment in prop::collection::vec(any::<u8>(), 0..40)) {
        let ascii = AsciiLiteral::new(literal.as_bytes()).unwrap();
        prop_assert_eq!(ascii.matches(&segment), scalar_eq(&segment, literal.as_bytes()));
        prop_assert!(ascii.matches(literal.to_ascii_uppercase().as_bytes()));
        prop_assert!(ascii.matches(literal.to_ascii_lowercase().as_bytes()));
    }
}

#[test]
fn test_non_ascii_bytes_compare_exactly() {
    let entries = vec![
        ("café".to_string(), 0),
        ("naïve".to_string(), 1),
        ("straße".to_string(), 2),
        ("plain".to_string(), 3),
        ("Ünïcode".to_string(), 4),
    ];
    for (probe, want) in [
        ("CAFé", 0),
        ("café", 0),
        ("CAFÉ", DEFAULT),
        ("NAïVE", 1),
        ("NAÏVE", DEFAULT),
        ("STRAßE", 2),
        ("ünïcode", DEFAULT),
        ("ÜNïCODE", 4),
        ("PLAIN", 3),
    ] {
        for (variant, got) in all_variants(&entries, probe) {
            assert_eq!(got, want, "{variant} on {probe:?}");
        }
    }
}

#[test]
fn test_zero_length_segment_goes_to_exit() {
    let entries = vec![("".to_string(), 0), ("a".to_string(), 1), ("b".to_string(), 2)];
    for (variant, got) in all_variants(&entries, "") {
        assert_eq!(got, EXIT, "{variant}");
    }
}

#[test]
fn test_no_match_sentinel_passes_through() {
    let entries = vec![("only".to_string(), 3)];
    let table = JumpTable::build(NO_MATCH, NO_MATCH, &entries, &MatcherOptions::default());
    let path = "/other/";
    assert_eq!(table.destination(path, PathSegment::new(1, 5)), NO_MATCH);
    assert_eq!(table.destination(path, PathSegment::new(7, 0)), NO_MATCH);
    assert_eq!(table.destination("/ONLY", PathSegment::new(1, 4)), 3);
}
