use std::cmp::Ordering;

use crate::suffix_sort::{SortStrategy, sort_suffixes};
use crate::text::Utf16Text;
use crate::{HalfOpenInterval, Index};

/// The sorted order of all suffixes of the text, represented by their
/// starting positions.
pub(crate) struct SuffixArray {
    entries: Vec<Index>,
}

impl SuffixArray {
    pub(crate) fn new(text: Utf16Text, strategy: SortStrategy, cutoff: usize) -> Self {
        let mut entries: Vec<Index> = (0..text.len() as Index).collect();
        sort_suffixes(text, &mut entries, strategy, cutoff);

        Self { entries }
    }

    pub(crate) fn entries(&self) -> &[Index] {
        &self.entries
    }

    /// The half-open slot range of suffixes whose first `pattern.len()` code
    /// units equal `pattern`. An empty pattern matches every suffix.
    pub(crate) fn find(&self, text: Utf16Text, pattern: &[u16]) -> HalfOpenInterval {
        let start = self.entries.partition_point(|&suffix| {
            text.cmp_truncated_suffix(suffix as usize, pattern) == Ordering::Less
        });

        // the upper bound only needs to search past the lower one
        let end = start
            + self.entries[start..].partition_point(|&suffix| {
                text.cmp_truncated_suffix(suffix as usize, pattern) != Ordering::Greater
            });

        HalfOpenInterval { start, end }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::SEPARATOR;

    // A · B B · C C C · D D · E ·
    const TEST_TEXT: [u16; 14] = [
        0x0041, SEPARATOR, 0x0042, 0x0042, SEPARATOR, 0x0043, 0x0043, 0x0043, SEPARATOR, 0x0044,
        0x0044, SEPARATOR, 0x0045, SEPARATOR,
    ];

    const TEST_SUFFIX_ARRAY: [Index; 14] = [13, 1, 4, 8, 11, 0, 3, 2, 7, 6, 5, 10, 9, 12];

    fn test_suffix_array() -> (Utf16Text<'static>, SuffixArray) {
        let text = Utf16Text::new(&TEST_TEXT);
        let suffix_array = SuffixArray::new(text, SortStrategy::default(), 0);
        assert_eq!(suffix_array.entries(), TEST_SUFFIX_ARRAY);

        (text, suffix_array)
    }

    #[test]
    fn single_unit_pattern_bounds() {
        let (text, suffix_array) = test_suffix_array();

        let cases = [
            (0x0041, 5, 6),
            (0x0042, 6, 8),
            (0x0043, 8, 11),
            (0x0044, 11, 13),
            (0x0045, 13, 14),
        ];

        for (unit, start, end) in cases {
            let range = suffix_array.find(text, &[unit]);
            assert_eq!(range, HalfOpenInterval { start, end }, "unit {unit:#06x}");
        }
    }

    #[test]
    fn multi_unit_and_missing_patterns() {
        let (text, suffix_array) = test_suffix_array();

        let double_c = suffix_array.find(text, &[0x0043, 0x0043]);
        assert_eq!(double_c, HalfOpenInterval { start: 9, end: 11 });

        let triple_c = suffix_array.find(text, &[0x0043, 0x0043, 0x0043]);
        assert_eq!(triple_c, HalfOpenInterval { start: 10, end: 11 });

        let absent = suffix_array.find(text, &[0x0046]);
        assert!(absent.is_empty());
        assert_eq!(absent.start, 14);

        let absent_extension = suffix_array.find(text, &[0x0041, 0x0041]);
        assert!(absent_extension.is_empty());
    }

    #[test]
    fn empty_pattern_matches_all_suffixes() {
        let (text, suffix_array) = test_suffix_array();

        let range = suffix_array.find(text, &[]);
        assert_eq!(range, HalfOpenInterval { start: 0, end: 14 });
    }

    #[test]
    fn separator_patterns_match_item_ends() {
        let (text, suffix_array) = test_suffix_array();

        let range = suffix_array.find(text, &[SEPARATOR]);
        assert_eq!(range, HalfOpenInterval { start: 0, end: 5 });
    }
}
