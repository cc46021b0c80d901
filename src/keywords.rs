use std::collections::HashMap;

use crate::items::ItemMap;
use crate::unique::{PreviousOccurrenceTable, UniqueItemsIter};
use crate::{HalfOpenInterval, Index};

const KEYWORD_DELIMITER: u16 = 0x0020;

/// How the per-keyword results of a multi-keyword query are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStrategy {
    /// Only items containing every keyword.
    All,
    /// Items containing any keyword, ranked by the number of matching
    /// keywords.
    AtLeastOne,
}

/// Splits a pattern on U+0020, discarding empty tokens. Other whitespace is
/// part of the keywords.
pub(crate) fn parse_keywords(pattern: &[u16]) -> Vec<&[u16]> {
    pattern
        .split(|&unit| unit == KEYWORD_DELIMITER)
        .filter(|keyword| !keyword.is_empty())
        .collect()
}

/// Combines per-keyword slot ranges into an ordered item id list.
///
/// Items are ranked by the number of keywords they contain (descending),
/// then by the index of the first keyword containing them (ascending), then
/// by item id. Under [`MatchStrategy::All`], the list is filtered to items
/// containing every keyword, preserving that order.
pub(crate) fn combine_keyword_ranges(
    suffix_array: &[Index],
    previous_occurrences: &PreviousOccurrenceTable,
    items: &ItemMap,
    ranges: &[HalfOpenInterval],
    matching: MatchStrategy,
) -> Vec<Index> {
    let mut keyword_counts: HashMap<Index, (usize, usize)> = HashMap::new();

    for (keyword_index, &range) in ranges.iter().enumerate() {
        let unique_suffixes = UniqueItemsIter::new(
            suffix_array,
            previous_occurrences.slots(),
            range,
            range.start,
        );

        for suffix in unique_suffixes {
            let (count, _) = keyword_counts
                .entry(items.item_of(suffix))
                .or_insert((0, keyword_index));
            *count += 1;
        }
    }

    let mut combined: Vec<(Index, (usize, usize))> = keyword_counts.into_iter().collect();

    combined.sort_unstable_by(
        |&(item_a, (count_a, first_a)), &(item_b, (count_b, first_b))| {
            count_b
                .cmp(&count_a)
                .then(first_a.cmp(&first_b))
                .then(item_a.cmp(&item_b))
        },
    );

    if matching == MatchStrategy::All {
        combined.retain(|&(_, (count, _))| count == ranges.len());
    }

    combined.into_iter().map(|(item, _)| item).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::{SEPARATOR, Utf16Text};

    #[test]
    fn keywords_split_on_spaces_only() {
        let pattern = [0x0041, 0x0020, 0x0020, 0x0042, 0x0043, 0x0020];
        let keywords = parse_keywords(&pattern);

        assert_eq!(keywords, [[0x0041].as_slice(), &[0x0042, 0x0043]]);

        assert!(parse_keywords(&[]).is_empty());
        assert!(parse_keywords(&[0x0020, 0x0020]).is_empty());

        // tabs and other whitespace are not delimiters
        let tabbed = [0x0041, 0x0009, 0x0042];
        assert_eq!(parse_keywords(&tabbed), [tabbed.as_slice()]);
    }

    // A · B B · C C C · D D · E ·
    const TEST_TEXT: [u16; 14] = [
        0x0041, SEPARATOR, 0x0042, 0x0042, SEPARATOR, 0x0043, 0x0043, 0x0043, SEPARATOR, 0x0044,
        0x0044, SEPARATOR, 0x0045, SEPARATOR,
    ];

    const TEST_SUFFIX_ARRAY: [Index; 14] = [13, 1, 4, 8, 11, 0, 3, 2, 7, 6, 5, 10, 9, 12];

    fn combined(ranges: &[HalfOpenInterval], matching: MatchStrategy) -> Vec<Index> {
        let items = ItemMap::new(Utf16Text::new(&TEST_TEXT));
        let previous_occurrences = PreviousOccurrenceTable::new(&TEST_SUFFIX_ARRAY, &items);

        combine_keyword_ranges(
            &TEST_SUFFIX_ARRAY,
            &previous_occurrences,
            &items,
            ranges,
            matching,
        )
    }

    #[test]
    fn disjoint_keywords_rank_by_first_containing_keyword() {
        // A and B never share an item
        let ranges = [
            HalfOpenInterval { start: 5, end: 6 },
            HalfOpenInterval { start: 6, end: 8 },
        ];

        assert_eq!(combined(&ranges, MatchStrategy::AtLeastOne), [0, 1]);
        assert!(combined(&ranges, MatchStrategy::All).is_empty());
    }

    #[test]
    fn shared_items_rank_before_single_keyword_items() {
        // separator range covers every item, C range only item 2
        let ranges = [
            HalfOpenInterval { start: 8, end: 11 },
            HalfOpenInterval { start: 0, end: 14 },
        ];

        let at_least_one = combined(&ranges, MatchStrategy::AtLeastOne);
        assert_eq!(at_least_one, [2, 0, 1, 3, 4]);

        assert_eq!(combined(&ranges, MatchStrategy::All), [2]);
    }
}
