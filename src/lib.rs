/*! This library contains an in-memory full-text index over collections of short items.
 *
 * The index is built for a single text buffer of 16-bit code units in which every
 * item is terminated by a zero code unit. It consists of a suffix array sorted by
 * a radix sort over the byte-wise UTF-16LE order (low byte of a code unit first,
 * then its high byte), a position-to-item map, and a previous-occurrence table
 * that allows enumerating the *distinct items* within a suffix array range in a
 * single pass.
 *
 * Three query primitives are supported: counting the occurrences of a pattern
 * ([`count`](ItemIndex::count)), enumerating the distinct items containing a
 * pattern with offset-based pagination ([`find_unique_items`](ItemIndex::find_unique_items)),
 * and combining several keywords conjunctively or disjunctively
 * ([`find_unique_multi`](ItemIndex::find_unique_multi)).
 *
 * ## Usage
 *
 * The following is a basic example of how to use this library:
 *
 * ```
 * use itemdex::{ItemIndexConfig, MatchStrategy, concatenate_items};
 *
 * let items: Vec<Vec<u16>> = ["wombat", "combat", "wombats"]
 *     .iter()
 *     .map(|item| item.encode_utf16().collect())
 *     .collect();
 *
 * let text = concatenate_items(&items);
 * let index = ItemIndexConfig::new().construct_index(&text);
 *
 * let pattern: Vec<u16> = "ombat".encode_utf16().collect();
 * assert_eq!(index.count(&pattern), 3);
 *
 * let mut output = [0; 8];
 * let result = index.find_unique_items(&pattern, &mut output, 0).unwrap();
 * assert_eq!(&output[..result.count], [0, 1, 2]);
 *
 * let query: Vec<u16> = "wom bat".encode_utf16().collect();
 * let result = index
 *     .find_unique_multi(&query, MatchStrategy::All, &mut output, 0)
 *     .unwrap();
 * assert_eq!(&output[..result.count], [0, 2]);
 * ```
 *
 * The index borrows the text buffer and never mutates its own state after
 * construction, so any number of threads may query the same index
 * concurrently. More information about the sort configuration and the
 * streaming [`UniqueItemsIter`] can be found in the struct-level
 * documentation.
 */

mod config;
mod items;
mod keywords;
mod suffix_array;
mod suffix_sort;
mod text;
mod unique;

#[doc(inline)]
pub use config::ItemIndexConfig;
#[doc(inline)]
pub use keywords::MatchStrategy;
#[doc(inline)]
pub use suffix_sort::SortStrategy;
#[doc(inline)]
pub use text::{SEPARATOR, concatenate_items};
#[doc(inline)]
pub use unique::UniqueItemsIter;

use items::ItemMap;
use suffix_array::SuffixArray;
use text::Utf16Text;
use unique::PreviousOccurrenceTable;

/// Index type used for text positions, suffix array entries and item ids.
/// `-1` encodes "none" where applicable.
pub type Index = i32;

/// The full-text item index.
///
/// See [crate-level documentation](self) for details.
pub struct ItemIndex<'t> {
    text: Utf16Text<'t>,
    suffix_array: SuffixArray,
    items: ItemMap,
    previous_occurrences: PreviousOccurrenceTable,
}

impl<'t> ItemIndex<'t> {
    fn new(text: &'t [u16], config: ItemIndexConfig) -> Self {
        let text = Utf16Text::new(text);

        let suffix_array =
            SuffixArray::new(text, config.sort_strategy, config.comparison_sort_cutoff);
        let items = ItemMap::new(text);
        let previous_occurrences = PreviousOccurrenceTable::new(suffix_array.entries(), &items);

        Self {
            text,
            suffix_array,
            items,
            previous_occurrences,
        }
    }

    /// Constructs the index over a raw UTF-16LE byte buffer without copying
    /// it, as handed over by callers that keep their text in encoded form.
    ///
    /// The buffer must be 2-byte aligned and of even length.
    #[cfg(target_endian = "little")]
    pub fn from_utf16le_bytes(
        bytes: &'t [u8],
        config: ItemIndexConfig,
    ) -> Result<Self, InvalidTextBytes> {
        let units = text::cast_utf16le_bytes(bytes)?;

        Ok(Self::new(units, config))
    }

    /// Returns the suffix array slot range of suffixes starting with
    /// `pattern`, under the byte-wise UTF-16LE order.
    ///
    /// The size of the range is the number of occurrences of `pattern` in the
    /// text. An empty pattern matches every suffix.
    pub fn find(&self, pattern: &[u16]) -> HalfOpenInterval {
        self.suffix_array.find(self.text, pattern)
    }

    /// Returns the number of occurrences of `pattern` in the text.
    pub fn count(&self, pattern: &[u16]) -> usize {
        self.find(pattern).len()
    }

    /// Writes the suffix positions of the distinct items represented in
    /// `range` into `output`, skipping the first `offset` slots of the range.
    ///
    /// At most one suffix per item is emitted, in ascending slot order; a
    /// slot is skipped when an earlier slot of the range holds a suffix of
    /// the same item. Writing stops when `output` is full or the range is
    /// done. The returned [`UniqueResult`] carries the number of suffixes
    /// written and the total number of slots consumed; passing `consumed` as
    /// the offset of a subsequent call continues the enumeration.
    pub fn find_unique(
        &self,
        range: HalfOpenInterval,
        output: &mut [Index],
        offset: usize,
    ) -> Result<UniqueResult, QueryError> {
        self.assert_valid_range(range);

        if offset > range.len() {
            return Err(QueryError::OffsetOutOfBounds {
                offset,
                len: range.len(),
            });
        }

        Ok(unique::find_unique(
            self.suffix_array.entries(),
            &self.previous_occurrences,
            range,
            output,
            offset,
        ))
    }

    /// Like [`find_unique`](Self::find_unique), but performs the pattern
    /// search itself and maps every written suffix position to the id of its
    /// owning item.
    ///
    /// `total_count` of the result is the size of the matched range, i.e. the
    /// occurrence count of `pattern` before deduplication.
    pub fn find_unique_items(
        &self,
        pattern: &[u16],
        output: &mut [Index],
        offset: usize,
    ) -> Result<UniqueItemsResult, QueryError> {
        let range = self.find(pattern);
        let result = self.find_unique(range, output, offset)?;

        for suffix in &mut output[..result.count] {
            *suffix = self.items.item_of(*suffix);
        }

        Ok(UniqueItemsResult {
            total_count: range.len(),
            count: result.count,
            consumed: result.consumed,
        })
    }

    /// Splits `pattern` into keywords on U+0020 and writes the ids of the
    /// matching items into `output`, skipping the first `offset` of them.
    ///
    /// Under [`MatchStrategy::All`], an item matches if it contains every
    /// keyword. Under [`MatchStrategy::AtLeastOne`], an item matches if it
    /// contains any keyword; items are ordered by the number of keywords they
    /// contain (descending), then by the index of the first keyword
    /// containing them, then by item id.
    ///
    /// A single keyword reduces to [`find_unique_items`](Self::find_unique_items),
    /// including its `total_count` semantics of counting suffixes rather than
    /// items. A pattern without keywords yields an empty result.
    pub fn find_unique_multi(
        &self,
        pattern: &[u16],
        matching: MatchStrategy,
        output: &mut [Index],
        offset: usize,
    ) -> Result<MultiResult, QueryError> {
        let keywords = keywords::parse_keywords(pattern);

        match keywords.as_slice() {
            [] => Ok(MultiResult {
                total_count: 0,
                count: 0,
            }),
            [keyword] => {
                let result = self.find_unique_items(keyword, output, offset)?;

                Ok(MultiResult {
                    total_count: result.total_count,
                    count: result.count,
                })
            }
            keywords => {
                let ranges: Vec<HalfOpenInterval> =
                    keywords.iter().map(|keyword| self.find(keyword)).collect();

                let combined = keywords::combine_keyword_ranges(
                    self.suffix_array.entries(),
                    &self.previous_occurrences,
                    &self.items,
                    &ranges,
                    matching,
                );

                if offset > combined.len() {
                    return Err(QueryError::OffsetOutOfBounds {
                        offset,
                        len: combined.len(),
                    });
                }

                let count = std::cmp::min(output.len(), combined.len() - offset);
                output[..count].copy_from_slice(&combined[offset..offset + count]);

                Ok(MultiResult {
                    total_count: combined.len(),
                    count,
                })
            }
        }
    }

    /// Returns the streaming form of [`find_unique`](Self::find_unique): an
    /// iterator over the suffix positions of the distinct items in `range`,
    /// starting `offset` slots into the range.
    ///
    /// `offset` must not exceed the range size.
    pub fn unique_items_in(&self, range: HalfOpenInterval, offset: usize) -> UniqueItemsIter<'_> {
        self.assert_valid_range(range);
        assert!(offset <= range.len());

        UniqueItemsIter::new(
            self.suffix_array.entries(),
            self.previous_occurrences.slots(),
            range,
            range.start + offset,
        )
    }

    /// The id of the item owning text position `position`. Separators belong
    /// to the item they terminate.
    pub fn item_of(&self, position: Index) -> Index {
        self.items.item_of(position)
    }

    /// The payload of an item, without its terminating separator.
    pub fn item_text(&self, item: Index) -> &'t [u16] {
        let (start, end) = self.items.payload_bounds(item);

        &self.text.units()[start..end]
    }

    pub fn num_items(&self) -> usize {
        self.items.num_items()
    }

    /// The length of the indexed text in code units, including all
    /// separators.
    pub fn text_len(&self) -> usize {
        self.text.len()
    }

    /// The underlying suffix array: a permutation of `0..text_len()` sorting
    /// the suffixes under the byte-wise UTF-16LE order.
    pub fn suffix_array(&self) -> &[Index] {
        self.suffix_array.entries()
    }

    fn assert_valid_range(&self, range: HalfOpenInterval) {
        assert!(range.start <= range.end && range.end <= self.text.len());
    }
}

/// A half-open range of suffix array slots, as returned by
/// [`ItemIndex::find`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HalfOpenInterval {
    pub start: usize,
    pub end: usize,
}

impl HalfOpenInterval {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Result of [`ItemIndex::find_unique`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniqueResult {
    /// Number of suffix positions written to the output.
    pub count: usize,
    /// Number of range slots consumed, counted from the range start. This
    /// includes the offset and skipped duplicates, so it is the offset to
    /// resume from.
    pub consumed: usize,
}

/// Result of [`ItemIndex::find_unique_items`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniqueItemsResult {
    /// Occurrence count of the pattern, before deduplication.
    pub total_count: usize,
    /// Number of item ids written to the output.
    pub count: usize,
    /// Number of range slots consumed, see [`UniqueResult::consumed`].
    pub consumed: usize,
}

/// Result of [`ItemIndex::find_unique_multi`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MultiResult {
    /// Size of the combined item list, before offset and truncation.
    pub total_count: usize,
    /// Number of item ids written to the output.
    pub count: usize,
}

/// The recoverable query error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// The requested offset lies past the end of the result.
    #[error("offset {offset} is out of bounds for a result of size {len}")]
    OffsetOutOfBounds { offset: usize, len: usize },
}

/// Error of [`ItemIndex::from_utf16le_bytes`]: the byte buffer cannot be
/// reinterpreted as a sequence of 16-bit code units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("byte buffer cannot be reinterpreted as utf-16le code units")]
pub struct InvalidTextBytes;
