use crate::{ItemIndex, SortStrategy};

/// A builder-like API to configure and construct the [`ItemIndex`].
#[derive(Debug, Clone, Copy)]
pub struct ItemIndexConfig {
    pub(crate) sort_strategy: SortStrategy,
    pub(crate) comparison_sort_cutoff: usize,
}

impl ItemIndexConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// The buffering strategy used by the radix suffix sort during
    /// construction. The resulting index is identical for every strategy.
    /// The default is [`SortStrategy::InPlace`].
    pub fn sort_strategy(self, sort_strategy: SortStrategy) -> Self {
        Self {
            sort_strategy,
            ..self
        }
    }

    /// Sub-ranges smaller than this are sorted by direct suffix comparison
    /// instead of descending further into the radix sort. `0` disables the
    /// fallback entirely. The default is `80`.
    pub fn comparison_sort_cutoff(self, comparison_sort_cutoff: usize) -> Self {
        Self {
            comparison_sort_cutoff,
            ..self
        }
    }

    /// Construct the index for `text`.
    ///
    /// Every item in `text`, including the last one, must be terminated by a
    /// zero code unit. See [`concatenate_items`](crate::concatenate_items)
    /// for building such a buffer from individual items.
    pub fn construct_index(self, text: &[u16]) -> ItemIndex<'_> {
        ItemIndex::new(text, self)
    }
}

impl Default for ItemIndexConfig {
    fn default() -> Self {
        Self {
            sort_strategy: SortStrategy::default(),
            comparison_sort_cutoff: 80,
        }
    }
}
