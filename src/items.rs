use crate::Index;
use crate::text::Utf16Text;

/// Position-to-item lookup for a separator-terminated text.
///
/// `item_of_position[p]` is the zero-based id of the item owning text
/// position `p`. Separators belong to the item they terminate.
pub(crate) struct ItemMap {
    item_of_position: Vec<Index>,
    separator_positions: Vec<Index>,
}

impl ItemMap {
    pub(crate) fn new(text: Utf16Text) -> Self {
        let separator_positions = find_separators(text.units());

        let mut item_of_position = vec![0; text.len()];
        let mut start = 0;

        for (item, &separator) in separator_positions.iter().enumerate() {
            item_of_position[start..=separator as usize].fill(item as Index);
            start = separator as usize + 1;
        }

        Self {
            item_of_position,
            separator_positions,
        }
    }

    pub(crate) fn item_of(&self, position: Index) -> Index {
        self.item_of_position[position as usize]
    }

    pub(crate) fn num_items(&self) -> usize {
        self.separator_positions.len()
    }

    /// Start and end (exclusive, the separator position) of an item's payload.
    pub(crate) fn payload_bounds(&self, item: Index) -> (usize, usize) {
        let item = item as usize;

        let start = if item == 0 {
            0
        } else {
            self.separator_positions[item - 1] as usize + 1
        };

        (start, self.separator_positions[item] as usize)
    }
}

// A separator unit is a zero byte at an even offset whose partner byte is
// also zero, regardless of host byte order.
fn find_separators(units: &[u16]) -> Vec<Index> {
    let bytes: &[u8] = bytemuck::cast_slice(units);

    memchr::memchr_iter(0, bytes)
        .filter(|&i| i % 2 == 0 && bytes[i + 1] == 0)
        .map(|i| (i / 2) as Index)
        .collect()
}
