//! Ordering and coverage checks for block lists.

use crate::models::{Address, Block};
use itertools::Itertools;

/// Sort blocks ascending by start address. Stable.
pub fn sort_blocks(blocks: &mut [Block]) {
    blocks.sort_by_key(|b| b.start());
}

/// The range covered by a sorted, gapless, non-overlapping block list.
///
/// Returns `None` for an empty list, or when any neighbour pair leaves a gap,
/// overlaps, or is out of order.
pub fn covered_range(blocks: &[Block]) -> Option<(Address, Address)> {
    let first = blocks.first()?;
    let last = blocks.last()?;
    let contiguous = blocks
        .iter()
        .tuple_windows()
        .all(|(a, b)| a.end().to_integer() as u64 + 1 == b.start().to_integer() as u64);
    if !contiguous {
        log::debug!("Block list starting at {first} is not contiguous");
        return None;
    }
    Some((first.start(), last.end()))
}
