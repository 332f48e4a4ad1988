//! Range to CIDR decomposition.
//!
//! Converts an arbitrary inclusive address range into the minimal ordered
//! list of aligned blocks that covers it exactly.

use crate::error::{CidrError, Result};
use crate::models::{Address, Block, MAX_LENGTH};

/// Decompose `[start, end]` into the minimal ascending list of aligned blocks.
///
/// Works down from `end`: each step emits the largest aligned block that ends
/// at the cursor without reaching below `start`.
///
/// # Examples
/// ```
/// use ipv4_cidr_range::models::Address;
/// use ipv4_cidr_range::processing::decompose;
///
/// let blocks = decompose(
///     Address::parse_or_panic("10.0.0.0"),
///     Address::parse_or_panic("10.0.0.5"),
/// )
/// .unwrap();
/// let cidrs: Vec<String> = blocks.iter().map(|b| b.to_string()).collect();
/// assert_eq!(cidrs, vec!["10.0.0.0/30", "10.0.0.4/31"]);
/// ```
pub fn decompose(start: Address, end: Address) -> Result<Vec<Block>> {
    if start > end {
        return Err(CidrError::InvalidRange {
            start: start.to_string(),
            end: end.to_string(),
        });
    }
    let floor = start.to_integer();
    let mut cursor = end.to_integer();
    let mut blocks = Vec::new();

    loop {
        let bits = find_biggest_block(cursor, floor);
        let begin = block_start(cursor, bits);
        let block = Block::from_parts(Address::from_integer(begin), MAX_LENGTH - bits as u8);
        log::trace!("decompose {start}-{end}: emit {block}");
        blocks.push(block);

        if begin == floor {
            break;
        }
        // begin > floor, so this cannot underflow.
        cursor = begin - 1;
    }

    blocks.reverse();
    log::debug!("Decomposed {start}-{end} into {} block(s)", blocks.len());
    Ok(blocks)
}

/// Parse both ends as dotted decimal and [`decompose`] the range.
pub fn decompose_str(start: &str, end: &str) -> Result<Vec<Block>> {
    decompose(Address::parse(start)?, Address::parse(end)?)
}

/// Host bit count of the biggest aligned block ending at `cursor` that does
/// not start below `floor`.
///
/// A block of `2^k` addresses can only end at `cursor` when the low `k` bits
/// of `cursor` are all ones, so the search starts there and shrinks.
fn find_biggest_block(cursor: u32, floor: u32) -> u32 {
    let mut bits = cursor.trailing_ones();
    while block_start(cursor, bits) < floor {
        bits -= 1;
    }
    bits
}

// `bits` may be 32 for the whole space.
fn block_start(cursor: u32, bits: u32) -> u32 {
    (((cursor as u64) >> bits) << bits) as u32
}
