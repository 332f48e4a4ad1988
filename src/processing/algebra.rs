//! Subnetting and subtraction of blocks.

use super::decompose::decompose;
use crate::error::{CidrError, Result};
use crate::models::{Address, Block, MAX_LENGTH};

impl Block {
    /// Split into equal blocks of length `target`, in ascending order.
    ///
    /// A `target` at or above this block's size (`target <= prefix`) returns
    /// the block itself.
    pub fn split(&self, target: u8) -> Result<Vec<Block>> {
        if target <= self.prefix() {
            return Ok(vec![*self]);
        }
        if target > MAX_LENGTH {
            return Err(CidrError::InvalidPrefix {
                target,
                min: self.prefix(),
            });
        }
        let count = 1u64 << (target - self.prefix());
        let step = 1u64 << (MAX_LENGTH - target);
        let base = self.start().to_integer() as u64;

        let blocks: Vec<Block> = (0..count)
            .map(|i| Block::from_parts(Address::from_integer((base + i * step) as u32), target))
            .collect();
        log::debug!("Split {self} into {} /{target} block(s)", blocks.len());
        Ok(blocks)
    }

    /// Remove `sub` from this block, returning the minimal ascending list of
    /// blocks covering what is left.
    pub fn cut(&self, sub: &Block) -> Result<Vec<Block>> {
        if !self.contains_block(sub) {
            return Err(CidrError::NotContained {
                parent: self.to_string(),
                sub: sub.to_string(),
            });
        }
        let mut blocks = Vec::new();
        // Both sides are disjoint and ordered, so concatenation stays sorted.
        if sub.start() > self.start() {
            blocks.extend(decompose(self.start(), sub.start().sub(1))?);
        }
        if sub.end() < self.end() {
            blocks.extend(decompose(sub.end().add(1), self.end())?);
        }
        log::debug!("Cut {sub} from {self}: {} block(s) left", blocks.len());
        Ok(blocks)
    }
}
