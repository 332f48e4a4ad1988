//! Value types for IPv4 arithmetic.
//!
//! - [`Address`] - single IPv4 address stored in network order
//! - [`Block`] - aligned network block in CIDR notation

mod address;
mod block;

// Re-export public types
pub use address::{get_cidr_mask, mask_to_prefix, Address, ByteOrder, MAX_LENGTH};
pub use block::{Block, BlockIter};
