//! Aligned network block (`address/prefix`).

use super::address::{get_cidr_mask, mask_to_prefix, Address, MAX_LENGTH};
use crate::error::{CidrError, Result};
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Network block with CIDR notation support.
///
/// The stored network address always has every host bit clear. Blocks order
/// by network address first, then by prefix length.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Copy, Clone, Hash)]
pub struct Block {
    network: Address,
    prefix: u8,
}

impl Block {
    /// Create a block, rejecting a network address with host bits set.
    pub fn new(network: Address, prefix: u8) -> Result<Block> {
        let mask = get_cidr_mask(prefix)?;
        if network.to_integer() & !mask != 0 {
            return Err(CidrError::Format(format!(
                "{network}/{prefix} has host bits set"
            )));
        }
        Ok(Block { network, prefix })
    }

    /// Build from parts the caller has already aligned.
    pub(crate) fn from_parts(network: Address, prefix: u8) -> Block {
        debug_assert!(prefix <= MAX_LENGTH, "prefix /{prefix} > 32");
        debug_assert!(
            Block::new(network, prefix).is_ok(),
            "{network}/{prefix} is not aligned"
        );
        Block { network, prefix }
    }

    /// Parse CIDR text such as `"10.0.0.0/24"`.
    pub fn parse(text: &str) -> Result<Block> {
        let text = text.trim();
        let parts: Vec<&str> = text.split('/').collect();
        if parts.len() != 2 {
            return Err(CidrError::Format(format!("invalid CIDR format '{text}'")));
        }
        let network = Address::parse(parts[0])?;
        let prefix: u8 = parts[1]
            .parse()
            .map_err(|_| CidrError::Format(format!("invalid prefix length '{}'", parts[1])))?;
        if prefix > MAX_LENGTH {
            return Err(CidrError::Format(format!(
                "network length /{prefix} is too long"
            )));
        }
        Block::new(network, prefix)
    }

    /// Parse a literal that is already known to be valid.
    ///
    /// # Panics
    /// Panics on malformed or non-aligned input. Only use this on literals in
    /// source code, never on external data; use [`Block::parse`] there.
    pub fn parse_or_panic(text: &str) -> Block {
        Block::parse(text).unwrap_or_else(|e| panic!("{e}"))
    }

    /// Build from an address and a dotted mask, e.g. `("10.1.0.0", "255.255.0.0")`.
    pub fn from_address_mask(address: &str, mask: &str) -> Result<Block> {
        let network = Address::parse(address)?;
        let prefix = mask_to_prefix(Address::parse(mask)?)?;
        Block::new(network, prefix)
    }

    /// The single block covering exactly `[start, end]`.
    ///
    /// Fails when the range is not one aligned block.
    pub fn from_range_exact(start: Address, end: Address) -> Result<Block> {
        if start > end {
            return Err(CidrError::InvalidRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        let span = end.to_integer() as u64 - start.to_integer() as u64 + 1;
        if !span.is_power_of_two() {
            return Err(CidrError::Format(format!(
                "{start}-{end} is not a single block"
            )));
        }
        Block::new(start, MAX_LENGTH - span.trailing_zeros() as u8)
    }

    pub fn network(&self) -> Address {
        self.network
    }

    pub fn prefix(&self) -> u8 {
        self.prefix
    }

    /// Lowest address in the block.
    pub fn start(&self) -> Address {
        self.network
    }

    /// Highest (broadcast) address in the block.
    pub fn end(&self) -> Address {
        Address::from_integer(self.network.to_integer() | self.host_mask().to_integer())
    }

    pub fn mask(&self) -> Address {
        Address::from_integer(get_mask(self.prefix))
    }

    pub fn host_mask(&self) -> Address {
        self.mask().invert()
    }

    /// Network address and dotted mask.
    pub fn address_mask(&self) -> (Address, Address) {
        (self.network, self.mask())
    }

    /// Start and end as integers.
    pub fn bounds(&self) -> (u32, u32) {
        (self.start().to_integer(), self.end().to_integer())
    }

    /// Number of addresses in the block.
    pub fn size(&self) -> u64 {
        1u64 << (MAX_LENGTH - self.prefix)
    }

    /// Check if an address is contained within this block.
    pub fn contains(&self, addr: Address) -> bool {
        addr >= self.start() && addr <= self.end()
    }

    /// True iff every address of `other` is inside this block.
    pub fn contains_block(&self, other: &Block) -> bool {
        other.start() >= self.start() && other.end() <= self.end()
    }

    /// Every address in ascending order.
    pub fn iter(&self) -> BlockIter {
        let (start, end) = self.bounds();
        BlockIter {
            next: start as u64,
            end: end as u64,
        }
    }

    /// Visit every address in ascending order until `visit` returns false.
    pub fn each<F>(&self, mut visit: F)
    where
        F: FnMut(Address) -> bool,
    {
        for addr in self.iter() {
            if !visit(addr) {
                return;
            }
        }
    }
}

// Infallible for prefix <= 32, which every stored block satisfies.
fn get_mask(prefix: u8) -> u32 {
    get_cidr_mask(prefix).unwrap_or_else(|e| panic!("Error calculating mask: {e}"))
}

/// Iterator over the addresses of a [`Block`].
#[derive(Debug, Clone)]
pub struct BlockIter {
    next: u64,
    end: u64,
}

impl Iterator for BlockIter {
    type Item = Address;

    fn next(&mut self) -> Option<Address> {
        if self.next > self.end {
            return None;
        }
        let addr = Address::from_integer(self.next as u32);
        self.next += 1;
        Some(addr)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (self.end + 1).saturating_sub(self.next);
        match usize::try_from(left) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

impl IntoIterator for &Block {
    type Item = Address;
    type IntoIter = BlockIter;

    fn into_iter(self) -> BlockIter {
        self.iter()
    }
}

impl FromStr for Block {
    type Err = CidrError;

    fn from_str(s: &str) -> Result<Self> {
        Block::parse(s)
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}", self.network, self.prefix)
    }
}

impl Serialize for Block {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Block {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Block, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Block::parse(&s).map_err(de::Error::custom)
    }
}
