//! IPv4 address value and mask utilities.
//!
//! Provides [`Address`], an immutable 32-bit address stored in network
//! (most-significant-byte-first) order, along with helpers for converting
//! between prefix lengths and mask values.

use crate::error::{CidrError, Result};
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

/// Maximum length for an IPv4 subnet mask (32 bits).
pub const MAX_LENGTH: u8 = 32;

/// Octet order used to interpret an integer or byte slice as an address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ByteOrder {
    /// Most significant octet first (network order).
    #[default]
    BigEndian,
    /// Least significant octet first.
    LittleEndian,
}

/// Convert a CIDR prefix length to a subnet mask as u32.
///
/// # Examples
/// ```
/// use ipv4_cidr_range::models::get_cidr_mask;
/// assert_eq!(get_cidr_mask(24).unwrap(), 0xFFFFFF00);
/// ```
pub fn get_cidr_mask(len: u8) -> Result<u32> {
    if len > MAX_LENGTH {
        Err(CidrError::InvalidPrefix {
            target: len,
            min: 0,
        })
    } else {
        let right_len = MAX_LENGTH - len;
        let all_bits = u32::MAX as u64;

        let mask = (all_bits >> right_len) << right_len;

        Ok(mask as u32)
    }
}

/// Convert a dotted mask (e.g. `255.255.255.0`) to its prefix length.
///
/// The mask must be a contiguous run of ones followed by zeros.
pub fn mask_to_prefix(mask: Address) -> Result<u8> {
    let bits = mask.to_integer();
    let prefix = mask.leading_one_run_length();
    if bits.leading_ones() != prefix {
        return Err(CidrError::Format(format!("non-contiguous mask {mask}")));
    }
    Ok(prefix as u8)
}

/// A single IPv4 address.
///
/// Always stored in canonical network order, so two addresses compare equal
/// iff their octets are equal, regardless of how they were built.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Copy, Clone, Hash, Default)]
pub struct Address(u32);

impl Address {
    /// `0.0.0.0`
    pub const MIN: Address = Address(0);
    /// `255.255.255.255`
    pub const MAX: Address = Address(u32::MAX);

    /// Parse dotted-decimal text such as `"10.0.0.1"`.
    pub fn parse(text: &str) -> Result<Address> {
        let text = text.trim();
        let addr = Ipv4Addr::from_str(text)
            .map_err(|_| CidrError::Format(format!("invalid IPv4 address '{text}'")))?;
        Ok(Address::from(addr))
    }

    /// Parse a literal that is already known to be valid.
    ///
    /// # Panics
    /// Panics on malformed input. Only use this on literals in source code,
    /// never on external or user supplied text; use [`Address::parse`] there.
    pub fn parse_or_panic(text: &str) -> Address {
        Address::parse(text).unwrap_or_else(|e| panic!("{e}"))
    }

    pub const fn from_integer(value: u32) -> Address {
        Address(value)
    }

    pub const fn to_integer(self) -> u32 {
        self.0
    }

    /// Build an address from an integer whose octets are laid out in `order`.
    ///
    /// With [`ByteOrder::LittleEndian`], `1` is `1.0.0.0`.
    pub fn from_integer_with_order(value: u32, order: ByteOrder) -> Address {
        match order {
            ByteOrder::BigEndian => Address(value),
            ByteOrder::LittleEndian => Address::from_octets(value.to_le_bytes()),
        }
    }

    /// Read the address as an integer with octets laid out in `order`.
    pub fn to_integer_with_order(self, order: ByteOrder) -> u32 {
        match order {
            ByteOrder::BigEndian => self.0,
            ByteOrder::LittleEndian => u32::from_le_bytes(self.octets()),
        }
    }

    pub const fn from_octets(octets: [u8; 4]) -> Address {
        Address(u32::from_be_bytes(octets))
    }

    pub const fn octets(self) -> [u8; 4] {
        self.0.to_be_bytes()
    }

    /// Build an address from exactly four bytes in the given order.
    pub fn from_bytes_with_order(bytes: &[u8], order: ByteOrder) -> Result<Address> {
        let raw: [u8; 4] = bytes.try_into().map_err(|_| {
            CidrError::Format(format!("expected 4 bytes, got {}", bytes.len()))
        })?;
        Ok(Address::from_integer_with_order(
            u32::from_be_bytes(raw),
            order,
        ))
    }

    /// Copy of this address with octet `index` (0 = most significant) replaced.
    pub fn with_octet(self, index: usize, value: u8) -> Result<Address> {
        let mut octets = self.octets();
        let slot = octets.get_mut(index).ok_or(CidrError::OctetIndex(index))?;
        *slot = value;
        Ok(Address::from_octets(octets))
    }

    /// Bitwise complement.
    pub const fn invert(self) -> Address {
        Address(!self.0)
    }

    /// Add `n`, wrapping at 2^32.
    pub const fn add(self, n: u32) -> Address {
        Address(self.0.wrapping_add(n))
    }

    /// Subtract `n`, wrapping at zero.
    pub const fn sub(self, n: u32) -> Address {
        Address(self.0.wrapping_sub(n))
    }

    /// `32 - trailing_zeros`: the number of leading ones when the value is a
    /// mask, or the prefix length of the largest block this address can start.
    pub const fn leading_one_run_length(self) -> u32 {
        MAX_LENGTH as u32 - self.0.trailing_zeros()
    }

    /// Number of low-order zero bits (32 for `0.0.0.0`).
    pub const fn alignment(self) -> u32 {
        self.0.trailing_zeros()
    }
}

impl From<Ipv4Addr> for Address {
    fn from(addr: Ipv4Addr) -> Self {
        Address(u32::from(addr))
    }
}

impl From<Address> for Ipv4Addr {
    fn from(addr: Address) -> Self {
        Ipv4Addr::from(addr.0)
    }
}

impl From<u32> for Address {
    fn from(value: u32) -> Self {
        Address(value)
    }
}

impl FromStr for Address {
    type Err = CidrError;

    fn from_str(s: &str) -> Result<Self> {
        Address::parse(s)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", Ipv4Addr::from(*self))
    }
}

impl Serialize for Address {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Address, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Address::parse(&s).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_cidr_mask() {
        assert_eq!(get_cidr_mask(0).unwrap(), 0x00000000);
        assert_eq!(get_cidr_mask(8).unwrap(), 0xFF000000);
        assert_eq!(get_cidr_mask(16).unwrap(), 0xFFFF0000);
        assert_eq!(get_cidr_mask(24).unwrap(), 0xFFFFFF00);
        assert_eq!(get_cidr_mask(32).unwrap(), 0xFFFFFFFF);

        assert!(get_cidr_mask(33).is_err());
    }

    #[test]
    fn test_mask_to_prefix() {
        assert_eq!(mask_to_prefix(Address::parse_or_panic("255.255.255.0")).unwrap(), 24);
        assert_eq!(mask_to_prefix(Address::parse_or_panic("255.255.255.255")).unwrap(), 32);
        assert_eq!(mask_to_prefix(Address::parse_or_panic("255.128.0.0")).unwrap(), 9);
        assert_eq!(mask_to_prefix(Address::MIN).unwrap(), 0);
        assert!(mask_to_prefix(Address::parse_or_panic("255.0.255.0")).is_err());
        assert!(mask_to_prefix(Address::parse_or_panic("0.0.0.255")).is_err());
    }

    #[test]
    fn test_parse() {
        let addr = Address::parse("192.168.1.42").unwrap();
        assert_eq!(addr.to_integer(), 0xC0A8012A);
        assert_eq!(addr.to_string(), "192.168.1.42");
        assert_eq!(Address::parse(" 10.0.0.1 ").unwrap(), Address::from_integer(0x0A000001));

        for bad in ["", "10.0.0", "10.0.0.0.1", "10.0.0.256", "a.b.c.d", "10.0.0.-1"] {
            assert!(
                matches!(Address::parse(bad), Err(CidrError::Format(_))),
                "'{bad}' should not parse"
            );
        }
        assert!("1.2.3.4".parse::<Address>().is_ok());
    }

    #[test]
    #[should_panic]
    fn test_parse_or_panic() {
        Address::parse_or_panic("300.0.0.1");
    }

    #[test]
    fn test_byte_order() {
        let addr = Address::parse_or_panic("1.0.0.0");
        assert_eq!(addr.to_integer_with_order(ByteOrder::BigEndian), 1 << 24);
        assert_eq!(addr.to_integer_with_order(ByteOrder::default()), 1 << 24);
        assert_eq!(addr.to_integer_with_order(ByteOrder::LittleEndian), 1);

        // Same octets from either order compare equal.
        let big = Address::from_integer_with_order(0x01020304, ByteOrder::BigEndian);
        let little = Address::from_integer_with_order(0x04030201, ByteOrder::LittleEndian);
        assert_eq!(big, little);
        assert_eq!(big.to_string(), "1.2.3.4");

        let bytes = [4, 3, 2, 1];
        assert_eq!(
            Address::from_bytes_with_order(&bytes, ByteOrder::LittleEndian).unwrap(),
            big
        );
        assert_eq!(
            Address::from_bytes_with_order(&[1, 2, 3, 4], ByteOrder::BigEndian).unwrap(),
            big
        );
        assert!(Address::from_bytes_with_order(&[1, 2, 3], ByteOrder::BigEndian).is_err());
    }

    #[test]
    fn test_with_octet() {
        let addr = Address::parse_or_panic("10.0.0.0");
        let addr = addr.with_octet(1, 20).unwrap().with_octet(3, 7).unwrap();
        assert_eq!(addr.to_string(), "10.20.0.7");
        assert_eq!(addr.octets(), [10, 20, 0, 7]);
        assert_eq!(addr.with_octet(4, 1), Err(CidrError::OctetIndex(4)));
    }

    #[test]
    fn test_arithmetic_wraps() {
        let addr = Address::parse_or_panic("10.0.0.255");
        assert_eq!(addr.add(1).to_string(), "10.0.1.0");
        assert_eq!(addr.sub(255).to_string(), "10.0.0.0");
        assert_eq!(Address::MAX.add(1), Address::MIN);
        assert_eq!(Address::MIN.sub(1), Address::MAX);
        assert_eq!(
            Address::parse_or_panic("255.255.255.0").invert().to_string(),
            "0.0.0.255"
        );
    }

    #[test]
    fn test_leading_one_run_length() {
        assert_eq!(Address::parse_or_panic("255.255.255.0").leading_one_run_length(), 24);
        assert_eq!(Address::parse_or_panic("255.255.255.255").leading_one_run_length(), 32);
        assert_eq!(Address::MIN.leading_one_run_length(), 0);
        // 192.168.1.1 is only aligned to a /32
        assert_eq!(Address::parse_or_panic("192.168.1.1").leading_one_run_length(), 32);
        assert_eq!(Address::parse_or_panic("10.11.12.0").leading_one_run_length(), 22);
        assert_eq!(Address::parse_or_panic("10.6.2.80").alignment(), 4);
        assert_eq!(Address::MIN.alignment(), 32);
    }

    #[test]
    fn test_serde() {
        let addr = Address::parse_or_panic("172.16.5.4");
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, "\"172.16.5.4\"");
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, addr);
        assert!(serde_json::from_str::<Address>("\"172.16.5\"").is_err());
    }
}
