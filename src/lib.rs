//! Exact arithmetic over IPv4 address space.
//!
//! Converts between single addresses, aligned CIDR blocks and arbitrary
//! inclusive ranges, and splits or subtracts blocks.
//!
//! ```
//! use ipv4_cidr_range::{decompose_str, Block};
//!
//! let blocks = decompose_str("10.0.0.1", "10.0.0.10").unwrap();
//! assert_eq!(blocks.len(), 5);
//!
//! let rest = Block::parse("192.168.0.0/24")
//!     .unwrap()
//!     .cut(&Block::parse("192.168.0.64/26").unwrap())
//!     .unwrap();
//! assert_eq!(rest[1].to_string(), "192.168.0.128/25");
//! ```

pub mod error;
pub mod models;
pub mod processing;

pub use error::{CidrError, Result};
pub use models::{Address, Block, ByteOrder};
pub use processing::{covered_range, decompose, decompose_str, sort_blocks};
