//! Range and block algorithms.
//!
//! This module contains the arithmetic built on the value types:
//! - [`decompose`] - Range to minimal CIDR list decomposition
//! - `algebra` - [`Block::split`](crate::models::Block::split) and
//!   [`Block::cut`](crate::models::Block::cut)
//! - `ordering` - Sorting and coverage checks for block lists

mod algebra;
mod decompose;
mod ordering;

// Re-export public functions
pub use decompose::{decompose, decompose_str};
pub use ordering::{covered_range, sort_blocks};
