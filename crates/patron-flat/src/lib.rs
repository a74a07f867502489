#![deny(unsafe_code)]

//! Flat-file encoding of validated records.
//!
//! The encoder is purely table-driven: a [`FlatLayout`] names the
//! fields, their order, and the physical shape (Symphony's tagged
//! format, fixed-width columns, or a delimited line). Adding a target
//! layout means writing a layout table, not code. The built-in default
//! is the SirsiDynix Symphony "flat user" format.

mod error;
mod layout;
mod writer;

pub use error::FlatError;
pub use layout::{BlockKind, FlatField, FlatLayout, LayoutKind};
pub use writer::{FlatWriter, decode_fixed};
