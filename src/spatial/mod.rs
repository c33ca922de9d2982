//! Grid coordinates and rectangle tests.

mod index;

pub use index::*;
