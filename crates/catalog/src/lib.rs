//! Category catalog (read-only side lookup).
//!
//! Categories are owned by the lot source. This crate only resolves a lot's
//! category identifier to its display fields; it never manages categories.

pub mod category;

pub use category::{
    Category, CategoryDirectory, CategoryDisplay, CategoryResolution, TextTone, UNRESOLVED_COLOR,
};
