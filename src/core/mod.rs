// src/core/mod.rs

pub mod html;
pub mod net;
pub mod sanitize;

pub use sanitize::{HalfPointTable, normalize_name, parse_integer, parse_points};
