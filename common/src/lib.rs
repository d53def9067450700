//! Survey Photos Common Library
//!
//! 抽出・集計・出力の各段で共有される型とサニタイザ

pub mod columns;
pub mod error;
pub mod sanitize;
pub mod types;

pub use error::{Error, Result};
pub use sanitize::{sanitize_filename, sql_comment, sql_escape, strip_quotes};
pub use types::{parse_records, Coordinate, PhotoRecord, RatingCategory, RatingField};
