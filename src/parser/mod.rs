//! Delimited-text sniffing, parsing, and serialization.
//!
//! The sniffer decides whether raw text is already tabular; the csv module
//! converts delimited text to and from the canonical [`crate::table::Table`].

mod csv;
mod sniffer;

pub use csv::{parse_delimited, serialize_delimited};
pub use sniffer::{is_delimited, is_delimited_with, DEFAULT_DELIMITER, DEFAULT_MATCH_RATIO};
