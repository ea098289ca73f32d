//! Pattern library and result types shared by every ACARS parser.
//!
//! This crate carries no I/O: it is the purely functional part of the system
//! (coordinate decoding, callsign normalisation, ICAO validation, keyword
//! extraction) plus the closed [`ParsedMessage`] result type that every
//! parser in `acars-parsers` produces.
//!

mod callsign;
mod icao;
mod keywords;
mod message;
mod result;

pub mod coord;

pub use callsign::*;
pub use icao::*;
pub use keywords::*;
pub use message::*;
pub use result::*;

pub fn version() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}
