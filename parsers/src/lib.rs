//! The parser set: one recogniser per ACARS message family, each declaring a
//! stable name, interest (label-bound / global / catch-all), a priority, a
//! cheap pre-filter and a detailed extractor.
//!

pub mod families;

use std::fmt;

use acars_formats::{ParsedMessage, RawMessage};

/// Registration class controlling when the dispatcher consults a parser.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ParserClass {
    /// Interested only in messages whose label is in [`Parser::labels`].
    LabelBound,
    /// Consulted on every message regardless of label (content-addressed).
    Global,
    /// Consulted only if every other parser produced nothing.
    CatchAll,
}

/// A single message-family recogniser.
///
/// `parse` must never panic on malformed input; returning `None` is always
/// an acceptable outcome, and is expected for most (parser, message) pairs.
///
pub trait Parser: fmt::Debug + Send + Sync {
    fn name(&self) -> &'static str;

    /// Labels this parser is interested in. Empty for [`ParserClass::Global`]
    /// and [`ParserClass::CatchAll`] parsers.
    fn labels(&self) -> &'static [&'static str] {
        &[]
    }

    fn class(&self) -> ParserClass;

    /// Smaller numbers run first within the same registration class.
    fn priority(&self) -> i32;

    /// Cheap substring-only pre-filter; no regex here, that's for `parse`.
    fn prefilter(&self, msg: &RawMessage) -> bool;

    /// The detailed extractor. Only called if `prefilter` accepted.
    fn parse(&self, msg: &RawMessage) -> Option<ParsedMessage>;
}

/// Build every parser in the set. The binary assembly point (`acars-cli` /
/// `acarsd`) is responsible for handing these to a `Registry`; nothing here
/// registers itself as a side effect of being linked in.
///
pub fn all_parsers() -> Vec<Box<dyn Parser>> {
    families::all()
}
