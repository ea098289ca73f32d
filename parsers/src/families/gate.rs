//! Gate assignment advisory, content-addressed on the `GATE` marker.
//!

use acars_formats::{GateAssignmentResult, ParsedMessage, RawMessage};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::{Parser, ParserClass};

static GATE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bGATE\s+([A-Z]?\d{1,3}[A-Z]?)\b").unwrap());

#[derive(Debug)]
pub struct GateAssignmentParser;

impl Parser for GateAssignmentParser {
    fn name(&self) -> &'static str {
        "gate_assignment"
    }

    fn class(&self) -> ParserClass {
        ParserClass::Global
    }

    fn priority(&self) -> i32 {
        30
    }

    fn prefilter(&self, msg: &RawMessage) -> bool {
        GATE_PATTERN.is_match(&msg.text)
    }

    fn parse(&self, msg: &RawMessage) -> Option<ParsedMessage> {
        let gate = GATE_PATTERN.captures(&msg.text).map(|c| c[1].to_string())?;
        Some(ParsedMessage::GateAssignment(GateAssignmentResult {
            message_id: msg.id,
            gate: Some(gate),
        }))
    }
}
