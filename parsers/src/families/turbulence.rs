//! Turbulence report: severity and a free-text location, content-addressed
//! on the `TURB` marker.
//!

use acars_formats::{ParsedMessage, RawMessage, TurbulenceResult};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::{Parser, ParserClass};

static MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bTURB\b").unwrap());
static SEVERITY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bTURB\s+(LGT|MOD|SEV|LIGHT|MODERATE|SEVERE)\b").unwrap());
static LOCATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bAT\s+([A-Z0-9 ]{3,30}?)(?:\.|$)").unwrap());

#[derive(Debug)]
pub struct TurbulenceParser;

impl Parser for TurbulenceParser {
    fn name(&self) -> &'static str {
        "turbulence"
    }

    fn class(&self) -> ParserClass {
        ParserClass::Global
    }

    fn priority(&self) -> i32 {
        40
    }

    fn prefilter(&self, msg: &RawMessage) -> bool {
        MARKER.is_match(&msg.text)
    }

    fn parse(&self, msg: &RawMessage) -> Option<ParsedMessage> {
        let text = &msg.text;
        let severity = SEVERITY.captures(text).map(|c| c[1].to_string());
        let location = LOCATION.captures(text).map(|c| c[1].trim().to_string());

        Some(ParsedMessage::Turbulence(TurbulenceResult {
            message_id: msg.id,
            severity,
            location,
        }))
    }
}
