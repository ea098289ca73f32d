//! Oceanic clearance (`B2`): destination, NAT-style fix list, cleared flight
//! level and Mach number.
//!

use acars_formats::{OceanicClearanceResult, ParsedMessage, RawMessage};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::{Parser, ParserClass};

static CLRD_TO: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bCLRD\s+TO\s+([A-Z]{4})\b").unwrap());
static FIX_LIST: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bVIA\s+((?:[A-Z]{2,6}\s*)+?)\bMACH\b").unwrap());
static MACH_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bMACH\s*\.?(\d{2,3})\b").unwrap());
static FL_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bFL\s*(\d{2,3})\b").unwrap());

#[derive(Debug)]
pub struct OceanicClearanceParser;

impl Parser for OceanicClearanceParser {
    fn name(&self) -> &'static str {
        "oceanic_clearance"
    }

    fn labels(&self) -> &'static [&'static str] {
        &["B2"]
    }

    fn class(&self) -> ParserClass {
        ParserClass::LabelBound
    }

    fn priority(&self) -> i32 {
        10
    }

    fn prefilter(&self, msg: &RawMessage) -> bool {
        msg.text.contains("CLRD") || msg.text.contains("OCEANIC")
    }

    fn parse(&self, msg: &RawMessage) -> Option<ParsedMessage> {
        let text = &msg.text;
        let destination = CLRD_TO.captures(text).map(|c| c[1].to_string());
        let fixes = FIX_LIST
            .captures(text)
            .map(|c| c[1].split_whitespace().map(str::to_string).collect())
            .unwrap_or_default();
        let cleared_fl = FL_PATTERN.captures(text).map(|c| c[1].to_string());
        let mach = MACH_PATTERN.captures(text).map(|c| format!(".{}", &c[1]));

        if destination.is_none() && fixes.is_empty() && cleared_fl.is_none() && mach.is_none() {
            return None;
        }

        Some(ParsedMessage::OceanicClearance(OceanicClearanceResult {
            message_id: msg.id,
            destination,
            fixes,
            cleared_fl,
            mach,
        }))
    }
}
