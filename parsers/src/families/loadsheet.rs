//! Loadsheet: origin/destination, passenger count and class breakdown,
//! content-addressed on the `LOADSHEET` marker.
//!

use std::collections::BTreeMap;

use acars_formats::{LoadsheetResult, ParsedMessage, RawMessage};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::{Parser, ParserClass};

static MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bLOADSHEET\b").unwrap());
static ROUTE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b([A-Z]{4})[/ ]([A-Z]{4})\b").unwrap());
static PAX_TOTAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bPAX\s+(\d{1,3})\b").unwrap());
static PAX_CLASS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b([FCY])(\d{1,3})\b").unwrap());

#[derive(Debug)]
pub struct LoadsheetParser;

impl Parser for LoadsheetParser {
    fn name(&self) -> &'static str {
        "loadsheet"
    }

    fn class(&self) -> ParserClass {
        ParserClass::Global
    }

    fn priority(&self) -> i32 {
        15
    }

    fn prefilter(&self, msg: &RawMessage) -> bool {
        MARKER.is_match(&msg.text)
    }

    fn parse(&self, msg: &RawMessage) -> Option<ParsedMessage> {
        let text = &msg.text;
        let (origin, destination) = match ROUTE.captures(text) {
            Some(c) => (Some(c[1].to_string()), Some(c[2].to_string())),
            None => (None, None),
        };
        let pax_count = PAX_TOTAL.captures(text).and_then(|c| c[1].parse::<i32>().ok());
        let pax_breakdown: BTreeMap<String, i32> = PAX_CLASS
            .captures_iter(text)
            .filter_map(|c| Some((c[1].to_string(), c[2].parse::<i32>().ok()?)))
            .collect();

        if origin.is_none() && destination.is_none() && pax_count.is_none() && pax_breakdown.is_empty() {
            return None;
        }

        Some(ParsedMessage::Loadsheet(LoadsheetResult {
            message_id: msg.id,
            origin,
            destination,
            pax_count,
            pax_breakdown: if pax_breakdown.is_empty() { None } else { Some(pax_breakdown) },
        }))
    }
}
