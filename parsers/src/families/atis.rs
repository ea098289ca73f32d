//! ATIS observation: airport, information letter, decoded body.
//!

use acars_formats::{extract_atis_letter, AtisResult, ParsedMessage, RawMessage};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::{Parser, ParserClass};

static MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bATIS\b").unwrap());
static AIRPORT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b([A-Z]{4})\s+ATIS\b").unwrap());
static ISSUE_TIME: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(\d{4})Z\b").unwrap());

#[derive(Debug)]
pub struct AtisParser;

impl Parser for AtisParser {
    fn name(&self) -> &'static str {
        "atis"
    }

    fn class(&self) -> ParserClass {
        ParserClass::Global
    }

    fn priority(&self) -> i32 {
        25
    }

    fn prefilter(&self, msg: &RawMessage) -> bool {
        MARKER.is_match(&msg.text)
    }

    fn parse(&self, msg: &RawMessage) -> Option<ParsedMessage> {
        let text = &msg.text;
        let airport = AIRPORT.captures(text).map(|c| c[1].to_string())?;
        let letter = extract_atis_letter(text)?;
        let issue_time = ISSUE_TIME.captures(text).map(|c| c[1].to_string());

        Some(ParsedMessage::Atis(AtisResult {
            message_id: msg.id,
            airport,
            letter,
            issue_time,
            body: text.clone(),
        }))
    }
}
