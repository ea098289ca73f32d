//! Landing data: runway in use and fuel remaining, reported post-arrival.
//!

use acars_formats::{extract_runway, LandingDataResult, ParsedMessage, RawMessage};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::{Parser, ParserClass};

static MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bLANDING\s+DATA\b").unwrap());
static FUEL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bFUEL\s+(\d{3,6})\s*(?:KG|LB)?\b").unwrap());

#[derive(Debug)]
pub struct LandingDataParser;

impl Parser for LandingDataParser {
    fn name(&self) -> &'static str {
        "landing_data"
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
        let runway = extract_runway(text);
        let fuel = FUEL.captures(text).map(|c| c[1].to_string());

        if runway.is_none() && fuel.is_none() {
            return None;
        }

        Some(ParsedMessage::LandingData(LandingDataResult {
            message_id: msg.id,
            runway,
            fuel,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pulls_runway_and_fuel() {
        let msg = RawMessage::for_test("H1", "LANDING DATA RWY 34L FUEL 2400 KG");
        let p = LandingDataParser;
        assert!(p.prefilter(&msg));
        let r = p.parse(&msg).expect("should parse");
        match r {
            ParsedMessage::LandingData(l) => {
                assert_eq!(l.runway.as_deref(), Some("34L"));
                assert_eq!(l.fuel.as_deref(), Some("2400"));
            }
            _ => panic!("wrong variant"),
        }
    }

    #[test]
    fn garbled_body_never_panics() {
        let msg = RawMessage::for_test("H1", "LANDING DATA \u{0}\u{1}");
        let _ = LandingDataParser.parse(&msg);
    }
}
