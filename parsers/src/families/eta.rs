//! Estimated time of arrival: origin/destination plus the raw `HHMM` token,
//! content-addressed on the `ETA` marker. Absolute-instant resolution is
//! deferred to the enrichment extractor, which has the message timestamp
//! needed to roll the token onto a date.
//!

use acars_formats::{EtaResult, ParsedMessage, RawMessage};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::{Parser, ParserClass};

static MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bETA\s+(\d{4})\b").unwrap());
static ROUTE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b([A-Z]{4})[/ ]([A-Z]{4})\b").unwrap());

#[derive(Debug)]
pub struct EtaParser;

impl Parser for EtaParser {
    fn name(&self) -> &'static str {
        "eta"
    }

    fn class(&self) -> ParserClass {
        ParserClass::Global
    }

    fn priority(&self) -> i32 {
        20
    }

    fn prefilter(&self, msg: &RawMessage) -> bool {
        MARKER.is_match(&msg.text)
    }

    fn parse(&self, msg: &RawMessage) -> Option<ParsedMessage> {
        let caps = MARKER.captures(&msg.text)?;
        let (origin, destination) = match ROUTE.captures(&msg.text) {
            Some(c) => (Some(c[1].to_string()), Some(c[2].to_string())),
            None => (None, None),
        };
        Some(ParsedMessage::Eta(EtaResult {
            message_id: msg.id,
            origin,
            destination,
            hhmm: Some(caps[1].to_string()),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pulls_route_and_hhmm() {
        let msg = RawMessage::for_test("H1", "YSSY/KLAX ETA 0015");
        let p = EtaParser;
        assert!(p.prefilter(&msg));
        let r = p.parse(&msg).expect("should parse");
        match r {
            ParsedMessage::Eta(e) => {
                assert_eq!(e.origin.as_deref(), Some("YSSY"));
                assert_eq!(e.destination.as_deref(), Some("KLAX"));
                assert_eq!(e.hhmm.as_deref(), Some("0015"));
            }
            _ => panic!("wrong variant"),
        }
    }

    #[test]
    fn eta_without_route_still_parses() {
        let msg = RawMessage::for_test("H1", "ETA 2340");
        let r = EtaParser.parse(&msg).expect("should parse");
        match r {
            ParsedMessage::Eta(e) => {
                assert!(e.origin.is_none());
                assert_eq!(e.hhmm.as_deref(), Some("2340"));
            }
            _ => panic!("wrong variant"),
        }
    }

    #[test]
    fn garbled_body_never_panics() {
        let msg = RawMessage::for_test("H1", "ETA \u{0}\u{1} garbage");
        let _ = EtaParser.parse(&msg);
    }
}
