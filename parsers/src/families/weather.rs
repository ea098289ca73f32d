//! Weather report: kept as the raw decoded text rather than a fully parsed
//! METAR — downstream consumers that need structured METAR fields are
//! expected to re-decode the raw body themselves.
//!

use acars_formats::{ParsedMessage, RawMessage, WeatherResult};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::{Parser, ParserClass};

static MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(METAR|WX)\b").unwrap());

#[derive(Debug)]
pub struct WeatherParser;

impl Parser for WeatherParser {
    fn name(&self) -> &'static str {
        "weather"
    }

    fn class(&self) -> ParserClass {
        ParserClass::Global
    }

    fn priority(&self) -> i32 {
        45
    }

    fn prefilter(&self, msg: &RawMessage) -> bool {
        MARKER.is_match(&msg.text)
    }

    fn parse(&self, msg: &RawMessage) -> Option<ParsedMessage> {
        if msg.text.trim().is_empty() {
            return None;
        }
        Some(ParsedMessage::Weather(WeatherResult {
            message_id: msg.id,
            raw: msg.text.clone(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_raw_body() {
        let msg = RawMessage::for_test("H1", "METAR YSSY 271200Z 25012KT 9999 FEW020 22/14 Q1018");
        let p = WeatherParser;
        assert!(p.prefilter(&msg));
        let r = p.parse(&msg).expect("should parse");
        match r {
            ParsedMessage::Weather(w) => assert!(w.raw.starts_with("METAR")),
            _ => panic!("wrong variant"),
        }
    }

    #[test]
    fn garbled_body_never_panics() {
        let msg = RawMessage::for_test("H1", "WX \u{0}\u{1}");
        let _ = WeatherParser.parse(&msg);
    }
}
