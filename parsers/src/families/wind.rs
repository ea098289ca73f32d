//! Predicted Wind Information (`H1 PWI`): climb, en-route and descent wind
//! tables. `H1` and `H2` variants share the same body grammar but arrive
//! under different labels.
//!

use acars_formats::{EnrouteWindEntry, ParsedMessage, RawMessage, WindEntry, WindForecastResult};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::{Parser, ParserClass};

static PWI_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bPWI\b").unwrap());
static CLIMB_ENTRY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bCLB\s+(\d{3,5})/(\d{3})(\d{2,3})\b").unwrap());
static DESCENT_ENTRY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bDSC\s+(\d{3,5})/(\d{3})(\d{2,3})\b").unwrap());
static ENROUTE_ENTRY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b([A-Z]{3,6})\s+FL(\d{2,3})\s+(\d{3})(\d{2,3})(?:/M(\d{1,2}))?\b").unwrap()
});

fn parse_body(text: &str) -> WindForecastResult {
    let climb = CLIMB_ENTRY
        .captures_iter(text)
        .filter_map(|c| {
            Some(WindEntry {
                altitude_ft: c[1].parse().ok()?,
                direction_deg: c[2].parse().ok()?,
                speed_kt: c[3].parse().ok()?,
            })
        })
        .collect();
    let descent = DESCENT_ENTRY
        .captures_iter(text)
        .filter_map(|c| {
            Some(WindEntry {
                altitude_ft: c[1].parse().ok()?,
                direction_deg: c[2].parse().ok()?,
                speed_kt: c[3].parse().ok()?,
            })
        })
        .collect();
    let enroute = ENROUTE_ENTRY
        .captures_iter(text)
        .filter_map(|c| {
            Some(EnrouteWindEntry {
                waypoint: c[1].to_string(),
                flight_level: c[2].parse().ok()?,
                direction_deg: c[3].parse().ok()?,
                speed_kt: c[4].parse().ok()?,
                temperature_c: c.get(5).and_then(|m| m.as_str().parse::<i16>().ok()).map(|t| -t),
            })
        })
        .collect();

    WindForecastResult {
        message_id: 0,
        climb,
        enroute,
        descent,
    }
}

#[derive(Debug)]
pub struct WindForecastH1Parser;

impl Parser for WindForecastH1Parser {
    fn name(&self) -> &'static str {
        "pwi_h1"
    }

    fn labels(&self) -> &'static [&'static str] {
        &["H1"]
    }

    fn class(&self) -> ParserClass {
        ParserClass::LabelBound
    }

    fn priority(&self) -> i32 {
        30
    }

    fn prefilter(&self, msg: &RawMessage) -> bool {
        PWI_MARKER.is_match(&msg.text)
    }

    fn parse(&self, msg: &RawMessage) -> Option<ParsedMessage> {
        let mut r = parse_body(&msg.text);
        if r.climb.is_empty() && r.enroute.is_empty() && r.descent.is_empty() {
            return None;
        }
        r.message_id = msg.id;
        Some(ParsedMessage::Pwi(r))
    }
}

#[derive(Debug)]
pub struct WindForecastH2Parser;

impl Parser for WindForecastH2Parser {
    fn name(&self) -> &'static str {
        "pwi_h2"
    }

    fn labels(&self) -> &'static [&'static str] {
        &["H2"]
    }

    fn class(&self) -> ParserClass {
        ParserClass::LabelBound
    }

    fn priority(&self) -> i32 {
        30
    }

    fn prefilter(&self, msg: &RawMessage) -> bool {
        PWI_MARKER.is_match(&msg.text)
    }

    fn parse(&self, msg: &RawMessage) -> Option<ParsedMessage> {
        let mut r = parse_body(&msg.text);
        if r.climb.is_empty() && r.enroute.is_empty() && r.descent.is_empty() {
            return None;
        }
        r.message_id = msg.id;
        Some(ParsedMessage::Pwi(r))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pulls_climb_and_enroute_entries() {
        let msg = RawMessage::for_test("H1", "PWI CLB 10000/27015 WPTA FL350 28020/M45");
        let p = WindForecastH1Parser;
        assert!(p.prefilter(&msg));
        let r = p.parse(&msg).expect("should parse");
        match r {
            ParsedMessage::Pwi(w) => {
                assert_eq!(w.climb.len(), 1);
                assert_eq!(w.enroute.len(), 1);
                assert_eq!(w.enroute[0].waypoint, "WPTA");
            }
            _ => panic!("wrong variant"),
        }
    }

    #[test]
    fn garbled_body_never_panics() {
        let msg = RawMessage::for_test("H1", "PWI \u{0}\u{1} garbage");
        let _ = WindForecastH1Parser.parse(&msg);
    }
}
