//! Named-waypoint position report (as opposed to the raw lat/lon position
//! families): a single waypoint name plus an optional ETA token.
//!

use acars_formats::{ParsedMessage, RawMessage, WaypointPositionResult};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::{Parser, ParserClass};

static WPT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bOVER\s+([A-Z]{3,6})(?:\s+AT\s+(\d{4}))?\b").unwrap());

#[derive(Debug)]
pub struct WaypointPositionParser;

impl Parser for WaypointPositionParser {
    fn name(&self) -> &'static str {
        "waypoint_position"
    }

    fn class(&self) -> ParserClass {
        ParserClass::Global
    }

    fn priority(&self) -> i32 {
        35
    }

    fn prefilter(&self, msg: &RawMessage) -> bool {
        WPT_PATTERN.is_match(&msg.text)
    }

    fn parse(&self, msg: &RawMessage) -> Option<ParsedMessage> {
        let caps = WPT_PATTERN.captures(&msg.text)?;
        Some(ParsedMessage::WaypointPosition(WaypointPositionResult {
            message_id: msg.id,
            waypoint: caps[1].to_string(),
            eta_hhmm: caps.get(2).map(|m| m.as_str().to_string()),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pulls_waypoint_and_eta() {
        let msg = RawMessage::for_test("80", "OVER WPTA AT 1234 FL350");
        let p = WaypointPositionParser;
        assert!(p.prefilter(&msg));
        let r = p.parse(&msg).expect("should parse");
        match r {
            ParsedMessage::WaypointPosition(w) => {
                assert_eq!(w.waypoint, "WPTA");
                assert_eq!(w.eta_hhmm.as_deref(), Some("1234"));
            }
            _ => panic!("wrong variant"),
        }
    }

    #[test]
    fn garbled_body_never_panics() {
        let msg = RawMessage::for_test("80", "OVER \u{0}\u{1}");
        let _ = WaypointPositionParser.parse(&msg);
    }
}
