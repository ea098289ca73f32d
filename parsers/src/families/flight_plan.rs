//! Flight plan (`H1 FPN/...`): origin/destination and the ordered waypoint
//! list, content-addressed on the `FPN/` marker.
//!

use acars_formats::{FlightPlanResult, ParsedMessage, RawMessage, WaypointConstraint};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::{Parser, ParserClass};

static FPN_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bFPN/").unwrap());
static ROUTE_PAIR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b([A-Z]{4})/([A-Z]{4})\b").unwrap());
static WAYPOINT_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b([A-Z]{3,5})(?:/(\d{2,3}))?(?:/(\d{2,3}))?\b").unwrap());

#[derive(Debug)]
pub struct FlightPlanParser;

impl Parser for FlightPlanParser {
    fn name(&self) -> &'static str {
        "flight_plan"
    }

    fn class(&self) -> ParserClass {
        ParserClass::Global
    }

    fn priority(&self) -> i32 {
        15
    }

    fn prefilter(&self, msg: &RawMessage) -> bool {
        FPN_MARKER.is_match(&msg.text)
    }

    fn parse(&self, msg: &RawMessage) -> Option<ParsedMessage> {
        let text = &msg.text;
        let marker = FPN_MARKER.find(text)?;
        let body = &text[marker.end()..];

        let (origin, destination) = match ROUTE_PAIR.captures(body) {
            Some(c) => (Some(c[1].to_string()), Some(c[2].to_string())),
            None => (None, None),
        };

        let waypoints: Vec<WaypointConstraint> = WAYPOINT_TOKEN
            .captures_iter(body)
            .map(|c| WaypointConstraint {
                name: c[1].to_string(),
                altitude_ft: c.get(2).and_then(|m| m.as_str().parse::<i32>().ok()).map(|fl| fl * 100),
                speed_kt: c.get(3).and_then(|m| m.as_str().parse::<i32>().ok()),
            })
            .filter(|w| Some(w.name.as_str()) != origin.as_deref() && Some(w.name.as_str()) != destination.as_deref())
            .collect();

        if origin.is_none() && destination.is_none() && waypoints.is_empty() {
            return None;
        }

        Some(ParsedMessage::FlightPlan(FlightPlanResult {
            message_id: msg.id,
            origin,
            destination,
            waypoints,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pulls_route_and_waypoints() {
        let msg = RawMessage::for_test("H1", "FPN/YSSY/KLAX WPTA/350 WPTB/360/480");
        let p = FlightPlanParser;
        assert!(p.prefilter(&msg));
        let r = p.parse(&msg).expect("should parse");
        match r {
            ParsedMessage::FlightPlan(fp) => {
                assert_eq!(fp.origin.as_deref(), Some("YSSY"));
                assert_eq!(fp.destination.as_deref(), Some("KLAX"));
                assert!(fp.waypoints.iter().any(|w| w.name == "WPTA"));
            }
            _ => panic!("wrong variant"),
        }
    }

    #[test]
    fn no_marker_no_trigger() {
        let msg = RawMessage::for_test("H1", "SOME OTHER TEXT");
        assert!(!FlightPlanParser.prefilter(&msg));
    }

    #[test]
    fn garbled_body_never_panics() {
        let msg = RawMessage::for_test("H1", "FPN/\u{0}\u{1} garbage");
        let _ = FlightPlanParser.parse(&msg);
    }
}
