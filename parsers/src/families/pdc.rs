//! Pre-Departure Clearance (PDC), content-addressed: triggered by the
//! presence of "CLRD" or "CLEARED" anywhere in the body.
//!

use acars_formats::{
    extract_dep_freq, extract_flight_level, extract_runway, extract_sid, extract_squawk,
    iata_to_icao, is_valid_icao, normalise_callsign, PdcResult, ParsedMessage, RawMessage,
};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::{Parser, ParserClass};

static FM_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bFM[/\s]+([A-Z]{3,4})\b").unwrap());
static TO_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bTO[/\s]+([A-Z]{3,4})\b").unwrap());
static FLIGHT_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([A-Z]{2,3}\d{1,4}[A-Z]?)\b").unwrap());

fn resolve_airport_token(token: &str) -> Option<String> {
    let token = token.to_ascii_uppercase();
    if token.len() == 4 && is_valid_icao(&token) {
        return Some(token);
    }
    if token.len() == 3 {
        return iata_to_icao(&token).map(str::to_string);
    }
    None
}

#[derive(Debug)]
pub struct PdcParser;

impl Parser for PdcParser {
    fn name(&self) -> &'static str {
        "pdc"
    }

    fn class(&self) -> ParserClass {
        ParserClass::Global
    }

    fn priority(&self) -> i32 {
        10
    }

    fn prefilter(&self, msg: &RawMessage) -> bool {
        msg.text.contains("CLRD") || msg.text.contains("CLEARED")
    }

    fn parse(&self, msg: &RawMessage) -> Option<ParsedMessage> {
        let text = &msg.text;

        let flight_number = FLIGHT_TOKEN
            .captures(text)
            .map(|c| normalise_callsign(&c[1]))
            .or_else(|| msg.flight_hint.as_ref().map(|h| normalise_callsign(h)));

        let origin = FM_TOKEN
            .captures(text)
            .and_then(|c| resolve_airport_token(&c[1]));
        let destination = TO_TOKEN
            .captures(text)
            .and_then(|c| resolve_airport_token(&c[1]));
        let runway = extract_runway(text);
        let sid = extract_sid(text);
        let squawk = extract_squawk(text);
        let dep_freq = extract_dep_freq(text);
        let assigned_fl = extract_flight_level(text);
        let route = sid.as_ref().map(|s| vec![s.clone()]);

        if flight_number.is_none()
            && origin.is_none()
            && destination.is_none()
            && runway.is_none()
            && sid.is_none()
            && squawk.is_none()
            && dep_freq.is_none()
            && assigned_fl.is_none()
        {
            return None;
        }

        Some(ParsedMessage::Pdc(PdcResult {
            message_id: msg.id,
            flight_number,
            origin,
            destination,
            runway,
            sid,
            squawk,
            dep_freq,
            assigned_fl,
            route,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pulls_partial_clearance_fields() {
        let msg = RawMessage::for_test(
            "H1",
            "QF008 CLRD FM YSSY TO KLAX VIA RIC6 DEP OFF RWY 34L SQUAWK 4302 DEP FREQ 124.350 FL350",
        );
        let p = PdcParser;
        assert!(p.prefilter(&msg));
        let r = p.parse(&msg).expect("should parse");
        match r {
            ParsedMessage::Pdc(pdc) => {
                assert_eq!(pdc.origin.as_deref(), Some("YSSY"));
                assert_eq!(pdc.destination.as_deref(), Some("KLAX"));
                assert_eq!(pdc.runway.as_deref(), Some("34L"));
                assert_eq!(pdc.sid.as_deref(), Some("RIC6"));
                assert_eq!(pdc.squawk.as_deref(), Some("4302"));
            }
            _ => panic!("wrong variant"),
        }
    }

    #[test]
    fn no_trigger_no_result() {
        let msg = RawMessage::for_test("H1", "JUST SOME RANDOM TEXT");
        let p = PdcParser;
        assert!(!p.prefilter(&msg));
    }

    #[test]
    fn garbled_body_never_panics() {
        let msg = RawMessage::for_test("H1", "CLRD \u{0}\u{1}\u{2} garbage \\xFF");
        let p = PdcParser;
        let _ = p.parse(&msg);
    }
}
