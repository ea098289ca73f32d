//! Position reports: labels `80`, `16`, `21`, `22`, `83`, `10`, `4J` each
//! carry the same three-field shape (coordinates, altitude, speed) but with
//! their own coordinate encoding. Label `22` uses the DMS (seconds)
//! interpretation explicitly; the rest fall back to the shared
//! length-resolution rule in `acars_formats::coord`.
//!

use acars_formats::coord::{parse_dms_coord, parse_dms_coord_with, Fractional};
use acars_formats::{ParsedMessage, PositionResult, RawMessage};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::{Parser, ParserClass};

static COORD_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([NS])(\d{4,7})\s+([EW])(\d{5,8})").unwrap());
static ALT_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bFL(\d{2,3})\b").unwrap());
static SPD_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bSPD(\d{2,3})\b").unwrap());
static TRK_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bTRK(\d{2,3})\b").unwrap());

#[derive(Debug)]
pub struct PositionParser {
    pub name: &'static str,
    pub labels: &'static [&'static str],
    pub label: &'static str,
    pub priority: i32,
    /// `Some` forces a specific fractional-unit interpretation (label 22's
    /// DMS-seconds requirement); `None` defers to the default length rule.
    pub fractional: Option<Fractional>,
}

impl Parser for PositionParser {
    fn name(&self) -> &'static str {
        self.name
    }

    fn labels(&self) -> &'static [&'static str] {
        self.labels
    }

    fn class(&self) -> ParserClass {
        ParserClass::LabelBound
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn prefilter(&self, msg: &RawMessage) -> bool {
        COORD_PATTERN.is_match(&msg.text)
    }

    fn parse(&self, msg: &RawMessage) -> Option<ParsedMessage> {
        let caps = COORD_PATTERN.captures(&msg.text)?;
        let lat_hemi = caps[1].chars().next().unwrap();
        let lat_token = &caps[2];
        let lon_hemi = caps[3].chars().next().unwrap();
        let lon_token = &caps[4];

        let (lat, lon) = match self.fractional {
            Some(f) => (
                parse_dms_coord_with(lat_token, 2, lat_hemi, f),
                parse_dms_coord_with(lon_token, 3, lon_hemi, f),
            ),
            None => (
                parse_dms_coord(lat_token, 2, lat_hemi),
                parse_dms_coord(lon_token, 3, lon_hemi),
            ),
        };

        let altitude_ft = ALT_PATTERN
            .captures(&msg.text)
            .and_then(|c| c[1].parse::<i32>().ok())
            .map(|fl| fl * 100);
        let speed_kt = SPD_PATTERN
            .captures(&msg.text)
            .and_then(|c| c[1].parse::<i32>().ok());
        let track_deg = TRK_PATTERN
            .captures(&msg.text)
            .and_then(|c| c[1].parse::<f64>().ok());

        Some(ParsedMessage::Position(PositionResult {
            message_id: msg.id,
            source_label: self.label.to_string(),
            lat,
            lon,
            altitude_ft,
            speed_kt,
            track_deg,
        }))
    }
}

/// Labels 15 and 22 are handled separately: 15 needs the hundredths-of-a-
/// minute interpretation (the `fst` family from the original open question),
/// 22 needs the explicit DMS-seconds interpretation.
pub fn all() -> Vec<Box<dyn crate::Parser>> {
    const PLAIN: &[(&str, &str, &[&str])] = &[
        ("position_80", "80", &["80"]),
        ("position_16", "16", &["16"]),
        ("position_21", "21", &["21"]),
        ("position_83", "83", &["83"]),
        ("position_10", "10", &["10"]),
        ("position_4j", "4J", &["4J"]),
    ];
    let mut v: Vec<Box<dyn crate::Parser>> = PLAIN
        .iter()
        .enumerate()
        .map(|(i, (name, label, labels))| {
            Box::new(PositionParser {
                name,
                labels,
                label,
                priority: 20 + i as i32,
                fractional: None,
            }) as Box<dyn crate::Parser>
        })
        .collect();
    v.push(Box::new(PositionParser {
        name: "position_22",
        labels: &["22"],
        label: "22",
        priority: 20,
        fractional: Some(Fractional::Seconds),
    }));
    v.push(Box::new(PositionParser {
        name: "position_15",
        labels: &["15"],
        label: "15",
        priority: 21,
        fractional: Some(Fractional::Hundredths),
    }));
    v
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_coordinates_and_altitude() {
        let msg = RawMessage::for_test("80", "N341348 W1512355 FL350 SPD480 TRK090");
        let p = PositionParser {
            name: "position_80",
            labels: &["80"],
            label: "80",
            priority: 20,
            fractional: None,
        };
        assert!(p.prefilter(&msg));
        let r = p.parse(&msg).expect("should parse");
        match r {
            ParsedMessage::Position(pos) => {
                assert!((pos.lat - 34.230).abs() < 0.01);
                assert_eq!(pos.altitude_ft, Some(35000));
                assert_eq!(pos.speed_kt, Some(480));
                assert_eq!(pos.track_deg, Some(90.0));
            }
            _ => panic!("wrong variant"),
        }
    }

    #[test]
    fn garbled_body_never_panics() {
        let msg = RawMessage::for_test("80", "garbage\u{0}N\u{1}");
        let p = PositionParser {
            name: "position_80",
            labels: &["80"],
            label: "80",
            priority: 20,
            fractional: None,
        };
        assert!(p.parse(&msg).is_none());
    }
}
