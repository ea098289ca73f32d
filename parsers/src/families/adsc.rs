//! ADS-C (`B6`): TLV binary decode. The body is a hex-encoded octet stream;
//! each tag is one byte, each length is one byte, and tags not recognised
//! here are skipped rather than rejected.
//!

use acars_formats::{AdscResult, MetBlock, ParsedMessage, RawMessage};

use crate::{Parser, ParserClass};

const TAG_POSITION: u8 = 11;
const TAG_MET: u8 = 16;
const TAG_EARTH_REF: u8 = 14;
const TAG_AIR_REF: u8 = 15;
const TAG_ROUTE: u8 = 13;
const TAG_FLIGHT_ID: u8 = 12;
const TAG_AIRFRAME_ID: u8 = 17;

fn decode_position(bytes: &[u8]) -> Option<(f64, f64, i32)> {
    if bytes.len() < 10 {
        return None;
    }
    let lat_raw = i32::from_be_bytes(bytes[0..4].try_into().ok()?);
    let lon_raw = i32::from_be_bytes(bytes[4..8].try_into().ok()?);
    let alt_hundred_ft = u16::from_be_bytes(bytes[8..10].try_into().ok()?) as i32;
    Some((
        lat_raw as f64 / 1_000_000.0,
        lon_raw as f64 / 1_000_000.0,
        alt_hundred_ft * 100,
    ))
}

fn decode_met(bytes: &[u8]) -> Option<MetBlock> {
    if bytes.len() < 5 {
        return None;
    }
    Some(MetBlock {
        wind_direction_deg: u16::from_be_bytes(bytes[0..2].try_into().ok()?),
        wind_speed_kt: u16::from_be_bytes(bytes[2..4].try_into().ok()?),
        temperature_c: bytes[4] as i16 - 50,
    })
}

fn decode_route(bytes: &[u8]) -> Vec<String> {
    bytes
        .chunks(4)
        .filter(|c| c.len() == 4)
        .filter_map(|c| std::str::from_utf8(c).ok())
        .map(|s| s.trim_end_matches('\0').to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Walk the TLV stream, ignoring any tag this decoder doesn't recognise and
/// stopping cleanly on a truncated trailing record rather than erroring.
///
fn decode_tlv(bytes: &[u8]) -> AdscResult {
    let mut result = AdscResult::default();
    let mut i = 0;
    while i + 2 <= bytes.len() {
        let tag = bytes[i];
        let len = bytes[i + 1] as usize;
        let start = i + 2;
        let end = start + len;
        if end > bytes.len() {
            break;
        }
        let value = &bytes[start..end];
        match tag {
            TAG_POSITION => {
                if let Some((lat, lon, alt)) = decode_position(value) {
                    result.lat = Some(lat);
                    result.lon = Some(lon);
                    result.altitude_ft = Some(alt);
                }
            }
            TAG_MET => result.met = decode_met(value),
            TAG_EARTH_REF => result.earth_reference = std::str::from_utf8(value).ok().map(str::to_string),
            TAG_AIR_REF => result.air_reference = std::str::from_utf8(value).ok().map(str::to_string),
            TAG_ROUTE => {
                let route = decode_route(value);
                if !route.is_empty() {
                    result.predicted_route = Some(route);
                }
            }
            TAG_FLIGHT_ID => result.flight_id = std::str::from_utf8(value).ok().map(str::to_string),
            TAG_AIRFRAME_ID => result.airframe_id = std::str::from_utf8(value).ok().map(str::to_string),
            _ => {}
        }
        i = end;
    }
    result
}

#[derive(Debug)]
pub struct AdscParser;

impl Parser for AdscParser {
    fn name(&self) -> &'static str {
        "adsc"
    }

    fn labels(&self) -> &'static [&'static str] {
        &["B6"]
    }

    fn class(&self) -> ParserClass {
        ParserClass::LabelBound
    }

    fn priority(&self) -> i32 {
        10
    }

    fn prefilter(&self, msg: &RawMessage) -> bool {
        !msg.text.trim().is_empty() && msg.text.trim().bytes().all(|b| b.is_ascii_hexdigit())
    }

    fn parse(&self, msg: &RawMessage) -> Option<ParsedMessage> {
        let bytes = hex::decode(msg.text.trim()).ok()?;
        let mut result = decode_tlv(&bytes);
        if result.lat.is_none()
            && result.met.is_none()
            && result.earth_reference.is_none()
            && result.air_reference.is_none()
            && result.predicted_route.is_none()
            && result.flight_id.is_none()
            && result.airframe_id.is_none()
        {
            return None;
        }
        result.message_id = msg.id;
        Some(ParsedMessage::Adsc(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_tlv(tag: u8, value: &[u8]) -> Vec<u8> {
        let mut v = vec![tag, value.len() as u8];
        v.extend_from_slice(value);
        v
    }

    #[test]
    fn decodes_position_and_met_tags() {
        let mut raw = Vec::new();
        let mut pos = Vec::new();
        pos.extend_from_slice(&34_230_000i32.to_be_bytes());
        pos.extend_from_slice(&(-151_391_700i32).to_be_bytes());
        pos.extend_from_slice(&350u16.to_be_bytes());
        raw.extend(encode_tlv(TAG_POSITION, &pos));
        raw.extend(encode_tlv(TAG_MET, &[0, 90, 0, 40, 70]));
        let hex_body = hex::encode_upper(&raw);
        let msg = RawMessage::for_test("B6", &hex_body);

        let p = AdscParser;
        assert!(p.prefilter(&msg));
        let r = p.parse(&msg).expect("should parse");
        match r {
            ParsedMessage::Adsc(a) => {
                assert!((a.lat.unwrap() - 34.23).abs() < 0.001);
                assert_eq!(a.altitude_ft, Some(35000));
                assert_eq!(a.met.unwrap().wind_speed_kt, 40);
            }
            _ => panic!("wrong variant"),
        }
    }

    #[test]
    fn truncated_tlv_never_panics() {
        let msg = RawMessage::for_test("B6", "01FF00");
        let _ = AdscParser.parse(&msg);
    }

    #[test]
    fn non_hex_body_rejected_by_prefilter() {
        let msg = RawMessage::for_test("B6", "not hex at all");
        assert!(!AdscParser.prefilter(&msg));
    }
}
