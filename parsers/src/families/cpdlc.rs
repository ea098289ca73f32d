//! CPDLC (`AA`): application messages and connection-management messages.
//! Bodies are hex-encoded; the first octet is an element identifier, the
//! rest is an element-specific payload. Only the element table below is
//! understood — anything else decodes to an explicit placeholder rather
//! than failing outright.
//!

use acars_formats::{
    CpdlcConnectKind, CpdlcConnectResult, CpdlcResult, ParsedMessage, RawMessage,
};

use crate::{Parser, ParserClass};

fn element_label(id: u32) -> &'static str {
    match id {
        0x01 => "UM1_EXPECT_CLEARANCE",
        0x02 => "UM3_AT_ALTITUDE",
        0x03 => "UM19_TURN_LEFT_HEADING",
        0x04 => "UM20_TURN_RIGHT_HEADING",
        0x05 => "UM74_MAINTAIN_OWN_SEPARATION",
        0x06 => "DM0_WILCO",
        0x07 => "DM1_UNABLE",
        _ => "UNSUPPORTED_ELEMENT",
    }
}

fn decode_value(id: u32, payload: &[u8]) -> String {
    if element_label(id) == "UNSUPPORTED_ELEMENT" {
        return format!("<unsupported element 0x{id:02X}, {} payload bytes>", payload.len());
    }
    std::str::from_utf8(payload)
        .map(str::to_string)
        .unwrap_or_else(|_| hex::encode_upper(payload))
}

#[derive(Debug)]
pub struct CpdlcParser;

impl Parser for CpdlcParser {
    fn name(&self) -> &'static str {
        "cpdlc"
    }

    fn labels(&self) -> &'static [&'static str] {
        &["AA"]
    }

    fn class(&self) -> ParserClass {
        ParserClass::LabelBound
    }

    fn priority(&self) -> i32 {
        10
    }

    fn prefilter(&self, msg: &RawMessage) -> bool {
        let t = msg.text.trim();
        !t.is_empty() && t.bytes().all(|b| b.is_ascii_hexdigit()) && t.len() >= 2
    }

    fn parse(&self, msg: &RawMessage) -> Option<ParsedMessage> {
        let bytes = hex::decode(msg.text.trim()).ok()?;
        let (id_byte, payload) = bytes.split_first()?;
        let element_id = *id_byte as u32;

        Some(ParsedMessage::Cpdlc(CpdlcResult {
            message_id: msg.id,
            element_id,
            element_label: element_label(element_id).to_string(),
            value: decode_value(element_id, payload),
        }))
    }
}

#[derive(Debug)]
pub struct CpdlcConnectParser;

impl Parser for CpdlcConnectParser {
    fn name(&self) -> &'static str {
        "cpdlc_connect"
    }

    fn class(&self) -> ParserClass {
        ParserClass::Global
    }

    fn priority(&self) -> i32 {
        5
    }

    fn prefilter(&self, msg: &RawMessage) -> bool {
        let t = msg.text.trim();
        t.starts_with("CR1") || t.starts_with("CC1") || t.starts_with("DR1")
    }

    fn parse(&self, msg: &RawMessage) -> Option<ParsedMessage> {
        let t = msg.text.trim();
        let (kind, rest) = if let Some(rest) = t.strip_prefix("CR1") {
            (CpdlcConnectKind::ConnectRequest, rest)
        } else if let Some(rest) = t.strip_prefix("CC1") {
            (CpdlcConnectKind::ConnectConfirm, rest)
        } else if let Some(rest) = t.strip_prefix("DR1") {
            (CpdlcConnectKind::DisconnectRequest, rest)
        } else {
            return None;
        };
        let detail = if rest.trim().is_empty() { None } else { Some(rest.trim().to_string()) };

        Some(ParsedMessage::CpdlcConnect(CpdlcConnectResult {
            message_id: msg.id,
            kind,
            detail,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_known_element() {
        let msg = RawMessage::for_test("AA", "06");
        let p = CpdlcParser;
        assert!(p.prefilter(&msg));
        let r = p.parse(&msg).expect("should parse");
        match r {
            ParsedMessage::Cpdlc(c) => assert_eq!(c.element_label, "DM0_WILCO"),
            _ => panic!("wrong variant"),
        }
    }

    #[test]
    fn unknown_element_yields_placeholder() {
        let msg = RawMessage::for_test("AA", "FFAABBCC");
        let r = CpdlcParser.parse(&msg).expect("should parse");
        match r {
            ParsedMessage::Cpdlc(c) => assert!(c.value.contains("unsupported")),
            _ => panic!("wrong variant"),
        }
    }

    #[test]
    fn connect_request_detected() {
        let msg = RawMessage::for_test("AA", "CR1 LOGON YSSY_CTR");
        let p = CpdlcConnectParser;
        assert!(p.prefilter(&msg));
        let r = p.parse(&msg).expect("should parse");
        match r {
            ParsedMessage::CpdlcConnect(c) => assert_eq!(c.kind, CpdlcConnectKind::ConnectRequest),
            _ => panic!("wrong variant"),
        }
    }

    #[test]
    fn garbled_body_never_panics() {
        let msg = RawMessage::for_test("AA", "not hex");
        assert!(!CpdlcParser.prefilter(&msg));
    }
}
