//! Media advisory: free-text company messages (weather links, crew notes).
//! Lowest non-catch-all priority: it accepts almost anything, so every other
//! global parser gets first refusal.
//!

use acars_formats::{MediaAdvisoryResult, ParsedMessage, RawMessage};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::{Parser, ParserClass};

static MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(ADVZY|COMPANY MSG)\b").unwrap());

#[derive(Debug)]
pub struct MediaAdvisoryParser;

impl Parser for MediaAdvisoryParser {
    fn name(&self) -> &'static str {
        "media_advisory"
    }

    fn class(&self) -> ParserClass {
        ParserClass::Global
    }

    fn priority(&self) -> i32 {
        90
    }

    fn prefilter(&self, msg: &RawMessage) -> bool {
        MARKER.is_match(&msg.text)
    }

    fn parse(&self, msg: &RawMessage) -> Option<ParsedMessage> {
        if msg.text.trim().is_empty() {
            return None;
        }
        Some(ParsedMessage::MediaAdvisory(MediaAdvisoryResult {
            message_id: msg.id,
            text: msg.text.clone(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_raw_advisory_text() {
        let msg = RawMessage::for_test("H1", "ADVZY CREW CHANGE AT GATE");
        let p = MediaAdvisoryParser;
        assert!(p.prefilter(&msg));
        assert!(p.parse(&msg).is_some());
    }

    #[test]
    fn garbled_body_never_panics() {
        let msg = RawMessage::for_test("H1", "ADVZY \u{0}\u{1}");
        let _ = MediaAdvisoryParser.parse(&msg);
    }
}
