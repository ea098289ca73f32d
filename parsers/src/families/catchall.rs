//! Last-resort keyword sweep: runs only when every other parser declined.
//! Produces a `MediaAdvisory` result carrying whatever free text the message
//! had, so nothing observed by the bus is silently dropped from the
//! analytic store.
//!

use acars_formats::{MediaAdvisoryResult, ParsedMessage, RawMessage};

use crate::{Parser, ParserClass};

#[derive(Debug)]
pub struct GenericKeywordParser;

impl Parser for GenericKeywordParser {
    fn name(&self) -> &'static str {
        "catchall"
    }

    fn class(&self) -> ParserClass {
        ParserClass::CatchAll
    }

    fn priority(&self) -> i32 {
        100
    }

    fn prefilter(&self, _msg: &RawMessage) -> bool {
        true
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
    fn always_prefiltered_in() {
        let msg = RawMessage::for_test("ZZ", "anything at all");
        assert!(GenericKeywordParser.prefilter(&msg));
        assert!(GenericKeywordParser.parse(&msg).is_some());
    }

    #[test]
    fn empty_body_yields_none() {
        let msg = RawMessage::for_test("ZZ", "   ");
        assert!(GenericKeywordParser.parse(&msg).is_none());
    }
}
