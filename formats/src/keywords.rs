//! Keyword-anchored field pullers: small regexes anchored on literal markers
//! that show up across PDC, ATIS and clearance-style free text. Several
//! patterns are tried in order for a given field; the first one that
//! captures wins.
//!

use once_cell::sync::Lazy;
use regex::Regex;

fn word_number_to_digit(word: &str) -> Option<char> {
    Some(match word.to_ascii_uppercase().as_str() {
        "ONE" => '1',
        "TWO" => '2',
        "THREE" => '3',
        "FOUR" => '4',
        "FIVE" => '5',
        "SIX" => '6',
        "SEVEN" => '7',
        "EIGHT" => '8',
        "NINE" => '9',
        _ => return None,
    })
}

static RUNWAY_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"\bRWY\s*(\d{1,2}[LRC]?)\b").unwrap(),
        Regex::new(r"\bOFF\s+(?:RWY\s+)?(\d{1,2}[LRC]?)\b").unwrap(),
        Regex::new(r"\bRUNWAY\s+(\d{1,2}[LRC]?)\b").unwrap(),
    ]
});

/// Pull a runway designator (e.g. `34L`) out of free text, trying each
/// anchor pattern in order and returning the first match.
///
pub fn extract_runway(text: &str) -> Option<String> {
    RUNWAY_PATTERNS
        .iter()
        .find_map(|re| re.captures(text))
        .map(|c| c[1].to_string())
}

static SID_LETTERS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bVIA\s+([A-Z]{3,6}\d[A-Z]?)\s+DEP\b").unwrap());
static SID_WORDS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b([A-Z]{3,6})\s+(ONE|TWO|THREE|FOUR|FIVE|SIX|SEVEN|EIGHT|NINE)\s+DEP\b").unwrap()
});

/// Pull a SID (Standard Instrument Departure) identifier out of free text,
/// handling both the letters+digit form (`RIC6`) and word-numbered form
/// (`SANEG TWO DEP` -> `SANEG2`).
///
pub fn extract_sid(text: &str) -> Option<String> {
    if let Some(c) = SID_LETTERS.captures(text) {
        return Some(c[1].to_string());
    }
    if let Some(c) = SID_WORDS.captures(text) {
        let digit = word_number_to_digit(&c[2])?;
        return Some(format!("{}{}", &c[1], digit));
    }
    None
}

static SQUAWK_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:SQUAWK|XPNDR)\s*(\d{4})\b").unwrap());

/// Pull a 4-digit octal transponder code, anchored on `SQUAWK` or `XPNDR`.
pub fn extract_squawk(text: &str) -> Option<String> {
    SQUAWK_PATTERN.captures(text).map(|c| c[1].to_string())
}

static DEP_FREQ_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bDEP\s+FREQ\s*(\d{3}\.\d{1,3})\b").unwrap());

/// Pull a departure frequency, anchored on `DEP FREQ`.
pub fn extract_dep_freq(text: &str) -> Option<String> {
    DEP_FREQ_PATTERN.captures(text).map(|c| c[1].to_string())
}

static FLIGHT_LEVEL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bFL\s*(\d{2,3})\b").unwrap());
static ALT_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bALT\s*(\d{3,5})\b").unwrap());

/// Pull an assigned flight level (`FL350` -> `"350"`), falling back to a
/// plain `ALT` marker for an altitude in feet.
pub fn extract_flight_level(text: &str) -> Option<String> {
    FLIGHT_LEVEL_PATTERN
        .captures(text)
        .map(|c| c[1].to_string())
        .or_else(|| ALT_PATTERN.captures(text).map(|c| c[1].to_string()))
}

static ATIS_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bATIS\s+([A-Z])\b").unwrap());

/// Pull the single-letter ATIS code ("information X").
pub fn extract_atis_letter(text: &str) -> Option<char> {
    ATIS_PATTERN.captures(text).and_then(|c| c[1].chars().next())
}

static EXP_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bEXP\s+([A-Z0-9]{2,10})\b").unwrap());

/// Pull an "expect" clearance token (runway, procedure, ...) anchored on
/// `EXP`.
pub fn extract_expect(text: &str) -> Option<String> {
    EXP_PATTERN.captures(text).map(|c| c[1].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runway_variants() {
        assert_eq!(extract_runway("OFF RWY 34L AT 1200"), Some("34L".into()));
        assert_eq!(extract_runway("RUNWAY 16 IN USE"), Some("16".into()));
        assert_eq!(extract_runway("NO RUNWAY HERE"), None);
    }

    #[test]
    fn sid_letters_and_word_number() {
        assert_eq!(extract_sid("VIA RIC6 DEP"), Some("RIC6".into()));
        assert_eq!(extract_sid("SANEG TWO DEP RWY 34L"), Some("SANEG2".into()));
        assert_eq!(extract_sid("NO SID HERE"), None);
    }

    #[test]
    fn squawk_and_freq() {
        assert_eq!(extract_squawk("SQUAWK 4302 DEP FREQ 124.350"), Some("4302".into()));
        assert_eq!(extract_dep_freq("SQUAWK 4302 DEP FREQ 124.350"), Some("124.350".into()));
        assert_eq!(extract_squawk("XPNDR 0421"), Some("0421".into()));
    }

    #[test]
    fn flight_level_and_atis() {
        assert_eq!(extract_flight_level("CLIMB FL350"), Some("350".into()));
        assert_eq!(extract_atis_letter("ATIS Q 1200Z"), Some('Q'));
    }
}
