//! Flight-number / callsign normalisation.
//!

/// Return the numeric suffix of a carrier-prefixed flight number token (the
/// longest trailing run of ASCII digits), or an empty string if there is
/// none. `QFA1255` -> `"1255"`, `QF1255` -> `"1255"`, `QF1255A` -> `""`
/// (trailing letter breaks the digit run — callers normalise the callsign
/// before calling this if a trailing letter suffix is expected separately).
///
pub fn numeric_suffix(token: &str) -> &str {
    let bytes = token.as_bytes();
    let mut end = bytes.len();
    let mut start = end;
    while start > 0 && bytes[start - 1].is_ascii_digit() {
        start -= 1;
    }
    if start == end {
        return "";
    }
    // Only the trailing run counts, so if nothing trails after it, this is it.
    &token[start..end]
}

/// Normalise a raw callsign/flight-number hint: uppercase, trim whitespace.
/// Does not attempt carrier-code resolution; see [`numeric_suffix`] for the
/// fuzzy-merge key extraction used by the enrichment store.
///
pub fn normalise_callsign(raw: &str) -> String {
    raw.trim().to_ascii_uppercase()
}

/// Whether `a` and `b` are the same flight under carrier-code-family fuzzy
/// matching: same numeric suffix, differing only in the length of the
/// alphabetic carrier-code prefix (2-letter IATA vs 3-letter ICAO).
///
pub fn same_flight_family(a: &str, b: &str) -> bool {
    let (a, b) = (normalise_callsign(a), normalise_callsign(b));
    if a == b {
        return true;
    }
    let sa = numeric_suffix(&a);
    let sb = numeric_suffix(&b);
    !sa.is_empty() && sa == sb
}

/// Of two callsigns sharing a numeric suffix, return the longer one — the
/// ICAO (3-letter prefix) form is preferred over the IATA (2-letter) form
/// because it is strictly longer for an identical suffix.
///
pub fn longer_callsign<'a>(a: &'a str, b: &'a str) -> &'a str {
    if b.len() > a.len() {
        b
    } else {
        a
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_trailing_digits() {
        assert_eq!(numeric_suffix("QFA1255"), "1255");
        assert_eq!(numeric_suffix("QF1255"), "1255");
        assert_eq!(numeric_suffix("QF"), "");
        assert_eq!(numeric_suffix(""), "");
    }

    #[test]
    fn family_match_ignores_prefix_length() {
        assert!(same_flight_family("QF1255", "QFA1255"));
        assert!(!same_flight_family("QF1255", "QF1256"));
        assert!(same_flight_family("QF1255", "QF1255"));
    }

    #[test]
    fn longer_wins() {
        assert_eq!(longer_callsign("QF1255", "QFA1255"), "QFA1255");
        assert_eq!(longer_callsign("QFA1255", "QF1255"), "QFA1255");
    }
}
