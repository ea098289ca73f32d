use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 24-bit ICAO aircraft address, rendered as 6 uppercase hex characters.
///
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct IcaoHex(String);

impl IcaoHex {
    pub fn new(s: impl Into<String>) -> Self {
        IcaoHex(s.into().to_ascii_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IcaoHex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for IcaoHex {
    fn from(s: &str) -> Self {
        IcaoHex::new(s)
    }
}

impl From<String> for IcaoHex {
    fn from(s: String) -> Self {
        IcaoHex::new(s)
    }
}

/// The opaque 2-character ACARS label carried by the bus envelope (`H1`,
/// `80`, `B6`, ...). Not guaranteed to predict the body's actual shape.
///
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Label(String);

impl Label {
    pub fn new(s: impl Into<String>) -> Self {
        Label(s.into().to_ascii_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Label {
    fn from(s: &str) -> Self {
        Label::new(s)
    }
}

impl PartialEq<str> for Label {
    fn eq(&self, other: &str) -> bool {
        self.0.eq_ignore_ascii_case(other)
    }
}

/// A single ingested ACARS record, opaque label + free-form body, as received
/// from the bus (after the envelope has been unwrapped).
///
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RawMessage {
    /// Monotonic identifier, used for join-back from parsed results.
    pub id: u64,
    pub timestamp: DateTime<Utc>,
    pub label: Label,
    /// Free-form text body: plain ASCII or tagged-binary hex, not guaranteed
    /// to be well-formed for its declared label.
    pub text: String,
    pub icao_hex: IcaoHex,
    pub tail: Option<String>,
    /// Flight/callsign hint supplied by the bus envelope, if any.
    pub flight_hint: Option<String>,
}

impl RawMessage {
    /// Construct a message for tests, here and in downstream crates — not
    /// `cfg(test)`-gated because other crates' test suites build `RawMessage`
    /// values against the compiled (non-test) `acars-formats` lib.
    pub fn for_test(label: &str, text: &str) -> Self {
        RawMessage {
            id: 0,
            timestamp: Utc::now(),
            label: Label::new(label),
            text: text.to_string(),
            icao_hex: IcaoHex::new("000000"),
            tail: None,
            flight_hint: None,
        }
    }
}
