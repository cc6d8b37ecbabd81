use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::Display;

const WIRE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];
const WIRE_FORMAT_OUT: &str = "%Y-%m-%dT%H:%M:%S";
const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Creation time of a comment as the service reports it.
///
/// The service sends an ISO local date-time, or `"-"` when it does not know.
/// Anything that doesn't parse is kept verbatim so it can still be shown.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub enum Timestamp {
    #[default]
    Missing,
    At(NaiveDateTime),
    Verbatim(String),
}

impl Timestamp {
    pub fn parse(s: &str) -> Self {
        WIRE_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
            .map(Timestamp::At)
            .unwrap_or_else(|| Timestamp::Verbatim(s.to_string()))
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Timestamp::Missing => Ok(()),
            Timestamp::At(ts) => write!(f, "{}", ts.format(DISPLAY_FORMAT)),
            Timestamp::Verbatim(s) => write!(f, "{s}"),
        }
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<String>::deserialize(deserializer)? {
            Some(s) => Timestamp::parse(&s),
            None => Timestamp::Missing,
        })
    }
}

impl Serialize for Timestamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Timestamp::Missing => serializer.serialize_none(),
            Timestamp::At(ts) => {
                serializer.serialize_str(&ts.format(WIRE_FORMAT_OUT).to_string())
            }
            Timestamp::Verbatim(s) => serializer.serialize_str(s),
        }
    }
}
