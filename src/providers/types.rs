use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    Spotify,
    LastFm,
    YouTube,
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ProviderId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "spotify" => Ok(ProviderId::Spotify),
            "lastfm" => Ok(ProviderId::LastFm),
            "youtube" => Ok(ProviderId::YouTube),
            _ => Err(format!(
                "Invalid provider: '{}'. Valid: spotify, lastfm, youtube",
                s
            )),
        }
    }
}

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::Spotify => "spotify",
            ProviderId::LastFm => "lastfm",
            ProviderId::YouTube => "youtube",
        }
    }
}

/// Time range for "top" queries. Each adapter maps it to its own vocabulary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeWindow {
    /// Roughly the last four weeks
    Short,
    /// A few months
    #[default]
    Medium,
    /// A year or more
    Long,
}
