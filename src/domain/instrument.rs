//! Tracked instruments and the two metrics each exposes.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "web", derive(serde::Serialize, serde::Deserialize))]
pub enum Instrument {
    Gold,
    SP500,
    TenYearTNote,
}

impl Instrument {
    pub const ALL: [Instrument; 3] = [Instrument::Gold, Instrument::SP500, Instrument::TenYearTNote];

    /// Identifier used as the prefix of every column for this instrument.
    pub fn key(self) -> &'static str {
        match self {
            Instrument::Gold => "Gold",
            Instrument::SP500 => "SP500",
            Instrument::TenYearTNote => "TenYearTNote",
        }
    }

    /// Human-facing name shown in selectors.
    pub fn label(self) -> &'static str {
        match self {
            Instrument::Gold => "Gold",
            Instrument::SP500 => "S&P 500",
            Instrument::TenYearTNote => "10 Year T Note",
        }
    }

    /// Column prefixes accepted when reading a dataset header.
    pub fn header_prefixes(self) -> &'static [&'static str] {
        match self {
            Instrument::Gold => &["Gold"],
            Instrument::SP500 => &["SP500"],
            Instrument::TenYearTNote => &["TenYearTNote", "10 Year T Note"],
        }
    }

    /// Name of the level series: a yield for the note, a price otherwise.
    pub fn level_name(self) -> &'static str {
        match self {
            Instrument::TenYearTNote => "Yield",
            _ => "Price",
        }
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Instrument {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace([' ', '-', '_', '&'], "").as_str() {
            "gold" => Ok(Instrument::Gold),
            "sp500" => Ok(Instrument::SP500),
            "tenyeartnote" | "10yeartnote" | "tnote" => Ok(Instrument::TenYearTNote),
            _ => Err(format!("unknown instrument: {s}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "web", derive(serde::Serialize, serde::Deserialize))]
pub enum MetricType {
    #[default]
    Price,
    Return,
}

impl MetricType {
    pub const ALL: [MetricType; 2] = [MetricType::Price, MetricType::Return];

    pub fn key(self) -> &'static str {
        match self {
            MetricType::Price => "price",
            MetricType::Return => "return",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MetricType::Price => "Price(Yield)",
            MetricType::Return => "Return",
        }
    }
}

impl FromStr for MetricType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "price" | "yield" | "price(yield)" => Ok(MetricType::Price),
            "return" | "daily return" | "daily_return" => Ok(MetricType::Return),
            _ => Err(format!("unknown metric type: {s}")),
        }
    }
}
