//! Million and billion scales.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A unit name that is neither millions nor billions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown magnitude unit '{0}', expected \"Mio\" or \"Mrd\"")]
pub struct MagnitudeUnitError(pub String);

/// Scale of a magnitude figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MagnitudeUnit {
    /// `Mio`, `M`, `million`.
    Million,
    /// `Mrd`, `B`, `bn`, `billion`.
    Billion,
}

/// Unit suffixes, lowercase, with their scale.
const UNIT_TOKENS: &[(&str, MagnitudeUnit)] = &[
    ("mio.", MagnitudeUnit::Million),
    ("mio", MagnitudeUnit::Million),
    ("millionen", MagnitudeUnit::Million),
    ("million", MagnitudeUnit::Million),
    ("millions", MagnitudeUnit::Million),
    ("mn", MagnitudeUnit::Million),
    ("m", MagnitudeUnit::Million),
    ("mrd.", MagnitudeUnit::Billion),
    ("mrd", MagnitudeUnit::Billion),
    ("milliarden", MagnitudeUnit::Billion),
    ("milliarde", MagnitudeUnit::Billion),
    ("billion", MagnitudeUnit::Billion),
    ("billions", MagnitudeUnit::Billion),
    ("bn", MagnitudeUnit::Billion),
    ("b", MagnitudeUnit::Billion),
];

impl MagnitudeUnit {
    /// How many units of this scale make one billion.
    #[must_use]
    pub const fn per_billion(self) -> f64 {
        match self {
            Self::Million => 1000.0,
            Self::Billion => 1.0,
        }
    }

    /// Recognizes a unit suffix, ignoring case.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        let token = token.trim().to_lowercase();
        UNIT_TOKENS.iter().find(|(candidate, _)| *candidate == token).map(|(_, unit)| *unit)
    }
}

impl FromStr for MagnitudeUnit {
    type Err = MagnitudeUnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_token(s).ok_or_else(|| MagnitudeUnitError(s.to_string()))
    }
}

impl fmt::Display for MagnitudeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Million => f.write_str("Mio"),
            Self::Billion => f.write_str("Mrd"),
        }
    }
}
