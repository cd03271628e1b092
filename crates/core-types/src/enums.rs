use serde::{Deserialize, Serialize};
use std::fmt;

/// The qualitative label attached to a single year's growth rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ranking {
    Exceptional,
    Good,
    Poor,
}

impl Ranking {
    pub fn as_str(&self) -> &'static str {
        match self {
            Ranking::Exceptional => "Exceptional",
            Ranking::Good => "Good",
            Ranking::Poor => "Poor",
        }
    }
}

impl fmt::Display for Ranking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the least volatile economy of a comparison is described.
///
/// Both labels are given to the same entities (the minimum dispersion holders);
/// the label only reflects whether that minimum is itself low in absolute terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stability {
    MostStable,
    LeastRisky,
}

impl Stability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stability::MostStable => "most stable",
            Stability::LeastRisky => "least risky",
        }
    }
}

impl fmt::Display for Stability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
