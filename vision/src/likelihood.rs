//! Likelihood categories reported per emotion per face, and the fixed
//! weights used to average them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Categorical likelihood returned by the annotate endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Likelihood {
    VeryLikely,
    Likely,
    Possible,
    Unlikely,
    VeryUnlikely,
}

impl Likelihood {
    pub const ALL: [Likelihood; 5] = [
        Likelihood::VeryLikely,
        Likelihood::Likely,
        Likelihood::Possible,
        Likelihood::Unlikely,
        Likelihood::VeryUnlikely,
    ];

    /// Numeric weight of this category.
    pub const fn weight(self) -> f64 {
        match self {
            Likelihood::VeryLikely => 0.9,
            Likelihood::Likely => 0.75,
            Likelihood::Possible => 0.5,
            Likelihood::Unlikely => 0.25,
            Likelihood::VeryUnlikely => 0.0,
        }
    }

    /// Wire name, e.g. `VERY_LIKELY`.
    pub const fn category(self) -> &'static str {
        match self {
            Likelihood::VeryLikely => "VERY_LIKELY",
            Likelihood::Likely => "LIKELY",
            Likelihood::Possible => "POSSIBLE",
            Likelihood::Unlikely => "UNLIKELY",
            Likelihood::VeryUnlikely => "VERY_UNLIKELY",
        }
    }

    /// Look up a wire name. `UNKNOWN` and anything else off the scale
    /// yields `None`.
    pub fn from_category(category: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.category() == category)
    }
}

impl fmt::Display for Likelihood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.category())
    }
}
