use std::{fmt::Display, str::FromStr};

use chrono_tz::{Australia, Pacific, Tz};
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    Melbourne,
    NewZealand,
}

impl Region {
    pub const ALL: [Region; 2] = [Region::Melbourne, Region::NewZealand];

    /// Wall clock used to decide whether a cafe in this region is open.
    pub fn timezone(&self) -> Tz {
        match self {
            Region::Melbourne => Australia::Melbourne,
            Region::NewZealand => Pacific::Auckland,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Melbourne => "melbourne",
            Region::NewZealand => "new_zealand",
        }
    }
}

impl Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "melbourne" | "mel" => Ok(Region::Melbourne),
            "new_zealand" | "newzealand" | "nz" => Ok(Region::NewZealand),
            other => Err(format!("Unknown region '{}'", other)),
        }
    }
}
