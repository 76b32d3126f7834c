use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Last-modified bucket offered by the filter panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LastModified {
    #[default]
    All,
    Today,
    Yesterday,
    #[serde(rename = "Last 7 Days")]
    Last7Days,
    #[serde(rename = "Last 30 Days")]
    Last30Days,
}

impl LastModified {
    pub const ALL: [LastModified; 5] = [
        LastModified::All,
        LastModified::Today,
        LastModified::Yesterday,
        LastModified::Last7Days,
        LastModified::Last30Days,
    ];

    pub fn label(self) -> &'static str {
        match self {
            LastModified::All => "All",
            LastModified::Today => "Today",
            LastModified::Yesterday => "Yesterday",
            LastModified::Last7Days => "Last 7 Days",
            LastModified::Last30Days => "Last 30 Days",
        }
    }
}

impl fmt::Display for LastModified {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for LastModified {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LastModified::ALL
            .into_iter()
            .find(|bucket| bucket.label() == s)
            .ok_or_else(|| AppError::BadRequest(format!("Unknown last-modified bucket: {}", s)))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseFilters {
    /// Carried for the filter panel; the course filter ignores it.
    #[serde(rename = "type")]
    pub types: Vec<String>,
    pub min_units: Option<u32>,
    pub max_units: Option<u32>,
    pub last_modified: LastModified,
}
