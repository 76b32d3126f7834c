use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A company or job role as listed in the assignment dialogs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedRef {
    pub id: i64,
    pub name: String,
}

impl NamedRef {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Seats granted per company id.
pub type SeatMap = BTreeMap<i64, u32>;
