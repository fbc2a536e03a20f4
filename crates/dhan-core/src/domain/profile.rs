use serde::{Deserialize, Serialize};

/// Account profile and token validity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Profile {
    pub dhan_client_id: String,
    pub token_validity: String,
    /// Comma separated segments, e.g. `"Equity, Derivative"`.
    pub active_segment: String,
    pub ddpi: String,
    pub mtf: String,
    pub data_plan: String,
    pub data_validity: String,
}

impl Profile {
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.active_segment
            .split(',')
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
    }
}
