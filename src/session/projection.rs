use crate::calculator::AngleMode;
use serde::Serialize;

/// What the host renders after every event.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Projection {
    pub display_text: String,
    pub is_error: bool,
    pub angle_mode: AngleMode,
    pub has_memory_value: bool,
}
