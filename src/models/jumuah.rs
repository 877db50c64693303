use serde::{Deserialize, Serialize};

use crate::utils::format::ordinal;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JumuahSlot {
    pub id: i64,
    pub khutbah: String,
    /// Time the congregational prayer follows the khutbah, when announced.
    pub prayer: Option<String>,
}

/// Title for the slot at `index` out of `total`: a lone slot is just "Jumu'ah",
/// otherwise they are numbered "1st Jumu'ah", "2nd Jumu'ah", ...
pub fn slot_title(index: usize, total: usize) -> String {
    if total == 1 {
        "Jumu'ah".to_string()
    } else {
        format!("{} Jumu'ah", ordinal(index as u32 + 1))
    }
}
