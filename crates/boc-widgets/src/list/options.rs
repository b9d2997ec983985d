use serde::{Deserialize, Serialize};

/// Behaviour switches of a [`BocList`](super::BocList).
///
/// Every field has a default, so a host can load a partial document:
///
/// ```rust,ignore
/// let options: ListOptions = serde_json::from_str(r#"{ "page_size": 20 }"#)?;
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListOptions {
    /// Rows per page; `0` disables paging.
    pub page_size: usize,
    pub enable_sorting: bool,
    /// When off, the sorting order holds at most one entry.
    pub enable_multiple_sorting: bool,
    pub row_edit_mode_enabled: bool,
    pub list_edit_mode_enabled: bool,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            page_size: 0,
            enable_sorting: true,
            enable_multiple_sorting: true,
            row_edit_mode_enabled: true,
            list_edit_mode_enabled: true,
        }
    }
}
