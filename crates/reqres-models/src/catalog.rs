//! Color catalog payloads served by `GET /api/unknown`.

use serde::{Deserialize, Serialize};

use crate::SupportInfo;

/// One entry of the color catalog.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ColorRecord {
    /// Numeric identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    /// Color name, e.g. `"cerulean"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Year the color was picked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u32>,

    /// Hex value, e.g. `"#98B2D1"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    /// Pantone reference, e.g. `"15-4020"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pantone_value: Option<String>,
}

/// Paginated envelope around the color catalog.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UnknownListResponse {
    /// Current page number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    /// Page size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,

    /// Total number of entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u32>,

    /// Total number of pages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<u32>,

    /// Entries on this page. Missing or `null` reads as empty.
    #[serde(default, deserialize_with = "crate::lenient::null_as_default")]
    pub data: Vec<ColorRecord>,

    /// Support footer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub support: Option<SupportInfo>,
}

impl UnknownListResponse {
    /// Hex values of the entries on this page, in order.
    ///
    /// Entries without a `color` field are skipped.
    pub fn colors(&self) -> Vec<&str> {
        self.data
            .iter()
            .filter_map(|record| record.color.as_deref())
            .collect()
    }
}
