//! The `support` footer attached to every envelope.

use serde::{Deserialize, Serialize};

/// Constant footer the service appends to envelopes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SupportInfo {
    /// Link to the support section.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Free-form support text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}
