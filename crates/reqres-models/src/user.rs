//! User resource payloads.

use serde::{Deserialize, Serialize};

use crate::SupportInfo;

/// Body of `POST /api/users`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserCreateRequest {
    /// Display name of the new user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Job title of the new user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job: Option<String>,
}

impl UserCreateRequest {
    /// Creates a request body with both fields set.
    pub fn new(name: impl Into<String>, job: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            job: Some(job.into()),
        }
    }
}

/// Response of `POST /api/users`.
///
/// The service echoes `name` and `job` and assigns `id` and `createdAt`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserCreateResponse {
    /// Echoed name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Echoed job.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job: Option<String>,

    /// Server-assigned identifier. Usually a string on the wire; a bare
    /// number is read as its decimal text.
    #[serde(
        default,
        deserialize_with = "crate::lenient::string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,

    /// Server-assigned creation timestamp.
    #[serde(
        default,
        rename = "createdAt",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<String>,
}

/// A single user as listed by the service.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserRecord {
    /// Numeric identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    /// E-mail address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Given name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    /// Family name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    /// Avatar image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// Response of `GET /api/users/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserByIdResponse {
    /// The requested user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<UserRecord>,

    /// Support footer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub support: Option<SupportInfo>,
}

impl UserByIdResponse {
    /// Given name of the wrapped user, if present.
    pub fn first_name(&self) -> Option<&str> {
        self.data.as_ref()?.first_name.as_deref()
    }

    /// Family name of the wrapped user, if present.
    pub fn last_name(&self) -> Option<&str> {
        self.data.as_ref()?.last_name.as_deref()
    }
}

/// Paginated response of `GET /api/users` (also used with `?delay=n`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UsersPageResponse {
    /// Current page number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    /// Page size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,

    /// Total number of users.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u32>,

    /// Total number of pages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<u32>,

    /// Users on this page. Missing or `null` reads as empty.
    #[serde(default, deserialize_with = "crate::lenient::null_as_default")]
    pub data: Vec<UserRecord>,

    /// Support footer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub support: Option<SupportInfo>,
}
