use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// Display name used when a user has neither a display name nor an email.
pub const UNKNOWN_DISPLAY_NAME: &str = "Unknown";

/// One linked sign-in provider of an account, as held by the identity directory.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProviderInfo {
    pub uid: Option<String>,
    pub provider_id: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub photo_url: Option<String>,
    pub phone_number: Option<String>,
}

/// A user account as held by the identity directory.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserRecord {
    pub uid: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub email_verified: bool,
    pub disabled: bool,
    pub creation_time: Option<DateTime<Utc>>,
    pub last_sign_in_time: Option<DateTime<Utc>>,
    pub provider_data: Vec<ProviderInfo>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, ToSchema)]
pub struct ProviderData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    #[serde(rename = "displayName", skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "photoURL", skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(rename = "providerId")]
    pub provider_id: String,
    #[serde(rename = "phoneNumber", skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

/// The view of a [`UserRecord`] returned to admin callers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserProjection {
    pub uid: String,
    /// Omitted from the JSON when the account has no email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub display_name: String,
    pub email_verified: bool,
    pub disabled: bool,
    /// RFC 1123 timestamp, e.g. `Tue, 01 Jan 2030 00:00:00 GMT`.
    pub creation_time: Option<String>,
    pub last_sign_in_time: Option<String>,
    pub provider_data: Vec<ProviderData>,
}

/// Picks the name shown for a user: the display name, else the local part of
/// the email, else [`UNKNOWN_DISPLAY_NAME`]. Empty values are skipped.
pub fn fallback_display_name(display_name: Option<&str>, email: Option<&str>) -> String {
    if let Some(name) = display_name.filter(|n| !n.is_empty()) {
        return name.to_string();
    }
    email
        .and_then(|e| e.split('@').next())
        .filter(|local| !local.is_empty())
        .unwrap_or(UNKNOWN_DISPLAY_NAME)
        .to_string()
}

pub fn format_http_date(time: &DateTime<Utc>) -> String {
    time.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

impl From<ProviderInfo> for ProviderData {
    fn from(info: ProviderInfo) -> Self {
        ProviderData {
            uid: info.uid,
            display_name: info.display_name,
            email: info.email,
            photo_url: info.photo_url,
            provider_id: info.provider_id,
            phone_number: info.phone_number,
        }
    }
}

impl From<UserRecord> for UserProjection {
    fn from(record: UserRecord) -> Self {
        let display_name =
            fallback_display_name(record.display_name.as_deref(), record.email.as_deref());
        UserProjection {
            uid: record.uid,
            email: record.email,
            display_name,
            email_verified: record.email_verified,
            disabled: record.disabled,
            creation_time: record.creation_time.as_ref().map(format_http_date),
            last_sign_in_time: record.last_sign_in_time.as_ref().map(format_http_date),
            provider_data: record.provider_data.into_iter().map(ProviderData::from).collect(),
        }
    }
}
