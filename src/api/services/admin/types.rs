//! Admin API request/response types.
//!
//! Field names follow the panel's wire format: `type`, `textString`,
//! `fileBase64`, `pageViewId`.

use serde::{Deserialize, Serialize};

use crate::services::{CreateLureRequest, UpdateLureRequest};
use crate::storage::{AdminAccount, Lure, LureKind, LureView};

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdminSummary {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<AdminAccount> for AdminSummary {
    fn from(account: AdminAccount) -> Self {
        Self {
            id: account.id,
            name: account.name,
            email: account.email,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateAccountRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LurePayload {
    pub path: String,
    #[serde(rename = "type")]
    pub kind: LureKind,
    #[serde(default)]
    pub text_string: Option<String>,
    #[serde(default)]
    pub file_base64: Option<String>,
}

impl LurePayload {
    pub fn into_create_request(self) -> CreateLureRequest {
        CreateLureRequest {
            path: self.path,
            kind: self.kind,
            text_string: self.text_string,
            file_base64: self.file_base64,
        }
    }

    pub fn into_update_request(self) -> UpdateLureRequest {
        UpdateLureRequest {
            path: self.path,
            kind: self.kind,
            text_string: self.text_string,
            file_base64: self.file_base64,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LureResponse {
    pub id: String,
    pub path: String,
    #[serde(rename = "type")]
    pub kind: LureKind,
    pub text_string: Option<String>,
    pub file_base64: Option<String>,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_count: Option<i64>,
}

impl LureResponse {
    pub fn from_lure(lure: Lure, view_count: Option<i64>) -> Self {
        Self {
            id: lure.id,
            path: lure.path,
            kind: lure.content.kind(),
            text_string: lure.content.text().map(String::from),
            file_base64: lure.content.image().map(String::from),
            created_at: lure.created_at.to_rfc3339(),
            view_count,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewResponse {
    pub id: String,
    pub ip: String,
    pub user_agent: String,
    pub location: Option<String>,
    pub photo: Option<String>,
    /// Creation time decoded from the view id
    pub seen_at: Option<String>,
}

impl From<LureView> for ViewResponse {
    fn from(view: LureView) -> Self {
        let seen_at = view.created_at().map(|dt| dt.to_rfc3339());
        Self {
            id: view.id,
            ip: view.ip,
            user_agent: view.user_agent,
            location: view.location,
            photo: view.photo,
            seen_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LureDetailResponse {
    #[serde(flatten)]
    pub lure: LureResponse,
    pub views: Vec<ViewResponse>,
}
