//! HTTP response and request bodies
//!
//! Every mutation answers with `{"success": bool, "error"?: string}`;
//! listings answer with a JSON array of entries.

use serde::{Deserialize, Serialize};

/// Body returned by every mutating endpoint and by every failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(
        rename = "isProtected",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub is_protected: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl OperationResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
            is_protected: None,
            path: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
            is_protected: None,
            path: None,
        }
    }

    pub fn with_protection(mut self, is_protected: bool) -> Self {
        self.is_protected = Some(is_protected);
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

/// Query string of the listing endpoint
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub dir: Option<String>,
    pub recursive: Option<bool>,
}

/// Query string of the upload endpoint
#[derive(Debug, Default, Deserialize)]
pub struct UploadParams {
    pub dir: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameRequest {
    pub old_name: String,
    pub new_name: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteRequest {
    pub path: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateFolderRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct PasswordRequest {
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_omits_optional_fields() {
        let body = serde_json::to_value(OperationResponse::ok()).unwrap();
        assert_eq!(body, json!({"success": true}));
    }

    #[test]
    fn failure_carries_message() {
        let body = serde_json::to_value(OperationResponse::failure("boom")).unwrap();
        assert_eq!(body, json!({"success": false, "error": "boom"}));
    }

    #[test]
    fn toggle_reports_protection_in_camel_case() {
        let body =
            serde_json::to_value(OperationResponse::ok().with_protection(true)).unwrap();
        assert_eq!(body, json!({"success": true, "isProtected": true}));
    }

    #[test]
    fn rename_request_uses_camel_case_keys() {
        let request: RenameRequest =
            serde_json::from_value(json!({"oldName": "a.txt", "newName": "b.txt"})).unwrap();
        assert_eq!(request.old_name, "a.txt");
        assert_eq!(request.new_name, "b.txt");
    }
}
