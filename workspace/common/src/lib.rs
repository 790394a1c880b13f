//! Common transport-layer types shared between the API server and its clients.
//! Request payloads use the PascalCase field names the frontend already sends
//! (`FirstName`, `Age`, ...).

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Generic API response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success flag
    pub success: bool,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            data,
            message: message.into(),
            success: true,
        }
    }
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

/// Body returned for any route the server does not know.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct NotFoundBody {
    pub message: String,
}

impl Default for NotFoundBody {
    fn default() -> Self {
        Self {
            message: "Not found".to_string(),
        }
    }
}

// ===================== Items =====================

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct CreateItemRequest {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub quantity: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Default)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateItemRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub quantity: Option<i32>,
}

// ===================== Students =====================

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct CreateStudentRequest {
    pub first_name: String,
    pub last_name: String,
    pub age: i32,
    pub class_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Default)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateStudentRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub age: Option<i32>,
    pub class_name: Option<String>,
}

// ===================== Subjects =====================

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct CreateSubjectRequest {
    pub name: String,
    /// Short course code, e.g. "MATH101"
    pub code: String,
    pub credits: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Default)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateSubjectRequest {
    pub name: Option<String>,
    pub code: Option<String>,
    pub credits: Option<i32>,
}

// ===================== Users =====================

/// Request body for creating a user. The password is hashed before storage.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct CreateUserRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Default)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    /// New plaintext password; stored hashed
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

// ===================== Teachers =====================

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct CreateTeacherRequest {
    pub first_name: String,
    pub last_name: String,
    pub age: i32,
    /// Subject label, free text
    pub subject: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Default)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateTeacherRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub age: Option<i32>,
    pub subject: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_teacher_request_uses_pascal_case() {
        let json = r#"{"FirstName":"Ann","LastName":"Lee","Age":30,"Subject":"Math"}"#;
        let request: CreateTeacherRequest = serde_json::from_str(json).unwrap();
        assert_eq!(
            request,
            CreateTeacherRequest {
                first_name: "Ann".to_string(),
                last_name: "Lee".to_string(),
                age: 30,
                subject: "Math".to_string(),
            }
        );
    }

    #[test]
    fn test_update_request_missing_fields_are_none() {
        let request: UpdateStudentRequest = serde_json::from_str(r#"{"Age":12}"#).unwrap();
        assert_eq!(
            request,
            UpdateStudentRequest {
                age: Some(12),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_age_must_be_a_number() {
        let result =
            serde_json::from_str::<CreateTeacherRequest>(r#"{"FirstName":"Ann","LastName":"Lee","Age":"thirty","Subject":"Math"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_not_found_body() {
        let body = serde_json::to_value(NotFoundBody::default()).unwrap();
        assert_eq!(body, serde_json::json!({"message": "Not found"}));
    }
}
