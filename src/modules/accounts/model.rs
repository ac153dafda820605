//! Account data models and DTOs.
//!
//! Identities come in three variants (admin, teacher, student), each kept
//! in its own shared registry table across all tenants and disambiguated
//! by the tenant back-reference. Emails are unique per registry, not
//! globally.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// The three identity variants. There is no implicit hierarchy between
/// them; endpoints declare the exact set of roles they accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Teacher,
    Student,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Teacher => "teacher",
            Role::Student => "student",
        }
    }

    /// The shared registry table backing this role.
    pub fn registry_table(&self) -> &'static str {
        match self {
            Role::Admin => "admins",
            Role::Teacher => "teachers",
            Role::Student => "students",
        }
    }
}

impl std::str::FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "teacher" => Ok(Role::Teacher),
            "student" => Ok(Role::Student),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Signed claim set carried by every access token.
///
/// `tenant_code` rides in the token so request-time tenant routing is a
/// pure function of the verified claims; handlers must never accept a
/// tenant identifier from request input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // account id
    pub role: String,
    pub tenant_code: String,
    pub iat: usize,
    pub exp: usize,
}

/// Credentials for one account inside a creation request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct AccountEntryDto {
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[validate(length(min = 1, message = "password must not be empty"))]
    pub password: String,
}

/// DTO for creating a single account. The school is referenced by name;
/// the registry resolves it through the tenant directory.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateAccountDto {
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[validate(length(min = 1, message = "password must not be empty"))]
    pub password: String,
    #[validate(length(min = 1, message = "school_name must not be empty"))]
    pub school_name: String,
}

/// DTO for bulk (whole-list) teacher or student creation.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateAccountsBulkDto {
    #[validate(length(min = 1, message = "school_name must not be empty"))]
    pub school_name: String,
    #[validate(length(min = 1, message = "accounts must not be empty"), nested)]
    pub accounts: Vec<AccountEntryDto>,
}

/// Login request for any of the three role registries.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[validate(length(min = 1, message = "password must not be empty"))]
    pub password: String,
}

/// Successful login: a bearer token plus the identity it was issued for.
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
    pub account: AccountSummary,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AccountSummary {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
    pub tenant_code: String,
}

/// Response for single-account creation.
#[derive(Debug, Serialize, ToSchema)]
pub struct CreatedAccountResponse {
    pub id: Uuid,
}

/// Response for bulk creation.
#[derive(Debug, Serialize, ToSchema)]
pub struct CreatedAccountsResponse {
    pub ids: Vec<Uuid>,
}

/// DTO for whole-school onboarding: the tenant plus its first admin and
/// optional teacher/student rosters, created as one unit.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct OnboardSchoolDto {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[validate(custom(function = "crate::modules::tenants::model::validate_tenant_code"))]
    pub code: String,
    #[validate(nested)]
    pub admin: AccountEntryDto,
    #[serde(default)]
    #[validate(nested)]
    pub teachers: Vec<AccountEntryDto>,
    #[serde(default)]
    #[validate(nested)]
    pub students: Vec<AccountEntryDto>,
}

/// Everything created by a whole-school onboarding call.
#[derive(Debug, Serialize, ToSchema)]
pub struct OnboardingSummary {
    pub tenant_id: Uuid,
    pub admin_id: Uuid,
    pub teacher_ids: Vec<Uuid>,
    pub student_ids: Vec<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_role_round_trip() {
        for role in [Role::Admin, Role::Teacher, Role::Student] {
            assert_eq!(Role::from_str(role.as_str()), Ok(role));
        }
        assert!(Role::from_str("superuser").is_err());
    }

    #[test]
    fn test_registry_tables() {
        assert_eq!(Role::Admin.registry_table(), "admins");
        assert_eq!(Role::Teacher.registry_table(), "teachers");
        assert_eq!(Role::Student.registry_table(), "students");
    }

    #[test]
    fn test_create_account_dto_validation() {
        let dto = CreateAccountDto {
            email: "a@lh.test".to_string(),
            password: "pw123".to_string(),
            school_name: "Lincoln High".to_string(),
        };
        assert!(dto.validate().is_ok());

        let dto_bad_email = CreateAccountDto {
            email: "not-an-email".to_string(),
            password: "pw123".to_string(),
            school_name: "Lincoln High".to_string(),
        };
        assert!(dto_bad_email.validate().is_err());
    }

    #[test]
    fn test_bulk_dto_rejects_invalid_entry() {
        let dto = CreateAccountsBulkDto {
            school_name: "Lincoln High".to_string(),
            accounts: vec![
                AccountEntryDto {
                    email: "t1@lh.test".to_string(),
                    password: "pw123".to_string(),
                },
                AccountEntryDto {
                    email: "t2@lh.test".to_string(),
                    password: "".to_string(),
                },
            ],
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_onboard_dto_defaults_rosters() {
        let json = r#"{
            "name": "Lincoln High",
            "code": "LH01",
            "admin": {"email": "a@lh.test", "password": "pw123"}
        }"#;
        let dto: OnboardSchoolDto = serde_json::from_str(json).unwrap();
        assert!(dto.teachers.is_empty());
        assert!(dto.students.is_empty());
        assert!(dto.validate().is_ok());
    }
}
