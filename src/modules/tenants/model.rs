//! Tenant data models and DTOs.
//!
//! A tenant is one school: the unit of data isolation. The tenant `code`
//! is the stable routing key into the tenant's isolated data scope and is
//! immutable once registered.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// A tenant in the shared registry.
///
/// `provisioned` records that the tenant's scope schema and collection
/// tables exist, so provisioning never depends on probing the catalog.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct Tenant {
    pub id: Uuid,
    pub name: String,
    pub code: String,
    pub provisioned: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Tenant {
    /// Handle to this tenant's isolated data scope.
    pub fn scope(&self) -> TenantScope {
        TenantScope::for_code(&self.code)
    }
}

/// DTO for registering a new tenant.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateTenantDto {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[validate(custom(function = "validate_tenant_code"))]
    pub code: String,
}

/// Tenant codes become schema names, so the charset is restricted to
/// characters that are safe inside a quoted PostgreSQL identifier.
pub fn validate_tenant_code(code: &str) -> Result<(), ValidationError> {
    if code.len() < 2 || code.len() > 32 {
        return Err(ValidationError::new("tenant_code_length")
            .with_message("tenant code must be 2-32 characters".into()));
    }

    if !code.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(ValidationError::new("tenant_code_charset")
            .with_message("tenant code may only contain letters, digits, and underscores".into()));
    }

    Ok(())
}

/// The fixed set of collections provisioned for every tenant.
pub const SCOPE_COLLECTIONS: [&str; 4] = ["questions", "assignments", "analytics", "classes"];

/// Handle to one tenant's isolated data scope.
///
/// Constructed only from a resolved [`Tenant`], never from raw request
/// input, so holding a scope implies the tenant exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantScope {
    schema: String,
}

impl TenantScope {
    pub(crate) fn for_code(code: &str) -> Self {
        Self {
            schema: format!("tenant_{}", code.to_lowercase()),
        }
    }

    pub fn schema(&self) -> &str {
        &self.schema
    }

    /// Fully qualified, quoted name of one collection table in this scope.
    pub fn collection(&self, name: &str) -> String {
        format!("\"{}\".\"{}\"", self.schema, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_tenant_code_accepts_alphanumeric() {
        assert!(validate_tenant_code("LH01").is_ok());
        assert!(validate_tenant_code("acme_west_2").is_ok());
    }

    #[test]
    fn test_validate_tenant_code_rejects_bad_input() {
        assert!(validate_tenant_code("a").is_err());
        assert!(validate_tenant_code(&"x".repeat(33)).is_err());
        assert!(validate_tenant_code("has space").is_err());
        assert!(validate_tenant_code("semi;colon").is_err());
        assert!(validate_tenant_code("quo\"te").is_err());
    }

    #[test]
    fn test_scope_collection_names() {
        let scope = TenantScope::for_code("LH01");
        assert_eq!(scope.schema(), "tenant_lh01");
        assert_eq!(scope.collection("questions"), "\"tenant_lh01\".\"questions\"");
    }

    #[test]
    fn test_create_tenant_dto_validation() {
        let dto = CreateTenantDto {
            name: "Lincoln High".to_string(),
            code: "LH01".to_string(),
        };
        assert!(dto.validate().is_ok());

        let dto_bad_code = CreateTenantDto {
            name: "Lincoln High".to_string(),
            code: "LH 01".to_string(),
        };
        assert!(dto_bad_code.validate().is_err());

        let dto_empty_name = CreateTenantDto {
            name: "".to_string(),
            code: "LH01".to_string(),
        };
        assert!(dto_empty_name.validate().is_err());
    }
}
