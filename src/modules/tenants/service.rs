use sqlx::{PgConnection, PgPool};
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use crate::utils::errors::AppError;

use super::model::{CreateTenantDto, SCOPE_COLLECTIONS, Tenant, TenantScope};

pub struct TenantService;

impl TenantService {
    /// Register a tenant and provision its data scope in one transaction.
    #[instrument(skip(db, dto), fields(tenant.name = %dto.name, tenant.code = %dto.code))]
    pub async fn register(db: &PgPool, dto: CreateTenantDto) -> Result<Tenant, AppError> {
        let mut tx = db.begin().await.map_err(|e| {
            error!(error = %e, "Failed to open transaction for tenant registration");
            AppError::from(e)
        })?;

        let tenant = Self::register_with(&mut tx, &dto).await?;

        tx.commit().await.map_err(|e| {
            error!(error = %e, tenant.code = %dto.code, "Failed to commit tenant registration");
            AppError::from(e)
        })?;

        info!(
            tenant.id = %tenant.id,
            tenant.code = %tenant.code,
            "Tenant registered and provisioned"
        );

        Ok(tenant)
    }

    /// Transaction-composable registration: insert the tenant row, provision
    /// its scope, record the provisioned flag. Duplicate name or code maps
    /// to `Conflict`; the unique indexes close the concurrent-registration
    /// race, there is no check-then-insert.
    pub(crate) async fn register_with(
        conn: &mut PgConnection,
        dto: &CreateTenantDto,
    ) -> Result<Tenant, AppError> {
        debug!(tenant.name = %dto.name, tenant.code = %dto.code, "Registering tenant");

        let tenant = sqlx::query_as::<_, Tenant>(
            "INSERT INTO tenants (name, code) VALUES ($1, $2)
             RETURNING id, name, code, provisioned, created_at, updated_at",
        )
        .bind(&dto.name)
        .bind(&dto.code)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                warn!(tenant.name = %dto.name, tenant.code = %dto.code, "Duplicate tenant registration");
                return AppError::conflict(anyhow::anyhow!("School name or code already registered"));
            }
            error!(error = %e, tenant.code = %dto.code, "Database error registering tenant");
            AppError::from(e)
        })?;

        Self::provision_scope(&mut *conn, &tenant.code).await?;

        sqlx::query("UPDATE tenants SET provisioned = TRUE, updated_at = NOW() WHERE id = $1")
            .bind(tenant.id)
            .execute(&mut *conn)
            .await
            .map_err(|e| {
                error!(error = %e, tenant.id = %tenant.id, "Database error recording provisioned flag");
                AppError::from(e)
            })?;

        Ok(Tenant {
            provisioned: true,
            ..tenant
        })
    }

    /// Create the tenant's scope schema and its fixed collection tables.
    /// Idempotent: existing collections are skipped, never cleared.
    pub async fn provision_scope(
        conn: &mut PgConnection,
        code: &str,
    ) -> Result<TenantScope, AppError> {
        let scope = TenantScope::for_code(code);

        debug!(tenant.code = %code, schema = %scope.schema(), "Provisioning tenant scope");

        sqlx::query(&format!(
            "CREATE SCHEMA IF NOT EXISTS \"{}\"",
            scope.schema()
        ))
        .execute(&mut *conn)
        .await
        .map_err(|e| {
            error!(error = %e, schema = %scope.schema(), "Database error creating scope schema");
            AppError::from(e)
        })?;

        for collection in SCOPE_COLLECTIONS {
            sqlx::query(&format!(
                "CREATE TABLE IF NOT EXISTS {} (
                     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                     data JSONB NOT NULL,
                     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                 )",
                scope.collection(collection)
            ))
            .execute(&mut *conn)
            .await
            .map_err(|e| {
                error!(
                    error = %e,
                    schema = %scope.schema(),
                    collection = %collection,
                    "Database error creating scope collection"
                );
                AppError::from(e)
            })?;
        }

        Ok(scope)
    }

    /// Look up a tenant by its routing code.
    #[instrument(skip(db), fields(tenant.code = %code))]
    pub async fn resolve(db: &PgPool, code: &str) -> Result<Tenant, AppError> {
        sqlx::query_as::<_, Tenant>(
            "SELECT id, name, code, provisioned, created_at, updated_at
             FROM tenants WHERE code = $1",
        )
        .bind(code)
        .fetch_optional(db)
        .await
        .map_err(|e| {
            error!(error = %e, tenant.code = %code, "Database error resolving tenant");
            AppError::from(e)
        })?
        .ok_or_else(|| {
            debug!(tenant.code = %code, "Tenant not found");
            AppError::not_found(anyhow::anyhow!("School not found"))
        })
    }

    /// Look up a tenant by its human-readable school name. Registration
    /// flows reference schools by name before the code is known.
    #[instrument(skip(db), fields(tenant.name = %name))]
    pub async fn resolve_by_name(db: &PgPool, name: &str) -> Result<Tenant, AppError> {
        sqlx::query_as::<_, Tenant>(
            "SELECT id, name, code, provisioned, created_at, updated_at
             FROM tenants WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(db)
        .await
        .map_err(|e| {
            error!(error = %e, tenant.name = %name, "Database error resolving tenant by name");
            AppError::from(e)
        })?
        .ok_or_else(|| {
            debug!(tenant.name = %name, "Tenant not found by name");
            AppError::not_found(anyhow::anyhow!("School not found"))
        })
    }

    /// Internal lookup by id, for following an identity's tenant
    /// back-reference. Returns `None` for a dangling reference so the
    /// caller can classify it as an integrity failure.
    pub(crate) async fn find_by_id(db: &PgPool, id: Uuid) -> Result<Option<Tenant>, AppError> {
        sqlx::query_as::<_, Tenant>(
            "SELECT id, name, code, provisioned, created_at, updated_at
             FROM tenants WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(|e| {
            error!(error = %e, tenant.id = %id, "Database error fetching tenant by id");
            AppError::from(e)
        })
    }
}
