use sqlx::{PgConnection, PgPool};
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use crate::config::jwt::JwtConfig;
use crate::modules::tenants::model::CreateTenantDto;
use crate::modules::tenants::service::TenantService;
use crate::utils::errors::AppError;
use crate::utils::jwt::create_access_token;
use crate::utils::password::{hash_password_blocking, verify_password_blocking};

use super::model::{
    AccountEntryDto, AccountSummary, CreateAccountDto, CreateAccountsBulkDto, LoginRequest,
    LoginResponse, OnboardSchoolDto, OnboardingSummary, Role,
};

#[derive(sqlx::FromRow)]
struct AccountWithPassword {
    id: Uuid,
    email: String,
    password: String,
    tenant_id: Uuid,
}

pub struct AccountService;

impl AccountService {
    /// Create a single identity in the given role's registry, bound to the
    /// tenant resolved from the school name.
    #[instrument(skip(db, dto), fields(account.role = %role, account.email = %dto.email))]
    pub async fn create_account(
        db: &PgPool,
        role: Role,
        dto: CreateAccountDto,
    ) -> Result<Uuid, AppError> {
        let tenant = TenantService::resolve_by_name(db, &dto.school_name).await?;

        let digest = hash_password_blocking(dto.password).await?;

        let mut conn = db.acquire().await.map_err(|e| {
            error!(error = %e, "Failed to acquire connection for account creation");
            AppError::from(e)
        })?;

        let id = Self::insert_with(&mut conn, role, &dto.email, &digest, tenant.id).await?;

        info!(
            account.id = %id,
            account.role = %role,
            tenant.code = %tenant.code,
            "Account created"
        );

        Ok(id)
    }

    /// Bulk ("whole list") creation for teacher or student rosters.
    ///
    /// All-or-nothing: every insert runs inside one transaction, so a
    /// failure on any entry rolls back the entire batch.
    #[instrument(skip(db, dto), fields(account.role = %role, batch.len = dto.accounts.len()))]
    pub async fn create_accounts_bulk(
        db: &PgPool,
        role: Role,
        dto: CreateAccountsBulkDto,
    ) -> Result<Vec<Uuid>, AppError> {
        let tenant = TenantService::resolve_by_name(db, &dto.school_name).await?;

        // Hash outside the transaction; the work factor would otherwise
        // hold the connection for the whole batch.
        let mut hashed = Vec::with_capacity(dto.accounts.len());
        for entry in dto.accounts {
            let digest = hash_password_blocking(entry.password).await?;
            hashed.push((entry.email, digest));
        }

        let mut tx = db.begin().await.map_err(|e| {
            error!(error = %e, "Failed to open transaction for bulk account creation");
            AppError::from(e)
        })?;

        let mut ids = Vec::with_capacity(hashed.len());
        for (email, digest) in &hashed {
            let id = Self::insert_with(&mut tx, role, email, digest, tenant.id).await?;
            ids.push(id);
        }

        tx.commit().await.map_err(|e| {
            error!(error = %e, "Failed to commit bulk account creation");
            AppError::from(e)
        })?;

        info!(
            account.role = %role,
            tenant.code = %tenant.code,
            created = ids.len(),
            "Bulk accounts created"
        );

        Ok(ids)
    }

    /// Authenticate against the given role's registry and issue a
    /// tenant-scoped access token.
    #[instrument(skip(db, dto, jwt_config), fields(account.role = %role, account.email = %dto.email))]
    pub async fn login(
        db: &PgPool,
        role: Role,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        let query = format!(
            "SELECT id, email, password, tenant_id FROM {} WHERE email = $1",
            role.registry_table()
        );

        let account = sqlx::query_as::<_, AccountWithPassword>(&query)
            .bind(&dto.email)
            .fetch_optional(db)
            .await
            .map_err(|e| {
                error!(error = %e, account.role = %role, "Database error fetching account");
                AppError::from(e)
            })?
            .ok_or_else(|| {
                debug!(account.role = %role, "Account not found");
                AppError::not_found(anyhow::anyhow!("Account not found"))
            })?;

        let is_valid = verify_password_blocking(dto.password, account.password.clone()).await?;

        if !is_valid {
            warn!(account.id = %account.id, account.role = %role, "Invalid credential on login");
            return Err(AppError::unauthorized(anyhow::anyhow!(
                "Invalid email or password"
            )));
        }

        // A missing tenant here is a dangling back-reference: a server-side
        // data problem, never the caller's.
        let tenant = TenantService::find_by_id(db, account.tenant_id)
            .await?
            .ok_or_else(|| {
                error!(
                    account.id = %account.id,
                    tenant.id = %account.tenant_id,
                    "Account references a missing tenant"
                );
                AppError::integrity()
            })?;

        let access_token = create_access_token(account.id, role, &tenant.code, jwt_config)?;

        info!(account.id = %account.id, tenant.code = %tenant.code, "Login successful");

        Ok(LoginResponse {
            access_token,
            account: AccountSummary {
                id: account.id,
                email: account.email,
                role,
                tenant_code: tenant.code,
            },
        })
    }

    /// Whole-school onboarding: tenant registration with provisioning, one
    /// admin, then the teacher and student rosters, all in one transaction.
    /// Any failure rolls back everything including the tenant.
    #[instrument(
        skip(db, dto),
        fields(
            tenant.name = %dto.name,
            tenant.code = %dto.code,
            teachers = dto.teachers.len(),
            students = dto.students.len()
        )
    )]
    pub async fn onboard_school(
        db: &PgPool,
        dto: OnboardSchoolDto,
    ) -> Result<OnboardingSummary, AppError> {
        let admin_digest = hash_password_blocking(dto.admin.password.clone()).await?;
        let teacher_digests = Self::hash_entries(&dto.teachers).await?;
        let student_digests = Self::hash_entries(&dto.students).await?;

        let mut tx = db.begin().await.map_err(|e| {
            error!(error = %e, "Failed to open transaction for school onboarding");
            AppError::from(e)
        })?;

        let tenant = TenantService::register_with(
            &mut tx,
            &CreateTenantDto {
                name: dto.name,
                code: dto.code,
            },
        )
        .await?;

        let admin_id =
            Self::insert_with(&mut tx, Role::Admin, &dto.admin.email, &admin_digest, tenant.id)
                .await?;

        let mut teacher_ids = Vec::with_capacity(teacher_digests.len());
        for (email, digest) in &teacher_digests {
            let id = Self::insert_with(&mut tx, Role::Teacher, email, digest, tenant.id).await?;
            teacher_ids.push(id);
        }

        let mut student_ids = Vec::with_capacity(student_digests.len());
        for (email, digest) in &student_digests {
            let id = Self::insert_with(&mut tx, Role::Student, email, digest, tenant.id).await?;
            student_ids.push(id);
        }

        tx.commit().await.map_err(|e| {
            error!(error = %e, tenant.code = %tenant.code, "Failed to commit school onboarding");
            AppError::from(e)
        })?;

        info!(
            tenant.id = %tenant.id,
            tenant.code = %tenant.code,
            admins = 1,
            teachers = teacher_ids.len(),
            students = student_ids.len(),
            "School onboarded"
        );

        Ok(OnboardingSummary {
            tenant_id: tenant.id,
            admin_id,
            teacher_ids,
            student_ids,
        })
    }

    async fn hash_entries(entries: &[AccountEntryDto]) -> Result<Vec<(String, String)>, AppError> {
        let mut hashed = Vec::with_capacity(entries.len());
        for entry in entries {
            let digest = hash_password_blocking(entry.password.clone()).await?;
            hashed.push((entry.email.clone(), digest));
        }
        Ok(hashed)
    }

    /// Insert one identity row into the role's registry. Duplicate email
    /// maps to `Conflict`.
    async fn insert_with(
        conn: &mut PgConnection,
        role: Role,
        email: &str,
        digest: &str,
        tenant_id: Uuid,
    ) -> Result<Uuid, AppError> {
        let query = format!(
            "INSERT INTO {} (email, password, tenant_id) VALUES ($1, $2, $3) RETURNING id",
            role.registry_table()
        );

        sqlx::query_scalar::<_, Uuid>(&query)
            .bind(email)
            .bind(digest)
            .bind(tenant_id)
            .fetch_one(&mut *conn)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e
                    && db_err.is_unique_violation()
                {
                    warn!(account.role = %role, "Duplicate email in registry");
                    return AppError::conflict(anyhow::anyhow!("Email already registered"));
                }
                error!(error = %e, account.role = %role, "Database error inserting account");
                AppError::from(e)
            })
    }
}
