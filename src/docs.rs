use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::accounts::controller::ErrorResponse;
use crate::modules::accounts::model::{
    AccountEntryDto, AccountSummary, CreateAccountDto, CreateAccountsBulkDto,
    CreatedAccountResponse, CreatedAccountsResponse, LoginRequest, LoginResponse, OnboardSchoolDto,
    OnboardingSummary, Role,
};
use crate::modules::questions::model::{CreateQuestionDto, Question, UpdateQuestionDto};
use crate::modules::tenants::model::{CreateTenantDto, Tenant};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::accounts::controller::create_admin,
        crate::modules::accounts::controller::create_teacher,
        crate::modules::accounts::controller::create_student,
        crate::modules::accounts::controller::create_teachers_bulk,
        crate::modules::accounts::controller::create_students_bulk,
        crate::modules::accounts::controller::login_admin,
        crate::modules::accounts::controller::login_teacher,
        crate::modules::accounts::controller::login_student,
        crate::modules::accounts::controller::onboard_school,
        crate::modules::tenants::controller::create_tenant,
        crate::modules::tenants::controller::get_my_tenant,
        crate::modules::questions::controller::fetch_questions,
        crate::modules::questions::controller::create_question,
        crate::modules::questions::controller::fetch_question,
        crate::modules::questions::controller::update_question,
        crate::modules::questions::controller::delete_question,
    ),
    components(
        schemas(
            AccountEntryDto,
            AccountSummary,
            CreateAccountDto,
            CreateAccountsBulkDto,
            CreatedAccountResponse,
            CreatedAccountsResponse,
            CreateQuestionDto,
            CreateTenantDto,
            ErrorResponse,
            LoginRequest,
            LoginResponse,
            OnboardSchoolDto,
            OnboardingSummary,
            Question,
            Role,
            Tenant,
            UpdateQuestionDto,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Accounts", description = "Identity creation, login, and school onboarding"),
        (name = "Tenants", description = "Tenant registration and resolution"),
        (name = "Questions", description = "Tenant-scoped question bank")
    ),
    info(
        title = "Eruditx API",
        version = "0.1.0",
        description = "Hybrid multi-tenancy education API built with Rust, Axum, and PostgreSQL.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
