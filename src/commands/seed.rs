//! Seed command - default roles and the first administrator.
//!
//! Idempotent: existing roles and an existing account with the same email
//! are left as they are.

use validator::Validate;

use crate::api::extractors::format_validation_errors;
use crate::cli::args::SeedArgs;
use crate::config::{Config, ROLE_ADMIN, SEED_ROLES};
use crate::domain::{CreateRole, CreateUser, NewUser, Password};
use crate::errors::{AppError, AppResult};
use crate::infra::{Database, Persistence, UnitOfWork};

pub async fn execute(args: SeedArgs, config: Config) -> AppResult<()> {
    let admin = CreateUser {
        email: args.admin_email,
        password: args.admin_password,
        name: args.admin_name,
        role_id: uuid::Uuid::nil(),
        department_id: None,
    };
    admin
        .validate()
        .map_err(|e| AppError::validation(format_validation_errors(&e)))?;

    let db = Database::connect(&config)
        .await
        .map_err(|e| AppError::internal(format!("Database connection failed: {}", e)))?;
    let uow = Persistence::new(db.get_connection());

    let mut admin_role_id = None;
    for (name, description) in SEED_ROLES {
        let role = match uow.roles().find_by_name(name).await? {
            Some(role) => role,
            None => {
                let role = uow
                    .roles()
                    .create(CreateRole {
                        name: name.to_string(),
                        description: Some(description.to_string()),
                    })
                    .await?;
                tracing::info!(role = %role.name, "Role created");
                role
            }
        };
        if role.name == ROLE_ADMIN {
            admin_role_id = Some(role.id);
        }
    }
    let role_id = admin_role_id.ok_or_else(|| AppError::internal("admin role missing after seeding"))?;

    if uow.users().find_by_email(&admin.email).await?.is_some() {
        tracing::info!(email = %admin.email, "Administrator already exists");
        return Ok(());
    }

    let password = Password::new(&admin.password)?;
    let user = uow
        .users()
        .create(NewUser {
            email: admin.email,
            password_hash: password.into_string(),
            name: admin.name,
            role_id,
            department_id: None,
        })
        .await?;

    tracing::info!(user_id = %user.id, email = %user.email, "Administrator created");
    Ok(())
}
