use contracts::system::employees::{Employee, STATUS_ACTIVE};
use sea_orm::DatabaseConnection;

use super::repository;
use crate::shared::autofill::AuditContext;
use crate::shared::error::{AppError, AppResult};
use crate::system::auth::password;

pub const ACCOUNT_LOCKED: &str = "Account is locked";

/// Check login credentials
///
/// Unknown username and wrong password are both `Unauthorized`.
pub async fn verify_credentials(
    db: &DatabaseConnection,
    username: &str,
    plain_password: &str,
) -> AppResult<Employee> {
    let employee = repository::get_by_username(db, username.trim())
        .await?
        .ok_or(AppError::Unauthorized)?;

    if !password::verify_password(plain_password, &employee.password)? {
        tracing::warn!("Wrong password for employee {}", employee.username);
        return Err(AppError::Unauthorized);
    }

    if !employee.is_active() {
        return Err(AppError::business(ACCOUNT_LOCKED));
    }

    Ok(employee)
}

/// Create an active employee with a hashed password
pub async fn create(
    db: &DatabaseConnection,
    name: &str,
    username: &str,
    plain_password: &str,
    ctx: &AuditContext,
) -> anyhow::Result<i64> {
    if username.trim().is_empty() {
        anyhow::bail!("Username cannot be empty");
    }
    if repository::get_by_username(db, username.trim()).await?.is_some() {
        anyhow::bail!("Username already exists");
    }

    let mut employee = Employee {
        id: None,
        name: name.to_string(),
        username: username.trim().to_string(),
        password: password::hash_password(plain_password)?,
        status: STATUS_ACTIVE,
        ..Default::default()
    };

    repository::insert(db, &mut employee, ctx).await
}
