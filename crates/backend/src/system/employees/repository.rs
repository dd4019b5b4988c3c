use anyhow::{Context, Result};
use contracts::system::employees::Employee;
use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, QueryResult, Statement};

use crate::shared::autofill::{self, AuditContext, OperationType};

fn from_row(row: &QueryResult) -> Result<Employee> {
    Ok(Employee {
        id: row.try_get("", "id")?,
        name: row.try_get("", "name")?,
        username: row.try_get("", "username")?,
        password: row.try_get("", "password")?,
        status: row.try_get("", "status")?,
        create_time: row.try_get("", "create_time")?,
        update_time: row.try_get("", "update_time")?,
        create_user: row.try_get("", "create_user")?,
        update_user: row.try_get("", "update_user")?,
    })
}

/// Insert employee, `password` must already be hashed
pub async fn insert(
    db: &DatabaseConnection,
    employee: &mut Employee,
    ctx: &AuditContext,
) -> Result<i64> {
    autofill::apply(OperationType::Insert, Some(&mut *employee), ctx)?;

    let result = db
        .execute(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "INSERT INTO employee (name, username, password, status, create_time, update_time, create_user, update_user)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
            [
                employee.name.clone().into(),
                employee.username.clone().into(),
                employee.password.clone().into(),
                employee.status.into(),
                employee.create_time.into(),
                employee.update_time.into(),
                employee.create_user.into(),
                employee.update_user.into(),
            ],
        ))
        .await
        .context("Failed to insert employee")?;

    let id = result.last_insert_id() as i64;
    employee.id = Some(id);
    Ok(id)
}

/// Get employee by username
pub async fn get_by_username(
    db: &DatabaseConnection,
    username: &str,
) -> Result<Option<Employee>> {
    let row = db
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT id, name, username, password, status, create_time, update_time, create_user, update_user
             FROM employee WHERE username = ?",
            [username.into()],
        ))
        .await?;

    row.as_ref().map(from_row).transpose()
}

/// Count all employees
pub async fn count(db: &DatabaseConnection) -> Result<i64> {
    let row = db
        .query_one(Statement::from_string(
            DatabaseBackend::Sqlite,
            "SELECT COUNT(*) AS cnt FROM employee".to_string(),
        ))
        .await?;

    match row {
        Some(row) => Ok(row.try_get("", "cnt")?),
        None => Ok(0),
    }
}
