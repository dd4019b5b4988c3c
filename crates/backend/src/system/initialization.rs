use anyhow::Result;
use sea_orm::DatabaseConnection;

use crate::shared::autofill::AuditContext;
use crate::system::employees::{repository, service};

pub const DEFAULT_ADMIN_USERNAME: &str = "admin";

/// Ensure admin employee exists (create if table is empty)
pub async fn ensure_admin_exists(
    db: &DatabaseConnection,
    bootstrap_password: &str,
) -> Result<()> {
    let count = repository::count(db).await?;
    if count > 0 {
        return Ok(());
    }

    tracing::info!("No employees found. Creating default admin...");
    let admin_id = service::create(
        db,
        "Administrator",
        DEFAULT_ADMIN_USERNAME,
        bootstrap_password,
        &AuditContext::system(),
    )
    .await?;

    tracing::warn!("═══════════════════════════════════════════════");
    tracing::warn!("  Default admin employee created!");
    tracing::warn!("  Username: {}", DEFAULT_ADMIN_USERNAME);
    tracing::warn!("  Employee ID: {}", admin_id);
    tracing::warn!("  ⚠️  PLEASE CHANGE THE PASSWORD IMMEDIATELY!");
    tracing::warn!("═══════════════════════════════════════════════");

    Ok(())
}
