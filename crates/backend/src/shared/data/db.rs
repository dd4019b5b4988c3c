use anyhow::Context;
use sea_orm::{ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};
use std::path::Path;

/// Minimal schema bootstrap, every statement is idempotent
const SCHEMA: &[(&str, &str)] = &[
    (
        "category",
        r#"
        CREATE TABLE IF NOT EXISTS category (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            type INTEGER NOT NULL,
            name TEXT NOT NULL UNIQUE,
            sort INTEGER NOT NULL DEFAULT 0,
            status INTEGER NOT NULL DEFAULT 0,
            create_time TEXT,
            update_time TEXT,
            create_user INTEGER,
            update_user INTEGER
        );
        "#,
    ),
    (
        "dish",
        r#"
        CREATE TABLE IF NOT EXISTS dish (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE,
            category_id INTEGER NOT NULL,
            status INTEGER NOT NULL DEFAULT 1,
            create_time TEXT,
            update_time TEXT,
            create_user INTEGER,
            update_user INTEGER
        );
        "#,
    ),
    (
        "setmeal",
        r#"
        CREATE TABLE IF NOT EXISTS setmeal (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE,
            category_id INTEGER NOT NULL,
            status INTEGER NOT NULL DEFAULT 1,
            create_time TEXT,
            update_time TEXT,
            create_user INTEGER,
            update_user INTEGER
        );
        "#,
    ),
    (
        "employee",
        r#"
        CREATE TABLE IF NOT EXISTS employee (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            username TEXT NOT NULL UNIQUE,
            password TEXT NOT NULL,
            status INTEGER NOT NULL DEFAULT 1,
            create_time TEXT,
            update_time TEXT,
            create_user INTEGER,
            update_user INTEGER
        );
        "#,
    ),
];

/// Open (or create) the SQLite file and make sure all tables exist
pub async fn initialize_database(db_file: &Path) -> anyhow::Result<DatabaseConnection> {
    if let Some(parent) = db_file.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Cannot create {}", parent.display()))?;
    }
    // Normalize path separators and ensure proper URL form on Windows
    let normalized = db_file.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    let db_url = format!("sqlite://{}{}?mode=rwc", prefix, normalized);

    tracing::info!("Connecting to database: {}", db_url);
    let conn = Database::connect(&db_url).await?;
    bootstrap_schema(&conn).await?;
    Ok(conn)
}

pub async fn bootstrap_schema(conn: &DatabaseConnection) -> anyhow::Result<()> {
    for (table, sql) in SCHEMA {
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            sql.to_string(),
        ))
        .await
        .with_context(|| format!("Failed to create table {}", table))?;
        tracing::debug!("Table {} ready", table);
    }
    Ok(())
}

/// In-memory database with the full schema, one pooled connection so every
/// query sees the same data
#[cfg(test)]
pub async fn memory_connection() -> DatabaseConnection {
    let mut opts = sea_orm::ConnectOptions::new("sqlite::memory:".to_string());
    opts.max_connections(1).min_connections(1).sqlx_logging(false);
    let conn = Database::connect(opts).await.expect("open in-memory sqlite");
    bootstrap_schema(&conn).await.expect("bootstrap schema");
    conn
}
