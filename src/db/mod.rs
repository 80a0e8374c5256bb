use sqlx::{postgres::PgPoolOptions, Error, Executor, PgPool};
use thiserror::Error;

pub mod models;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Failed to parse database URL: {0}")]
    UrlParse(String),
    #[error("Database error: {0}")]
    Sqlx(#[from] Error),
    #[error("Failed to create database: {0}")]
    CreateDb(String),
    #[error("Failed to create schema: {0}")]
    Schema(String),
}

/// Idempotent table definitions, executed in order on every startup.
const SCHEMA: [&str; 3] = [
    "CREATE TABLE IF NOT EXISTS doctors (
        id SERIAL PRIMARY KEY,
        name VARCHAR(100) NOT NULL,
        specialization VARCHAR(100) NOT NULL,
        available BOOLEAN NOT NULL DEFAULT TRUE
    )",
    "CREATE TABLE IF NOT EXISTS appointments (
        id SERIAL PRIMARY KEY,
        patient_name VARCHAR(100) NOT NULL,
        doctor_id INTEGER NOT NULL REFERENCES doctors(id),
        date DATE NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS members (
        id SERIAL PRIMARY KEY,
        name VARCHAR(100) NOT NULL,
        email VARCHAR(120) NOT NULL UNIQUE,
        password VARCHAR(255) NOT NULL
    )",
];

/// Connects to PostgreSQL, creating the database and tables when missing.
pub async fn init_db(database_url: &str) -> Result<PgPool, DatabaseError> {
    let (base_url, db_name) = parse_database_url(database_url)?;

    let temp_pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&format!("{}/postgres", base_url))
        .await
        .map_err(DatabaseError::Sqlx)?;

    ensure_database_exists(&temp_pool, &db_name).await?;
    temp_pool.close().await;

    let pool = PgPool::connect(database_url)
        .await
        .map_err(DatabaseError::Sqlx)?;

    create_schema(&pool).await?;
    log::info!("Database {} is ready", db_name);

    Ok(pool)
}

fn parse_database_url(database_url: &str) -> Result<(String, String), DatabaseError> {
    let (base_url, tail) = database_url
        .rsplit_once('/')
        .ok_or_else(|| DatabaseError::UrlParse("Invalid database URL format".to_string()))?;

    let db_name = tail
        .split('?')
        .next()
        .filter(|name| !name.is_empty())
        .ok_or_else(|| DatabaseError::UrlParse("Failed to extract database name".to_string()))?;

    if !db_name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err(DatabaseError::UrlParse(format!(
            "Unsupported database name: {}",
            db_name
        )));
    }

    Ok((base_url.to_string(), db_name.to_string()))
}

async fn ensure_database_exists(pool: &PgPool, db_name: &str) -> Result<(), DatabaseError> {
    let db_exists: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
            .bind(db_name)
            .fetch_one(pool)
            .await
            .map_err(DatabaseError::Sqlx)?;

    if !db_exists {
        log::info!("Creating database {}", db_name);
        pool.execute(format!("CREATE DATABASE {}", db_name).as_str())
            .await
            .map_err(|e| DatabaseError::CreateDb(e.to_string()))?;
    }

    Ok(())
}

async fn create_schema(pool: &PgPool) -> Result<(), DatabaseError> {
    for statement in SCHEMA {
        pool.execute(statement)
            .await
            .map_err(|e| DatabaseError::Schema(e.to_string()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_base_url_and_name() {
        let (base, name) =
            parse_database_url("postgres://user:pw@localhost:5432/hospital?sslmode=disable")
                .unwrap();
        assert_eq!(base, "postgres://user:pw@localhost:5432");
        assert_eq!(name, "hospital");
    }

    #[test]
    fn rejects_urls_without_database_name() {
        assert!(matches!(
            parse_database_url("postgres://localhost:5432/"),
            Err(DatabaseError::UrlParse(_))
        ));
        assert!(matches!(
            parse_database_url("not-a-url"),
            Err(DatabaseError::UrlParse(_))
        ));
    }

    #[test]
    fn rejects_names_that_need_quoting() {
        assert!(parse_database_url("postgres://localhost/drop;table").is_err());
    }
}
