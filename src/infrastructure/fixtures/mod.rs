//! CSV Fixture Loader
//!
//! Replaces the reference data and employees with the contents of
//! `department.csv`, `tier.csv`, `location.csv` and `employee.csv`.
//!
//! Files are `;`-separated with one header row. Rows with too few columns are
//! skipped, values are trimmed, and empty values become NULL. Everything runs
//! in one transaction; the audit history is left alone.

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction};

use crate::shared::password::{hash_password, is_hashed, PasswordError};

/// Format of `entry_date` in employee.csv
pub const ENTRY_DATE_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// Fixture loading errors
#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Password(#[from] PasswordError),
}

/// One parsed CSV row; `None` marks an empty cell.
pub type Row = Vec<Option<String>>;

/// Split `content` into rows of at least `min_columns` cells, skipping the header.
pub fn parse_rows(content: &str, min_columns: usize) -> Vec<Row> {
    content
        .lines()
        .skip(1)
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.split(';').map(empty_to_null).collect::<Row>())
        .filter(|row| row.len() >= min_columns)
        .collect()
}

fn empty_to_null(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Decimal salary; unparseable values become NULL.
pub fn parse_salary(value: Option<&str>) -> Option<Decimal> {
    value.and_then(|v| v.parse::<Decimal>().ok())
}

/// `dd/MM/yyyy HH:mm:ss`; unparseable values become NULL and are logged.
pub fn parse_entry_date(value: Option<&str>) -> Option<NaiveDateTime> {
    let value = value?;
    match NaiveDateTime::parse_from_str(value, ENTRY_DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(e) => {
            tracing::error!(value, error = %e, "Invalid entry_date in employee fixture");
            None
        }
    }
}

/// Counts of rows inserted per table
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FixtureSummary {
    pub departments: usize,
    pub tiers: usize,
    pub locations: usize,
    pub employees: usize,
}

async fn read(dir: &Path, file: &str) -> Result<String, FixtureError> {
    let path = dir.join(file);
    tokio::fs::read_to_string(&path)
        .await
        .map_err(|source| FixtureError::Io { path, source })
}

/// Load all four fixture files from `dir`.
pub async fn load_fixtures(pool: &PgPool, dir: &Path) -> Result<FixtureSummary, FixtureError> {
    let departments = parse_rows(&read(dir, "department.csv").await?, 2);
    let tiers = parse_rows(&read(dir, "tier.csv").await?, 2);
    let locations = parse_rows(&read(dir, "location.csv").await?, 3);
    let employees = parse_rows(&read(dir, "employee.csv").await?, 10);

    let mut tx = pool.begin().await?;

    for table in ["employee", "department", "tier", "location"] {
        sqlx::query(&format!("DELETE FROM {}", table))
            .execute(&mut *tx)
            .await?;
    }

    insert_pairs(&mut tx, "department", "department_code, department_name", &departments).await?;
    insert_pairs(&mut tx, "tier", "tier_code, tier_name", &tiers).await?;

    for row in &locations {
        sqlx::query(
            "INSERT INTO location (location_code, location_name, location_address) VALUES ($1, $2, $3)",
        )
        .bind(&row[0])
        .bind(&row[1])
        .bind(&row[2])
        .execute(&mut *tx)
        .await?;
    }

    for row in &employees {
        let password = match row[9].as_deref() {
            Some(p) if !is_hashed(p) => Some(hash_password(p)?),
            other => other.map(String::from),
        };

        sqlx::query(
            r#"
            INSERT INTO employee (employee_number, employee_name, tier_code, location_code,
                department_code, supervisor_code, salary, entry_date, email, password)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(&row[0])
        .bind(&row[1])
        .bind(&row[2])
        .bind(&row[3])
        .bind(&row[4])
        .bind(&row[5])
        .bind(parse_salary(row[6].as_deref()))
        .bind(parse_entry_date(row[7].as_deref()))
        .bind(&row[8])
        .bind(password)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    let summary = FixtureSummary {
        departments: departments.len(),
        tiers: tiers.len(),
        locations: locations.len(),
        employees: employees.len(),
    };
    tracing::info!(?summary, dir = %dir.display(), "Fixtures loaded");

    Ok(summary)
}

async fn insert_pairs(
    tx: &mut Transaction<'_, Postgres>,
    table: &str,
    columns: &str,
    rows: &[Row],
) -> Result<(), FixtureError> {
    let sql = format!("INSERT INTO {} ({}) VALUES ($1, $2)", table, columns);
    for row in rows {
        sqlx::query(&sql)
            .bind(&row[0])
            .bind(&row[1])
            .execute(&mut **tx)
            .await?;
    }
    Ok(())
}
