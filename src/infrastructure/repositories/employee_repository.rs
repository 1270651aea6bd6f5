//! Employee Repository Implementation
//!
//! PostgreSQL implementation of the EmployeeRepository trait, including the
//! three salary reports. Those are plain SQL; the rows map one-to-one onto
//! the domain report types.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use sqlx::PgPool;

use super::{map_insert_error, order_and_page};
use crate::domain::{
    CumulativeSalary, DepartmentAnalysis, Employee, EmployeeFilter, EmployeeRanking,
    EmployeeRepository, EmployeeSortField, Page, PageRequest,
};
use crate::shared::error::AppError;

/// Database row representation of the `employee` table.
#[derive(Debug, sqlx::FromRow)]
struct EmployeeRow {
    employee_number: String,
    employee_name: String,
    tier_code: String,
    location_code: String,
    department_code: String,
    supervisor_code: Option<String>,
    salary: Option<Decimal>,
    entry_date: Option<NaiveDateTime>,
    email: String,
    password: String,
}

impl EmployeeRow {
    fn into_employee(self) -> Employee {
        Employee {
            employee_number: self.employee_number,
            employee_name: self.employee_name,
            tier_code: self.tier_code,
            location_code: self.location_code,
            department_code: self.department_code,
            supervisor_code: self.supervisor_code,
            salary: self.salary,
            entry_date: self.entry_date,
            email: self.email,
            password_hash: self.password,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CumulativeSalaryRow {
    department_code: String,
    employee_number: String,
    employee_name: String,
    cumulative_salary: Option<Decimal>,
}

#[derive(Debug, sqlx::FromRow)]
struct DepartmentAnalysisRow {
    location_name: String,
    dept_with_most_employee: String,
    dept_employee_count: i64,
    lowest_dept_avg_salary: Option<Decimal>,
}

#[derive(Debug, sqlx::FromRow)]
struct EmployeeRankingRow {
    location_name: String,
    department_name: String,
    employee_name: String,
    position: String,
    salary: Option<Decimal>,
    rank: i64,
    salary_gap: Decimal,
}

const COLUMNS: &str = "employee_number, employee_name, tier_code, location_code, \
    department_code, supervisor_code, salary, entry_date, email, password";

const FILTER: &str = r#"
    WHERE ($1::text IS NULL OR LOWER(employee_number) = LOWER($1))
      AND ($2::text IS NULL OR LOWER(employee_name) LIKE '%' || LOWER($2) || '%')
      AND ($3::text IS NULL OR LOWER(email) LIKE '%' || LOWER($3) || '%')
"#;

const CUMULATIVE_SALARY_SQL: &str = r#"
    SELECT
        e1.department_code,
        e1.employee_number,
        e1.employee_name,
        (
            SELECT SUM(e2.salary)
            FROM employee e2
            WHERE e2.department_code = e1.department_code
              AND e2.employee_number <= e1.employee_number
        ) AS cumulative_salary
    FROM employee e1
    ORDER BY e1.department_code, e1.employee_number
"#;

const DEPARTMENT_ANALYSIS_SQL: &str = r#"
    WITH dept_count_avgsalary AS (
        SELECT
            l.location_name,
            d.department_name,
            COUNT(*) AS dept_employee_count,
            AVG(e.salary) AS avg_salary
        FROM employee e
        JOIN location l ON e.location_code = l.location_code
        JOIN department d ON e.department_code = d.department_code
        GROUP BY l.location_name, d.department_name
    ),
    highest_employee_count AS (
        SELECT dc1.*
        FROM dept_count_avgsalary dc1
        WHERE dc1.dept_employee_count = (
            SELECT MAX(dc2.dept_employee_count)
            FROM dept_count_avgsalary dc2
            WHERE dc2.location_name = dc1.location_name
        )
    ),
    lowest_avg_salary AS (
        SELECT dc1.*
        FROM dept_count_avgsalary dc1
        WHERE dc1.avg_salary = (
            SELECT MIN(dc2.avg_salary)
            FROM dept_count_avgsalary dc2
            WHERE dc2.location_name = dc1.location_name
        )
    )
    SELECT
        h.location_name,
        h.department_name AS dept_with_most_employee,
        h.dept_employee_count,
        l.avg_salary AS lowest_dept_avg_salary
    FROM highest_employee_count h
    JOIN lowest_avg_salary l ON h.location_name = l.location_name
    ORDER BY h.location_name
"#;

// Dense rank: one plus the number of distinct higher salaries in the group.
const SALARY_RANKING_SQL: &str = r#"
    WITH ranked_employees AS (
        SELECT
            e.employee_number,
            e.employee_name,
            t.tier_name,
            d.department_name,
            l.location_name,
            e.salary,
            (
                SELECT COUNT(DISTINCT e2.salary) + 1
                FROM employee e2
                WHERE e2.location_code = e.location_code
                  AND e2.department_code = e.department_code
                  AND e2.salary > e.salary
            ) AS rank
        FROM employee e
        JOIN department d ON e.department_code = d.department_code
        JOIN location l ON e.location_code = l.location_code
        JOIN tier t ON e.tier_code = t.tier_code
    ),
    previous_ranks AS (
        SELECT DISTINCT location_name, department_name, rank, salary
        FROM ranked_employees
    )
    SELECT
        a.location_name,
        a.department_name,
        a.employee_name,
        a.tier_name AS position,
        a.salary,
        a.rank,
        COALESCE(
            CASE
                WHEN b.salary IS NULL THEN 0
                WHEN b.salary = a.salary THEN 0
                ELSE b.salary - a.salary
            END,
            0
        )::numeric AS salary_gap
    FROM ranked_employees a
    LEFT JOIN previous_ranks b
        ON a.location_name = b.location_name
       AND a.department_name = b.department_name
       AND b.rank = a.rank - 1
    ORDER BY a.location_name, a.department_name, a.rank, a.employee_number
"#;

/// PostgreSQL employee repository implementation.
#[derive(Clone)]
pub struct PgEmployeeRepository {
    pool: PgPool,
}

impl PgEmployeeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EmployeeRepository for PgEmployeeRepository {
    async fn find_by_number(&self, employee_number: &str) -> Result<Option<Employee>, AppError> {
        let row = sqlx::query_as::<_, EmployeeRow>(&format!(
            "SELECT {} FROM employee WHERE employee_number = $1",
            COLUMNS
        ))
        .bind(employee_number)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(EmployeeRow::into_employee))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Employee>, AppError> {
        let row = sqlx::query_as::<_, EmployeeRow>(&format!(
            "SELECT {} FROM employee WHERE email = $1 ORDER BY employee_number LIMIT 1",
            COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(EmployeeRow::into_employee))
    }

    async fn exists(&self, employee_number: &str) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM employee WHERE employee_number = $1)",
        )
        .bind(employee_number)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn find_page(
        &self,
        filter: &EmployeeFilter,
        page: &PageRequest<EmployeeSortField>,
    ) -> Result<Page<Employee>, AppError> {
        let total =
            sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM employee {}", FILTER))
                .bind(filter.employee_number.as_deref())
                .bind(filter.employee_name.as_deref())
                .bind(filter.employee_email.as_deref())
                .fetch_one(&self.pool)
                .await?;

        let sql = format!(
            "SELECT {} FROM employee {} {}",
            COLUMNS,
            FILTER,
            order_and_page(page, "employee_number", 4)
        );
        let rows = sqlx::query_as::<_, EmployeeRow>(&sql)
            .bind(filter.employee_number.as_deref())
            .bind(filter.employee_name.as_deref())
            .bind(filter.employee_email.as_deref())
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await?;

        Ok(Page::new(
            rows.into_iter().map(EmployeeRow::into_employee).collect(),
            page,
            total,
        ))
    }

    async fn create(&self, employee: &Employee) -> Result<Employee, AppError> {
        let row = sqlx::query_as::<_, EmployeeRow>(&format!(
            r#"
            INSERT INTO employee ({0})
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {0}
            "#,
            COLUMNS
        ))
        .bind(&employee.employee_number)
        .bind(&employee.employee_name)
        .bind(&employee.tier_code)
        .bind(&employee.location_code)
        .bind(&employee.department_code)
        .bind(&employee.supervisor_code)
        .bind(employee.salary)
        .bind(employee.entry_date)
        .bind(&employee.email)
        .bind(&employee.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_insert_error(e, || {
                format!(
                    "Employee with employee number {} already exists.",
                    employee.employee_number
                )
            })
        })?;

        Ok(row.into_employee())
    }

    async fn update(&self, employee: &Employee) -> Result<Employee, AppError> {
        let row = sqlx::query_as::<_, EmployeeRow>(&format!(
            r#"
            UPDATE employee
            SET employee_name = $2,
                tier_code = $3,
                location_code = $4,
                department_code = $5,
                supervisor_code = $6,
                salary = $7,
                entry_date = $8,
                email = $9,
                password = $10
            WHERE employee_number = $1
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(&employee.employee_number)
        .bind(&employee.employee_name)
        .bind(&employee.tier_code)
        .bind(&employee.location_code)
        .bind(&employee.department_code)
        .bind(&employee.supervisor_code)
        .bind(employee.salary)
        .bind(employee.entry_date)
        .bind(&employee.email)
        .bind(&employee.password_hash)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "Employee not found with employee number: {}",
                employee.employee_number
            ))
        })?;

        Ok(row.into_employee())
    }

    async fn delete(&self, employee_number: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM employee WHERE employee_number = $1")
            .bind(employee_number)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn cumulative_salaries(&self) -> Result<Vec<CumulativeSalary>, AppError> {
        let rows = sqlx::query_as::<_, CumulativeSalaryRow>(CUMULATIVE_SALARY_SQL)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|r| CumulativeSalary {
                department_code: r.department_code,
                employee_number: r.employee_number,
                employee_name: r.employee_name,
                cumulative_salary: r.cumulative_salary,
            })
            .collect())
    }

    async fn department_analysis(&self) -> Result<Vec<DepartmentAnalysis>, AppError> {
        let rows = sqlx::query_as::<_, DepartmentAnalysisRow>(DEPARTMENT_ANALYSIS_SQL)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|r| DepartmentAnalysis {
                location_name: r.location_name,
                dept_with_most_employee: r.dept_with_most_employee,
                dept_employee_count: r.dept_employee_count,
                lowest_dept_avg_salary: r.lowest_dept_avg_salary,
            })
            .collect())
    }

    async fn salary_ranking(&self) -> Result<Vec<EmployeeRanking>, AppError> {
        let rows = sqlx::query_as::<_, EmployeeRankingRow>(SALARY_RANKING_SQL)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|r| EmployeeRanking {
                location_name: r.location_name,
                department_name: r.department_name,
                employee_name: r.employee_name,
                position: r.position,
                salary: r.salary,
                rank: r.rank,
                salary_gap: r.salary_gap,
            })
            .collect())
    }
}
