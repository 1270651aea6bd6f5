//! API Call History Repository Implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::order_and_page;
use crate::domain::{
    ApiCallFilter, ApiCallRecord, ApiCallRepository, ApiCallSortField, Page, PageRequest,
};
use crate::shared::error::AppError;

#[derive(Debug, sqlx::FromRow)]
struct ApiCallRow {
    id: Uuid,
    timestamp: DateTime<Utc>,
    api_endpoint: String,
    http_method: String,
    user_identifier: Option<String>,
    response_status: i32,
    request_duration_ms: Option<i64>,
    client_ip: Option<String>,
    user_agent: Option<String>,
    request_body: Option<String>,
    response_body: Option<String>,
}

impl ApiCallRow {
    fn into_record(self) -> ApiCallRecord {
        ApiCallRecord {
            id: self.id,
            timestamp: self.timestamp,
            api_endpoint: self.api_endpoint,
            http_method: self.http_method,
            user_identifier: self.user_identifier,
            response_status: self.response_status,
            request_duration_ms: self.request_duration_ms,
            client_ip: self.client_ip,
            user_agent: self.user_agent,
            request_body: self.request_body,
            response_body: self.response_body,
        }
    }
}

const COLUMNS: &str = "id, timestamp, api_endpoint, http_method, user_identifier, \
    response_status, request_duration_ms, client_ip, user_agent, request_body, response_body";

const FILTER: &str = r#"
    WHERE ($1::text IS NULL OR user_identifier = $1)
      AND ($2::text IS NULL OR LOWER(api_endpoint) LIKE '%' || LOWER($2) || '%')
      AND ($3::text IS NULL OR UPPER(http_method) = UPPER($3))
      AND ($4::int IS NULL OR response_status = $4)
      AND ($5::timestamptz IS NULL OR timestamp >= $5)
      AND ($6::timestamptz IS NULL OR timestamp <= $6)
"#;

/// Filter selector flattened into the six optional bind parameters.
#[derive(Default)]
struct FilterBinds<'a> {
    user: Option<&'a str>,
    endpoint: Option<&'a str>,
    method: Option<&'a str>,
    status: Option<i32>,
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
}

impl<'a> FilterBinds<'a> {
    fn from_filter(filter: &'a ApiCallFilter) -> Self {
        match filter {
            ApiCallFilter::All => Self::default(),
            ApiCallFilter::User(user) => Self {
                user: Some(user.as_str()),
                ..Default::default()
            },
            ApiCallFilter::Endpoint(endpoint) => Self {
                endpoint: Some(endpoint.as_str()),
                ..Default::default()
            },
            ApiCallFilter::Method(method) => Self {
                method: Some(method.as_str()),
                ..Default::default()
            },
            ApiCallFilter::Status(status) => Self {
                status: Some(*status),
                ..Default::default()
            },
            ApiCallFilter::DateRange { start, end } => Self {
                start: Some(*start),
                end: Some(*end),
                ..Default::default()
            },
        }
    }
}

/// PostgreSQL audit log repository.
#[derive(Clone)]
pub struct PgApiCallRepository {
    pool: PgPool,
}

impl PgApiCallRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ApiCallRepository for PgApiCallRepository {
    async fn insert(&self, record: &ApiCallRecord) -> Result<(), AppError> {
        sqlx::query(&format!(
            r#"
            INSERT INTO api_call_history ({})
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
            COLUMNS
        ))
        .bind(record.id)
        .bind(record.timestamp)
        .bind(&record.api_endpoint)
        .bind(&record.http_method)
        .bind(&record.user_identifier)
        .bind(record.response_status)
        .bind(record.request_duration_ms)
        .bind(&record.client_ip)
        .bind(&record.user_agent)
        .bind(&record.request_body)
        .bind(&record.response_body)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_page(
        &self,
        filter: &ApiCallFilter,
        page: &PageRequest<ApiCallSortField>,
    ) -> Result<Page<ApiCallRecord>, AppError> {
        let binds = FilterBinds::from_filter(filter);

        let total = sqlx::query_scalar::<_, i64>(&format!(
            "SELECT COUNT(*) FROM api_call_history {}",
            FILTER
        ))
        .bind(binds.user)
        .bind(binds.endpoint)
        .bind(binds.method)
        .bind(binds.status)
        .bind(binds.start)
        .bind(binds.end)
        .fetch_one(&self.pool)
        .await?;

        let sql = format!(
            "SELECT {} FROM api_call_history {} {}",
            COLUMNS,
            FILTER,
            order_and_page(page, "id", 7)
        );
        let rows = sqlx::query_as::<_, ApiCallRow>(&sql)
            .bind(binds.user)
            .bind(binds.endpoint)
            .bind(binds.method)
            .bind(binds.status)
            .bind(binds.start)
            .bind(binds.end)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await?;

        Ok(Page::new(
            rows.into_iter().map(ApiCallRow::into_record).collect(),
            page,
            total,
        ))
    }
}
