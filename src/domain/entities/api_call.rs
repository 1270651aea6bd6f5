//! API call audit record and repository trait.
//!
//! Maps to the append-only `api_call_history` table.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::value_objects::{Page, PageRequest, SortField};
use crate::shared::error::AppError;

/// One audited request/response exchange.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCallRecord {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub api_endpoint: String,
    pub http_method: String,
    pub user_identifier: Option<String>,
    pub response_status: i32,
    pub request_duration_ms: Option<i64>,
    pub client_ip: Option<String>,
    pub user_agent: Option<String>,
    pub request_body: Option<String>,
    pub response_body: Option<String>,
}

/// History query selectors. Every variant except `All` ignores the requested
/// sort field and orders by timestamp, newest first.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCallFilter {
    All,
    User(String),
    /// Case-insensitive substring of the request path
    Endpoint(String),
    /// Case-insensitive HTTP method
    Method(String),
    Status(i32),
    /// Inclusive on both ends
    DateRange {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
}

impl ApiCallFilter {
    pub fn matches(&self, record: &ApiCallRecord) -> bool {
        match self {
            ApiCallFilter::All => true,
            ApiCallFilter::User(user) => record.user_identifier.as_deref() == Some(user.as_str()),
            ApiCallFilter::Endpoint(endpoint) => record
                .api_endpoint
                .to_lowercase()
                .contains(&endpoint.to_lowercase()),
            ApiCallFilter::Method(method) => record.http_method.eq_ignore_ascii_case(method),
            ApiCallFilter::Status(status) => record.response_status == *status,
            ApiCallFilter::DateRange { start, end } => {
                record.timestamp >= *start && record.timestamp <= *end
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApiCallSortField {
    #[default]
    Timestamp,
    ApiEndpoint,
    HttpMethod,
    UserIdentifier,
    ResponseStatus,
    RequestDurationMs,
    ClientIp,
}

impl SortField for ApiCallSortField {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "timestamp" => Some(Self::Timestamp),
            "apiEndpoint" | "api_endpoint" => Some(Self::ApiEndpoint),
            "httpMethod" | "http_method" => Some(Self::HttpMethod),
            "userIdentifier" | "user_identifier" => Some(Self::UserIdentifier),
            "responseStatus" | "response_status" => Some(Self::ResponseStatus),
            "requestDurationMs" | "request_duration_ms" => Some(Self::RequestDurationMs),
            "clientIp" | "client_ip" => Some(Self::ClientIp),
            _ => None,
        }
    }

    fn column(&self) -> &'static str {
        match self {
            Self::Timestamp => "timestamp",
            Self::ApiEndpoint => "api_endpoint",
            Self::HttpMethod => "http_method",
            Self::UserIdentifier => "user_identifier",
            Self::ResponseStatus => "response_status",
            Self::RequestDurationMs => "request_duration_ms",
            Self::ClientIp => "client_ip",
        }
    }
}

/// Repository trait for the audit log. There is no update or delete.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApiCallRepository: Send + Sync {
    async fn insert(&self, record: &ApiCallRecord) -> Result<(), AppError>;

    async fn find_page(
        &self,
        filter: &ApiCallFilter,
        page: &PageRequest<ApiCallSortField>,
    ) -> Result<Page<ApiCallRecord>, AppError>;
}
