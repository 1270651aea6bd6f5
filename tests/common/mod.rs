//! Common Test Utilities
//!
//! In-memory repositories and a router wired the same way as production.

#![allow(dead_code)]

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use rust_decimal::Decimal;
use serde_json::Value;
use tower::ServiceExt;

use hr_admin::application::services::TokenIssuer;
use hr_admin::config::{
    AuditSettings, CorsSettings, DatabaseSettings, FixtureSettings, JwtSettings, ServerSettings,
    Settings,
};
use hr_admin::domain::{
    ApiCallFilter, ApiCallRecord, ApiCallRepository, ApiCallSortField, CumulativeSalary,
    Department, DepartmentAnalysis, DepartmentFilter, DepartmentRepository, DepartmentSortField,
    Employee, EmployeeFilter, EmployeeRanking, EmployeeRepository, EmployeeSortField, Location,
    LocationFilter, LocationRepository, LocationSortField, Page, PageRequest, SortDirection, Tier,
    TierFilter, TierRepository, TierSortField,
};
use hr_admin::infrastructure::audit::{AuditQueue, AuditWorkers};
use hr_admin::infrastructure::database::create_lazy_pool;
use hr_admin::shared::error::AppError;
use hr_admin::shared::password::hash_password;
use hr_admin::startup::{build_router, AppState, Repositories};

pub const JWT_SECRET: &str = "integration-test-secret-0123456789abcdef";
pub const EMPLOYEE_EMAIL: &str = "andi@example.com";
pub const EMPLOYEE_PASSWORD: &str = "Rahasia123!";

/// A stored record the in-memory repositories can filter, sort and page.
pub trait Record: Clone + Send + Sync + 'static {
    type Filter: Send + Sync;
    type Sort: Copy + Send + Sync;

    fn key(&self) -> String;
    fn matches(&self, filter: &Self::Filter) -> bool;
    fn compare(&self, other: &Self, field: Self::Sort) -> Ordering;
}

impl Record for Tier {
    type Filter = TierFilter;
    type Sort = TierSortField;

    fn key(&self) -> String {
        self.tier_code.clone()
    }

    fn matches(&self, filter: &TierFilter) -> bool {
        filter.matches(self)
    }

    fn compare(&self, other: &Self, field: TierSortField) -> Ordering {
        match field {
            TierSortField::TierCode => self.tier_code.cmp(&other.tier_code),
            TierSortField::TierName => self.tier_name.cmp(&other.tier_name),
        }
    }
}

impl Record for Location {
    type Filter = LocationFilter;
    type Sort = LocationSortField;

    fn key(&self) -> String {
        self.location_code.clone()
    }

    fn matches(&self, filter: &LocationFilter) -> bool {
        filter.matches(self)
    }

    fn compare(&self, other: &Self, field: LocationSortField) -> Ordering {
        match field {
            LocationSortField::LocationCode => self.location_code.cmp(&other.location_code),
            LocationSortField::LocationName => self.location_name.cmp(&other.location_name),
            LocationSortField::LocationAddress => {
                self.location_address.cmp(&other.location_address)
            }
        }
    }
}

impl Record for Department {
    type Filter = DepartmentFilter;
    type Sort = DepartmentSortField;

    fn key(&self) -> String {
        self.department_code.clone()
    }

    fn matches(&self, filter: &DepartmentFilter) -> bool {
        filter.matches(self)
    }

    fn compare(&self, other: &Self, field: DepartmentSortField) -> Ordering {
        match field {
            DepartmentSortField::DepartmentCode => {
                self.department_code.cmp(&other.department_code)
            }
            DepartmentSortField::DepartmentName => {
                self.department_name.cmp(&other.department_name)
            }
        }
    }
}

impl Record for Employee {
    type Filter = EmployeeFilter;
    type Sort = EmployeeSortField;

    fn key(&self) -> String {
        self.employee_number.clone()
    }

    fn matches(&self, filter: &EmployeeFilter) -> bool {
        filter.matches(self)
    }

    fn compare(&self, other: &Self, field: EmployeeSortField) -> Ordering {
        match field {
            EmployeeSortField::EmployeeNumber => self.employee_number.cmp(&other.employee_number),
            EmployeeSortField::EmployeeName => self.employee_name.cmp(&other.employee_name),
            EmployeeSortField::TierCode => self.tier_code.cmp(&other.tier_code),
            EmployeeSortField::LocationCode => self.location_code.cmp(&other.location_code),
            EmployeeSortField::DepartmentCode => self.department_code.cmp(&other.department_code),
            EmployeeSortField::SupervisorCode => self.supervisor_code.cmp(&other.supervisor_code),
            EmployeeSortField::Salary => self.salary.cmp(&other.salary),
            EmployeeSortField::EntryDate => self.entry_date.cmp(&other.entry_date),
            EmployeeSortField::Email => self.email.cmp(&other.email),
        }
    }
}

impl Record for ApiCallRecord {
    type Filter = ApiCallFilter;
    type Sort = ApiCallSortField;

    fn key(&self) -> String {
        self.id.to_string()
    }

    fn matches(&self, filter: &ApiCallFilter) -> bool {
        filter.matches(self)
    }

    fn compare(&self, other: &Self, field: ApiCallSortField) -> Ordering {
        match field {
            ApiCallSortField::Timestamp => self.timestamp.cmp(&other.timestamp),
            ApiCallSortField::ApiEndpoint => self.api_endpoint.cmp(&other.api_endpoint),
            ApiCallSortField::HttpMethod => self.http_method.cmp(&other.http_method),
            ApiCallSortField::UserIdentifier => self.user_identifier.cmp(&other.user_identifier),
            ApiCallSortField::ResponseStatus => self.response_status.cmp(&other.response_status),
            ApiCallSortField::RequestDurationMs => {
                self.request_duration_ms.cmp(&other.request_duration_ms)
            }
            ApiCallSortField::ClientIp => self.client_ip.cmp(&other.client_ip),
        }
    }
}

/// Keyed in-memory table.
pub struct MemoryStore<T> {
    rows: Mutex<BTreeMap<String, T>>,
}

impl<T: Record> Default for MemoryStore<T> {
    fn default() -> Self {
        Self {
            rows: Mutex::new(BTreeMap::new()),
        }
    }
}

impl<T: Record> MemoryStore<T> {
    pub fn insert(&self, row: T) {
        self.rows.lock().unwrap().insert(row.key(), row);
    }

    pub fn all(&self) -> Vec<T> {
        self.rows.lock().unwrap().values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    fn get(&self, key: &str) -> Option<T> {
        self.rows.lock().unwrap().get(key).cloned()
    }

    fn create(&self, row: &T) -> Result<T, AppError> {
        let mut rows = self.rows.lock().unwrap();
        if rows.contains_key(&row.key()) {
            return Err(AppError::AlreadyExists(format!("{} already exists", row.key())));
        }
        rows.insert(row.key(), row.clone());
        Ok(row.clone())
    }

    fn update(&self, row: &T) -> Result<T, AppError> {
        let mut rows = self.rows.lock().unwrap();
        match rows.get_mut(&row.key()) {
            Some(existing) => {
                *existing = row.clone();
                Ok(row.clone())
            }
            None => Err(AppError::NotFound(row.key())),
        }
    }

    fn delete(&self, key: &str) -> bool {
        self.rows.lock().unwrap().remove(key).is_some()
    }

    fn page(&self, filter: &T::Filter, request: &PageRequest<T::Sort>) -> Page<T> {
        let mut rows: Vec<T> = self
            .all()
            .into_iter()
            .filter(|r| r.matches(filter))
            .collect();
        rows.sort_by(|a, b| {
            let ord = a.compare(b, request.sort_by);
            let ord = match request.direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            };
            ord.then_with(|| a.key().cmp(&b.key()))
        });

        let total = rows.len() as i64;
        let data = rows
            .into_iter()
            .skip(request.offset() as usize)
            .take(request.limit() as usize)
            .collect();
        Page::new(data, request, total)
    }
}

macro_rules! reference_repository {
    ($trait:ident, $entity:ident, $filter:ident, $sort:ident) => {
        #[async_trait]
        impl $trait for MemoryStore<$entity> {
            async fn find_by_code(&self, code: &str) -> Result<Option<$entity>, AppError> {
                Ok(self.get(code))
            }

            async fn exists(&self, code: &str) -> Result<bool, AppError> {
                Ok(self.get(code).is_some())
            }

            async fn find_page(
                &self,
                filter: &$filter,
                page: &PageRequest<$sort>,
            ) -> Result<Page<$entity>, AppError> {
                Ok(self.page(filter, page))
            }

            async fn create(&self, row: &$entity) -> Result<$entity, AppError> {
                MemoryStore::create(self, row)
            }

            async fn update(&self, row: &$entity) -> Result<$entity, AppError> {
                MemoryStore::update(self, row)
            }

            async fn delete(&self, code: &str) -> Result<bool, AppError> {
                Ok(MemoryStore::delete(self, code))
            }
        }
    };
}

reference_repository!(TierRepository, Tier, TierFilter, TierSortField);
reference_repository!(LocationRepository, Location, LocationFilter, LocationSortField);
reference_repository!(DepartmentRepository, Department, DepartmentFilter, DepartmentSortField);

#[async_trait]
impl EmployeeRepository for MemoryStore<Employee> {
    async fn find_by_number(&self, employee_number: &str) -> Result<Option<Employee>, AppError> {
        Ok(self.get(employee_number))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Employee>, AppError> {
        Ok(self.all().into_iter().find(|e| e.email == email))
    }

    async fn exists(&self, employee_number: &str) -> Result<bool, AppError> {
        Ok(self.get(employee_number).is_some())
    }

    async fn find_page(
        &self,
        filter: &EmployeeFilter,
        page: &PageRequest<EmployeeSortField>,
    ) -> Result<Page<Employee>, AppError> {
        Ok(self.page(filter, page))
    }

    async fn create(&self, employee: &Employee) -> Result<Employee, AppError> {
        MemoryStore::create(self, employee)
    }

    async fn update(&self, employee: &Employee) -> Result<Employee, AppError> {
        MemoryStore::update(self, employee)
    }

    async fn delete(&self, employee_number: &str) -> Result<bool, AppError> {
        Ok(MemoryStore::delete(self, employee_number))
    }

    async fn cumulative_salaries(&self) -> Result<Vec<CumulativeSalary>, AppError> {
        let mut employees = self.all();
        employees.sort_by(|a, b| {
            (&a.department_code, &a.employee_number).cmp(&(&b.department_code, &b.employee_number))
        });

        let mut running: BTreeMap<String, Decimal> = BTreeMap::new();
        Ok(employees
            .into_iter()
            .map(|e| {
                let total = running.entry(e.department_code.clone()).or_default();
                *total += e.salary.unwrap_or_default();
                CumulativeSalary {
                    department_code: e.department_code,
                    employee_number: e.employee_number,
                    employee_name: e.employee_name,
                    cumulative_salary: Some(*total),
                }
            })
            .collect())
    }

    // The location and ranking reports are SQL-only; repository tests against
    // PostgreSQL cover their contents.
    async fn department_analysis(&self) -> Result<Vec<DepartmentAnalysis>, AppError> {
        Ok(Vec::new())
    }

    async fn salary_ranking(&self) -> Result<Vec<EmployeeRanking>, AppError> {
        Ok(Vec::new())
    }
}

#[async_trait]
impl ApiCallRepository for MemoryStore<ApiCallRecord> {
    async fn insert(&self, record: &ApiCallRecord) -> Result<(), AppError> {
        MemoryStore::insert(self, record.clone());
        Ok(())
    }

    async fn find_page(
        &self,
        filter: &ApiCallFilter,
        page: &PageRequest<ApiCallSortField>,
    ) -> Result<Page<ApiCallRecord>, AppError> {
        Ok(self.page(filter, page))
    }
}

pub fn test_settings() -> Settings {
    Settings {
        server: ServerSettings {
            host: "127.0.0.1".into(),
            port: 0,
        },
        database: DatabaseSettings {
            // Nothing listens on port 1, so readiness checks fail fast.
            url: "postgres://hr:hr@127.0.0.1:1/hr_admin_test".into(),
            max_connections: 2,
            min_connections: 0,
            acquire_timeout: 1,
            run_migrations: false,
        },
        jwt: JwtSettings {
            secret: JWT_SECRET.into(),
            expiry_minutes: 60,
        },
        cors: CorsSettings {
            allowed_origins: vec![],
        },
        audit: AuditSettings::default(),
        fixtures: FixtureSettings {
            enabled: false,
            dir: "data".into(),
        },
        environment: "test".into(),
    }
}

/// Test application backed by in-memory repositories
pub struct TestApp {
    pub router: Router,
    pub tokens: TokenIssuer,
    pub tiers: Arc<MemoryStore<Tier>>,
    pub locations: Arc<MemoryStore<Location>>,
    pub departments: Arc<MemoryStore<Department>>,
    pub employees: Arc<MemoryStore<Employee>>,
    pub api_calls: Arc<MemoryStore<ApiCallRecord>>,
    _audit_workers: AuditWorkers,
}

impl TestApp {
    /// Application seeded with one tier, location, department and employee
    pub async fn new() -> Self {
        let settings = test_settings();
        let app = Self::with_settings(settings);
        app.seed();
        app
    }

    pub fn with_settings(settings: Settings) -> Self {
        let tiers = Arc::new(MemoryStore::<Tier>::default());
        let locations = Arc::new(MemoryStore::<Location>::default());
        let departments = Arc::new(MemoryStore::<Department>::default());
        let employees = Arc::new(MemoryStore::<Employee>::default());
        let api_calls = Arc::new(MemoryStore::<ApiCallRecord>::default());

        let repos = Repositories {
            tiers: tiers.clone(),
            locations: locations.clone(),
            departments: departments.clone(),
            employees: employees.clone(),
            api_calls: api_calls.clone(),
        };

        let db = create_lazy_pool(&settings.database).expect("lazy pool");
        let (audit, audit_workers) = AuditQueue::start(api_calls.clone(), &settings.audit);
        let tokens = TokenIssuer::new(&settings.jwt);
        let router = build_router(AppState::new(db, repos, audit, settings));

        Self {
            router,
            tokens,
            tiers,
            locations,
            departments,
            employees,
            api_calls,
            _audit_workers: audit_workers,
        }
    }

    fn seed(&self) {
        self.tiers.insert(Tier {
            tier_code: "T1".into(),
            tier_name: "Staff".into(),
        });
        self.locations.insert(Location {
            location_code: "JKT".into(),
            location_name: "Jakarta".into(),
            location_address: "Jl. Sudirman 1".into(),
        });
        self.departments.insert(Department {
            department_code: "D01".into(),
            department_name: "Finance".into(),
        });
        self.employees.insert(employee("E001", "Andi", EMPLOYEE_EMAIL, 10_000_000));
    }

    /// Token for the seeded employee
    pub fn token(&self) -> String {
        self.tokens.issue(EMPLOYEE_EMAIL).expect("token")
    }

    /// Send a request and decode the JSON response body (`Null` when empty)
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        self.send(request).await
    }

    /// Send a prepared request and decode the JSON response body
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request("GET", uri, None, Some(&self.token())).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request("POST", uri, Some(body), Some(&self.token())).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request("PUT", uri, Some(body), Some(&self.token())).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.request("DELETE", uri, None, Some(&self.token())).await
    }

    /// Wait until the audit workers have persisted at least `count` records
    pub async fn wait_for_audit(&self, count: usize) -> Vec<ApiCallRecord> {
        for _ in 0..100 {
            if self.api_calls.len() >= count {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        self.api_calls.all()
    }
}

pub fn employee(number: &str, name: &str, email: &str, salary: i64) -> Employee {
    Employee {
        employee_number: number.into(),
        employee_name: name.into(),
        tier_code: "T1".into(),
        location_code: "JKT".into(),
        department_code: "D01".into(),
        supervisor_code: None,
        salary: Some(Decimal::new(salary, 0)),
        entry_date: None,
        email: email.into(),
        password_hash: hash_password(EMPLOYEE_PASSWORD).expect("hash"),
    }
}
