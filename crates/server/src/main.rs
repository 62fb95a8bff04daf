// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod access;
mod extract;

#[cfg(test)]
mod tests;

use axum::{
    Extension, Json, Router,
    extract::State,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use clap::Parser;
use extract::{Body, PathId, QueryParams};
use leavedesk::{Envelope, ErrorKind, Outcome};
use leavedesk_api::{
    AccessPolicy, ApiError, AuthRole, AuthenticatedActor, AuthenticationService,
    DepartmentRequest, EmployeeRequest, LeaveDecisionRequest, LoginRequest, LoginResponse,
    RegisterRequest, SubmitLeaveQuery, SubmitLeaveRequest, TokenConfig, TokenService,
};
use leavedesk_domain::{PendingOnlyTransitions, PermissiveTransitions, TransitionPolicy};
use leavedesk_persistence::Persistence;
use serde::Serialize;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use time::{Date, Duration, OffsetDateTime};
use tokio::sync::Mutex;
use tracing::{error, info, warn};

/// Thirty days.
const MAX_TOKEN_TTL_MINUTES: i64 = 30 * 24 * 60;

/// Leavedesk Server - HTTP server for the Leavedesk leave management backend
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long, env = "LEAVEDESK_DATABASE")]
    database: Option<String>,

    /// Address to bind the server to
    #[arg(long, env = "LEAVEDESK_BIND", default_value = "127.0.0.1")]
    bind: IpAddr,

    /// Port to bind the server to
    #[arg(short, long, env = "LEAVEDESK_PORT", default_value_t = 3000)]
    port: u16,

    /// HS512 signing key for access tokens (at least 32 bytes)
    #[arg(long, env = "LEAVEDESK_JWT_SECRET", hide_env_values = true)]
    jwt_secret: String,

    /// Lifetime of an issued access token, in minutes
    #[arg(
        long,
        env = "LEAVEDESK_TOKEN_TTL_MINUTES",
        default_value_t = 60,
        value_parser = clap::value_parser!(i64).range(1..=MAX_TOKEN_TTL_MINUTES)
    )]
    token_ttl_minutes: i64,

    /// bcrypt cost used when hashing passwords
    #[arg(long, env = "LEAVEDESK_BCRYPT_COST", default_value_t = 12)]
    bcrypt_cost: u32,

    /// Username of the administrator created at startup when absent
    #[arg(long, env = "LEAVEDESK_ADMIN_USERNAME", requires = "admin_password")]
    admin_username: Option<String>,

    /// Password of the bootstrap administrator
    #[arg(
        long,
        env = "LEAVEDESK_ADMIN_PASSWORD",
        hide_env_values = true,
        requires = "admin_username"
    )]
    admin_password: Option<String>,

    /// Only allow leave status changes out of PENDING
    #[arg(long, env = "LEAVEDESK_STRICT_STATUS_TRANSITIONS")]
    strict_status_transitions: bool,
}

/// Application state shared across handlers.
///
/// The persistence layer sits behind a Mutex so that every check-then-act
/// sequence of a request runs without interleaving.
#[derive(Clone)]
struct AppState {
    persistence: Arc<Mutex<Persistence>>,
    tokens: Arc<TokenService>,
    access_policy: Arc<AccessPolicy>,
    transitions: Arc<dyn TransitionPolicy>,
    bcrypt_cost: u32,
}

/// HTTP error wrapper for failures raised outside the core outcome
/// envelope (registration and login).
#[derive(Debug)]
struct HttpError {
    status: StatusCode,
    message: String,
    errors: Vec<String>,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<Envelope<()>> = Json(Envelope::failure(&self.message, self.errors));
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            ApiError::UsernameTaken
            | ApiError::InvalidInput { .. }
            | ApiError::PasswordPolicyViolation { .. } => StatusCode::BAD_REQUEST,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!(error = %err, "Request failed");
        }

        Self {
            status,
            message: err.to_string(),
            errors: Vec::new(),
        }
    }
}

const fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::Storage => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Renders an outcome as an envelope, choosing the status from the failure
/// kind.
fn respond<T: Serialize>(outcome: Outcome<T>, success: StatusCode) -> Response {
    let status: StatusCode = match &outcome {
        Ok(_) => success,
        Err(failure) => {
            if failure.kind == ErrorKind::Storage {
                error!(error = %failure, "Storage failure");
            }
            status_for(failure.kind)
        }
    };

    (status, Json(Envelope::from(outcome))).into_response()
}

fn today() -> Date {
    OffsetDateTime::now_utc().date()
}

// ============================================================================
// Authentication
// ============================================================================

/// Handler for POST `/api/auth/register`.
async fn handle_register(
    State(app_state): State<AppState>,
    Body(req): Body<RegisterRequest>,
) -> Result<(StatusCode, String), HttpError> {
    info!(username = %req.username, "Handling register request");

    let mut persistence = app_state.persistence.lock().await;
    let message: String = leavedesk_api::register(&mut persistence, &req, app_state.bcrypt_cost)?;
    drop(persistence);

    Ok((StatusCode::CREATED, message))
}

/// Handler for POST `/api/auth/login`.
async fn handle_login(
    State(app_state): State<AppState>,
    Body(req): Body<LoginRequest>,
) -> Result<Json<LoginResponse>, HttpError> {
    info!(username = %req.username, "Handling login request");

    let mut persistence = app_state.persistence.lock().await;
    let response: LoginResponse = leavedesk_api::login(&mut persistence, &app_state.tokens, &req)?;
    drop(persistence);

    Ok(Json(response))
}

// ============================================================================
// Departments
// ============================================================================

async fn handle_list_departments(State(app_state): State<AppState>) -> Response {
    let outcome = leavedesk_api::list_departments(&mut *app_state.persistence.lock().await);
    respond(outcome, StatusCode::OK)
}

async fn handle_get_department(
    State(app_state): State<AppState>,
    PathId(department_id): PathId,
) -> Response {
    let outcome = leavedesk_api::get_department(
        &mut *app_state.persistence.lock().await,
        department_id,
    );
    respond(outcome, StatusCode::OK)
}

async fn handle_create_department(
    State(app_state): State<AppState>,
    Body(req): Body<DepartmentRequest>,
) -> Response {
    info!(name = %req.name, "Handling create_department request");
    let outcome = leavedesk_api::create_department(&mut *app_state.persistence.lock().await, req);
    respond(outcome, StatusCode::CREATED)
}

async fn handle_update_department(
    State(app_state): State<AppState>,
    PathId(department_id): PathId,
    Body(req): Body<DepartmentRequest>,
) -> Response {
    info!(department_id, "Handling update_department request");
    let outcome = leavedesk_api::update_department(
        &mut *app_state.persistence.lock().await,
        department_id,
        req,
    );
    respond(outcome, StatusCode::OK)
}

async fn handle_delete_department(
    State(app_state): State<AppState>,
    PathId(department_id): PathId,
) -> Response {
    info!(department_id, "Handling delete_department request");
    let outcome = leavedesk_api::delete_department(
        &mut *app_state.persistence.lock().await,
        department_id,
    );
    respond(outcome, StatusCode::OK)
}

// ============================================================================
// Employees
// ============================================================================

async fn handle_list_employees(State(app_state): State<AppState>) -> Response {
    let outcome = leavedesk_api::list_employees(&mut *app_state.persistence.lock().await);
    respond(outcome, StatusCode::OK)
}

async fn handle_get_employee(
    State(app_state): State<AppState>,
    PathId(employee_id): PathId,
) -> Response {
    let outcome = leavedesk_api::get_employee(
        &mut *app_state.persistence.lock().await,
        employee_id,
    );
    respond(outcome, StatusCode::OK)
}

async fn handle_list_employees_in_department(
    State(app_state): State<AppState>,
    PathId(department_id): PathId,
) -> Response {
    let outcome = leavedesk_api::list_employees_in_department(
        &mut *app_state.persistence.lock().await,
        department_id,
    );
    respond(outcome, StatusCode::OK)
}

async fn handle_create_employee(
    State(app_state): State<AppState>,
    Body(req): Body<EmployeeRequest>,
) -> Response {
    info!(email = %req.email, "Handling create_employee request");
    let outcome = leavedesk_api::create_employee(&mut *app_state.persistence.lock().await, req);
    respond(outcome, StatusCode::CREATED)
}

async fn handle_update_employee(
    State(app_state): State<AppState>,
    PathId(employee_id): PathId,
    Body(req): Body<EmployeeRequest>,
) -> Response {
    info!(employee_id, "Handling update_employee request");
    let outcome = leavedesk_api::update_employee(
        &mut *app_state.persistence.lock().await,
        employee_id,
        req,
    );
    respond(outcome, StatusCode::OK)
}

async fn handle_delete_employee(
    State(app_state): State<AppState>,
    PathId(employee_id): PathId,
) -> Response {
    info!(employee_id, "Handling delete_employee request");
    let outcome = leavedesk_api::delete_employee(
        &mut *app_state.persistence.lock().await,
        employee_id,
    );
    respond(outcome, StatusCode::OK)
}

// ============================================================================
// Leave requests
// ============================================================================

async fn handle_list_leave_requests(State(app_state): State<AppState>) -> Response {
    let outcome = leavedesk_api::list_leave_requests(&mut *app_state.persistence.lock().await);
    respond(outcome, StatusCode::OK)
}

/// Handler for POST `/api/leaves/submit?employeeId=`.
async fn handle_submit_leave_request(
    State(app_state): State<AppState>,
    QueryParams(query): QueryParams<SubmitLeaveQuery>,
    Body(req): Body<SubmitLeaveRequest>,
) -> Response {
    info!(
        employee_id = query.employee_id,
        start_date = %req.start_date,
        end_date = %req.end_date,
        "Handling submit_leave_request request"
    );
    let outcome = leavedesk_api::submit_leave_request(
        &mut *app_state.persistence.lock().await,
        today(),
        query.employee_id,
        req,
    );
    respond(outcome, StatusCode::OK)
}

async fn handle_update_leave_request(
    State(app_state): State<AppState>,
    PathId(leave_request_id): PathId,
    Body(req): Body<LeaveDecisionRequest>,
) -> Response {
    info!(leave_request_id, status = %req.status, "Handling update_leave_request request");
    let outcome = leavedesk_api::update_leave_request(
        &mut *app_state.persistence.lock().await,
        app_state.transitions.as_ref(),
        leave_request_id,
        req,
    );
    respond(outcome, StatusCode::OK)
}

/// Handler for DELETE `/api/leaves/{id}`.
///
/// The path rule admits managers; deletion itself is reserved to ADMIN.
async fn handle_delete_leave_request(
    State(app_state): State<AppState>,
    Extension(actor): Extension<AuthenticatedActor>,
    PathId(leave_request_id): PathId,
) -> Result<Response, HttpError> {
    if !actor.has_role(AuthRole::Admin) {
        warn!(username = %actor.username, leave_request_id, "Leave deletion denied");
        return Err(ApiError::Unauthorized {
            action: String::from("delete_leave_request"),
            required_role: AuthRole::Admin.to_string(),
        }
        .into());
    }

    info!(leave_request_id, "Handling delete_leave_request request");
    let outcome = leavedesk_api::delete_leave_request(
        &mut *app_state.persistence.lock().await,
        leave_request_id,
    );
    Ok(respond(outcome, StatusCode::OK))
}

/// Builds the application router with all routes.
fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/auth/register", post(handle_register))
        .route("/api/auth/login", post(handle_login))
        .route(
            "/api/departments",
            get(handle_list_departments).post(handle_create_department),
        )
        .route(
            "/api/departments/{id}",
            get(handle_get_department)
                .put(handle_update_department)
                .delete(handle_delete_department),
        )
        .route(
            "/api/employees",
            get(handle_list_employees).post(handle_create_employee),
        )
        .route(
            "/api/employees/{id}",
            get(handle_get_employee)
                .put(handle_update_employee)
                .delete(handle_delete_employee),
        )
        .route(
            "/api/employees/department/{id}",
            get(handle_list_employees_in_department),
        )
        .route("/api/leaves", get(handle_list_leave_requests))
        .route("/api/leaves/submit", post(handle_submit_leave_request))
        .route("/api/leaves/update/{id}", put(handle_update_leave_request))
        .route("/api/leaves/{id}", delete(handle_delete_leave_request))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            access::require_access,
        ))
        .with_state(state)
}

fn build_state(
    persistence: Persistence,
    tokens: TokenService,
    strict_status_transitions: bool,
    bcrypt_cost: u32,
) -> AppState {
    let transitions: Arc<dyn TransitionPolicy> = if strict_status_transitions {
        Arc::new(PendingOnlyTransitions)
    } else {
        Arc::new(PermissiveTransitions)
    };

    AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        tokens: Arc::new(tokens),
        access_policy: Arc::new(AccessPolicy::default()),
        transitions,
        bcrypt_cost,
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Leavedesk Server");

    let mut persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    if let (Some(username), Some(password)) = (&args.admin_username, &args.admin_password) {
        let created: bool = AuthenticationService::ensure_admin(
            &mut persistence,
            username,
            password,
            args.bcrypt_cost,
        )?;
        if created {
            info!(username = %username, "Bootstrap administrator created");
        } else {
            info!(username = %username, "Bootstrap administrator already present");
        }
    }

    let tokens: TokenService = TokenService::new(TokenConfig {
        secret: args.jwt_secret.clone(),
        ttl: Duration::minutes(args.token_ttl_minutes),
        issuer: String::from("leavedesk"),
    })?;

    if args.strict_status_transitions {
        info!("Leave status changes restricted to PENDING requests");
    }

    let app: Router = build_router(build_state(
        persistence,
        tokens,
        args.strict_status_transitions,
        args.bcrypt_cost,
    ));

    let addr: SocketAddr = SocketAddr::new(args.bind, args.port);
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
