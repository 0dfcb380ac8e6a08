//! API Routes
//!
//! HTTP endpoint definitions. Handlers decode the request, call one usecase
//! method and serialize its outcome.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::domain::{OperationContext, Position, User};
use crate::error::AppError;
use crate::usecase::{
    CompanyRequest, PositionRequest, StatusResult, TopupCompanyBalance, UserRequest,
    WithdrawRequest,
};

use super::state::AppState;

// =========================================================================
// Request/Response types
// =========================================================================

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    10
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Serialize a usecase outcome that already carries its status.
fn respond<T: Serialize>(result: StatusResult<T>) -> Response {
    match result {
        Ok((value, status)) => (status, Json(value)).into_response(),
        Err((status, err)) => err.into_response_with_status(status),
    }
}

/// Create the API router
pub fn create_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/company", get(get_company).post(upsert_company))
        .route("/company/topup", post(topup_company))
        .route("/positions", get(list_positions).post(create_position))
        .route(
            "/positions/:id",
            get(get_position).put(update_position).delete(delete_position),
        )
        .route("/users", get(list_users).post(create_user))
        .route("/users/withdraw", post(withdraw_salary))
        .route(
            "/users/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/transactions", get(list_transactions))
}

// =========================================================================
// Company
// =========================================================================

async fn get_company(
    State(state): State<Arc<AppState>>,
    Extension(context): Extension<OperationContext>,
) -> Response {
    respond(state.company.get_company_info(&context).await)
}

async fn upsert_company(
    State(state): State<Arc<AppState>>,
    Extension(context): Extension<OperationContext>,
    Json(request): Json<CompanyRequest>,
) -> Response {
    respond(state.company.create_or_update_company(&context, request).await)
}

async fn topup_company(
    State(state): State<Arc<AppState>>,
    Extension(context): Extension<OperationContext>,
    Json(request): Json<TopupCompanyBalance>,
) -> Response {
    respond(state.company.topup_balance(&context, request).await)
}

// =========================================================================
// Positions
// =========================================================================

async fn list_positions(
    State(state): State<Arc<AppState>>,
    Extension(context): Extension<OperationContext>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Vec<Position>>, AppError> {
    let positions = state
        .position
        .fetch_position(&context, query.limit, query.offset)
        .await?;

    Ok(Json(positions))
}

async fn create_position(
    State(state): State<Arc<AppState>>,
    Extension(context): Extension<OperationContext>,
    Json(request): Json<PositionRequest>,
) -> Result<(StatusCode, Json<Position>), AppError> {
    let position = state.position.store_position(&context, request).await?;

    Ok((StatusCode::CREATED, Json(position)))
}

async fn get_position(
    State(state): State<Arc<AppState>>,
    Extension(context): Extension<OperationContext>,
    Path(id): Path<i64>,
) -> Result<Json<Position>, AppError> {
    Ok(Json(state.position.get_by_id(&context, id).await?))
}

async fn update_position(
    State(state): State<Arc<AppState>>,
    Extension(context): Extension<OperationContext>,
    Path(id): Path<i64>,
    Json(request): Json<PositionRequest>,
) -> Result<Json<Position>, AppError> {
    Ok(Json(state.position.edit_position(&context, id, request).await?))
}

async fn delete_position(
    State(state): State<Arc<AppState>>,
    Extension(context): Extension<OperationContext>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.position.destroy_position(&context, id).await?;

    Ok(StatusCode::NO_CONTENT)
}

// =========================================================================
// Users
// =========================================================================

async fn list_users(
    State(state): State<Arc<AppState>>,
    Extension(context): Extension<OperationContext>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Vec<User>>, AppError> {
    let users = state
        .user
        .fetch_user(&context, query.limit, query.offset)
        .await?;

    Ok(Json(users))
}

async fn create_user(
    State(state): State<Arc<AppState>>,
    Extension(context): Extension<OperationContext>,
    Json(request): Json<UserRequest>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let user = state.user.store_user(&context, request).await?;

    Ok((StatusCode::CREATED, Json(user)))
}

async fn get_user(
    State(state): State<Arc<AppState>>,
    Extension(context): Extension<OperationContext>,
    Path(id): Path<i64>,
) -> Result<Json<User>, AppError> {
    Ok(Json(state.user.get_by_id(&context, id).await?))
}

async fn update_user(
    State(state): State<Arc<AppState>>,
    Extension(context): Extension<OperationContext>,
    Path(id): Path<i64>,
    Json(request): Json<UserRequest>,
) -> Result<Json<User>, AppError> {
    Ok(Json(state.user.edit_user(&context, id, request).await?))
}

async fn delete_user(
    State(state): State<Arc<AppState>>,
    Extension(context): Extension<OperationContext>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.user.destroy_user(&context, id).await?;

    Ok(StatusCode::NO_CONTENT)
}

async fn withdraw_salary(
    State(state): State<Arc<AppState>>,
    Extension(context): Extension<OperationContext>,
    Json(request): Json<WithdrawRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    state.user.withdraw_salary(&context, request).await?;

    Ok(Json(MessageResponse {
        message: "success withdraw salary".to_string(),
    }))
}

// =========================================================================
// Transactions
// =========================================================================

async fn list_transactions(
    State(state): State<Arc<AppState>>,
    Extension(context): Extension<OperationContext>,
    Query(query): Query<PageQuery>,
) -> Response {
    respond(
        state
            .transaction
            .fetch(&context, query.limit, query.offset)
            .await,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_page_query_defaults() {
        let query: PageQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.limit, 10);
        assert_eq!(query.offset, 0);
    }

    #[test]
    fn test_user_request_deserialize() {
        let json = r#"{
            "secret_id": "asdjksakdas",
            "name": "user",
            "email": "x@company.com",
            "phone": "0852121280",
            "address": "Now St.",
            "position_id": 1
        }"#;

        let request: UserRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.secret_id, "asdjksakdas");
        assert_eq!(request.position_id, 1);
    }

    #[test]
    fn test_company_request_accepts_string_balance() {
        let json = r#"{"name": "Test Company", "address": "Cempaka St.", "balance": "200000"}"#;

        let request: CompanyRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.balance, dec!(200000));
    }

    #[test]
    fn test_respond_uses_usecase_status() {
        let ok: StatusResult<u8> = Ok((1, StatusCode::OK));
        assert_eq!(respond(ok).status(), StatusCode::OK);

        let err: StatusResult<u8> = Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Internal("boom".to_string()),
        ));
        assert_eq!(respond(err).status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
