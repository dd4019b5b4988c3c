use axum::{extract::State, Json};
use contracts::shared::api_response::ApiResponse;
use contracts::system::auth::{LoginRequest, LoginResponse};

use crate::routes::AppState;
use crate::shared::error::AppResult;
use crate::shared::extract::JsonBody;
use crate::system::{auth::jwt, employees::service as employee_service};

/// POST /admin/employee/login
pub async fn login(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<LoginRequest>,
) -> AppResult<Json<ApiResponse<LoginResponse>>> {
    tracing::info!("Employee login: {}", request.username);

    let employee =
        employee_service::verify_credentials(&state.db, &request.username, &request.password)
            .await?;
    let id = employee.id.unwrap_or_default();

    let token = jwt::generate_token(
        &state.jwt_secret,
        state.token_ttl_hours,
        id,
        &employee.username,
    )?;

    Ok(Json(ApiResponse::success(LoginResponse {
        id,
        user_name: employee.username,
        name: employee.name,
        token,
    })))
}
