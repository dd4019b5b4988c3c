use axum::{extract::State, Json};
use contracts::domain::a001_category::aggregate::{Category, CategoryDto, CategoryPageQuery};
use contracts::domain::common::serde_helpers::empty_string_as_none;
use contracts::shared::api_response::{ApiResponse, PageResult};
use serde::Deserialize;

use crate::domain::a001_category::service;
use crate::routes::AppState;
use crate::shared::error::AppResult;
use crate::shared::extract::{JsonBody, PathParams, QueryParams};
use crate::system::auth::extractor::CurrentUser;

#[derive(Debug, Deserialize)]
pub struct IdParams {
    pub id: i64,
}

#[derive(Debug, Deserialize)]
pub struct TypeParams {
    #[serde(rename = "type", default, deserialize_with = "empty_string_as_none")]
    pub category_type: Option<i32>,
}

/// POST /admin/category
pub async fn add(
    State(state): State<AppState>,
    user: CurrentUser,
    JsonBody(dto): JsonBody<CategoryDto>,
) -> AppResult<Json<ApiResponse<()>>> {
    tracing::info!("Add category: {:?}", dto);
    service::create(&state.db, dto, &user.audit_context()).await?;
    Ok(Json(ApiResponse::ok()))
}

/// PUT /admin/category
pub async fn update(
    State(state): State<AppState>,
    user: CurrentUser,
    JsonBody(dto): JsonBody<CategoryDto>,
) -> AppResult<Json<ApiResponse<()>>> {
    tracing::info!("Update category: {:?}", dto);
    service::update(&state.db, dto, &user.audit_context()).await?;
    Ok(Json(ApiResponse::ok()))
}

/// GET /admin/category/page
pub async fn page(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<CategoryPageQuery>,
) -> AppResult<Json<ApiResponse<PageResult<Category>>>> {
    tracing::info!("Category page query: {:?}", query);
    let result = service::page(&state.db, &query).await?;
    Ok(Json(ApiResponse::success(result)))
}

/// POST /admin/category/status/:status?id=
pub async fn start_or_stop(
    State(state): State<AppState>,
    user: CurrentUser,
    PathParams(status): PathParams<i32>,
    QueryParams(params): QueryParams<IdParams>,
) -> AppResult<Json<ApiResponse<()>>> {
    tracing::info!("Set category {} status to {}", params.id, status);
    service::start_or_stop(&state.db, status, params.id, &user.audit_context()).await?;
    Ok(Json(ApiResponse::ok()))
}

/// DELETE /admin/category?id=
pub async fn delete(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<IdParams>,
) -> AppResult<Json<ApiResponse<()>>> {
    tracing::info!("Delete category: {}", params.id);
    service::delete(&state.db, params.id).await?;
    Ok(Json(ApiResponse::ok()))
}

/// GET /admin/category/list?type=
pub async fn list_by_type(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<TypeParams>,
) -> AppResult<Json<ApiResponse<Vec<Category>>>> {
    tracing::info!("List categories by type: {:?}", params.category_type);
    let categories = service::list_by_type(&state.db, params.category_type).await?;
    Ok(Json(ApiResponse::success(categories)))
}
