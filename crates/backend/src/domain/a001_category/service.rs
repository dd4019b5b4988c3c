use contracts::domain::a001_category::aggregate::{
    Category, CategoryDto, CategoryPageQuery, CategoryStatus,
};
use contracts::shared::api_response::PageResult;
use sea_orm::DatabaseConnection;

use super::repository;
use crate::domain::{a002_dish, a003_setmeal};
use crate::shared::autofill::AuditContext;
use crate::shared::error::{AppError, AppResult};

pub const CATEGORY_LINKED_TO_DISH: &str = "Category is linked to dishes and cannot be deleted";
pub const CATEGORY_LINKED_TO_SETMEAL: &str =
    "Category is linked to set meals and cannot be deleted";

/// Создание новой категории (включена сразу)
pub async fn create(
    db: &DatabaseConnection,
    dto: CategoryDto,
    ctx: &AuditContext,
) -> AppResult<i64> {
    let mut category = Category::new_for_insert(&dto);

    // Валидация
    category.validate_for_insert().map_err(AppError::Business)?;

    repository::insert(db, &mut category, ctx).await
}

/// Обновление категории, в DTO обязателен id
pub async fn update(
    db: &DatabaseConnection,
    dto: CategoryDto,
    ctx: &AuditContext,
) -> AppResult<()> {
    let mut category = Category::from_dto(&dto);
    category.validate_for_update().map_err(AppError::Business)?;

    repository::update(db, &mut category, ctx).await
}

/// Включение (1) / выключение (0) категории
pub async fn start_or_stop(
    db: &DatabaseConnection,
    status: i32,
    id: i64,
    ctx: &AuditContext,
) -> AppResult<()> {
    let status = CategoryStatus::try_from(status).map_err(AppError::Business)?;
    let mut category = Category::status_change(id, status);

    repository::update(db, &mut category, ctx).await
}

pub async fn page(
    db: &DatabaseConnection,
    query: &CategoryPageQuery,
) -> AppResult<PageResult<Category>> {
    let (records, total) = repository::page(db, query).await?;
    Ok(PageResult { total, records })
}

/// Удаление: запрещено, пока на категорию ссылаются блюда или комплексные обеды.
/// Удаление несуществующей категории не ошибка.
pub async fn delete(db: &DatabaseConnection, id: i64) -> AppResult<()> {
    let dish_count = a002_dish::repository::count_by_category_id(db, id).await?;
    if dish_count > 0 {
        return Err(AppError::business(CATEGORY_LINKED_TO_DISH));
    }

    let setmeal_count = a003_setmeal::repository::count_by_category_id(db, id).await?;
    if setmeal_count > 0 {
        return Err(AppError::business(CATEGORY_LINKED_TO_SETMEAL));
    }

    if !repository::delete(db, id).await? {
        tracing::debug!("Category {} was already absent", id);
    }
    Ok(())
}

/// Включённые категории по типу (все типы, если тип не задан)
pub async fn list_by_type(
    db: &DatabaseConnection,
    category_type: Option<i32>,
) -> AppResult<Vec<Category>> {
    repository::list_enabled(db, category_type).await
}
