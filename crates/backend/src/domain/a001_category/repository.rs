use contracts::domain::a001_category::aggregate::{
    Category, CategoryPageQuery, CategoryStatus, CategoryType,
};
use sea_orm::entity::prelude::*;
use sea_orm::{
    ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Select, Set,
};

use crate::shared::autofill::{self, AuditContext, OperationType};
use crate::shared::error::{AppError, AppResult};

const DUPLICATE_NAME: &str = "Category name already exists";

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "category")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "type")]
    pub category_type: i32,
    pub name: String,
    pub sort: i32,
    pub status: i32,
    pub create_time: Option<chrono::DateTime<chrono::Utc>>,
    pub update_time: Option<chrono::DateTime<chrono::Utc>>,
    pub create_user: Option<i64>,
    pub update_user: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Category {
    fn from(m: Model) -> Self {
        Category {
            id: Some(m.id),
            category_type: CategoryType::try_from(m.category_type).ok(),
            name: Some(m.name),
            sort: Some(m.sort),
            status: CategoryStatus::try_from(m.status).ok(),
            create_time: m.create_time,
            update_time: m.update_time,
            create_user: m.create_user,
            update_user: m.update_user,
        }
    }
}

fn set_or_skip<T>(value: Option<T>) -> ActiveValue<T>
where
    T: Into<sea_orm::Value>,
{
    match value {
        Some(v) => Set(v),
        None => ActiveValue::NotSet,
    }
}

fn to_active(category: &Category) -> ActiveModel {
    ActiveModel {
        id: set_or_skip(category.id),
        category_type: set_or_skip(category.category_type.map(i32::from)),
        name: set_or_skip(category.name.clone()),
        sort: set_or_skip(category.sort),
        status: set_or_skip(category.status.map(i32::from)),
        create_time: set_or_skip(category.create_time.map(Some)),
        update_time: set_or_skip(category.update_time.map(Some)),
        create_user: set_or_skip(category.create_user.map(Some)),
        update_user: set_or_skip(category.update_user.map(Some)),
    }
}

/// Сортировка списков: sort по возрастанию, затем новые первыми
fn ordered(query: Select<Entity>) -> Select<Entity> {
    query
        .order_by_asc(Column::Sort)
        .order_by_desc(Column::CreateTime)
        .order_by_asc(Column::Id)
}

/// Вставка категории; поля аудита заполняются здесь же
pub async fn insert(
    db: &DatabaseConnection,
    category: &mut Category,
    ctx: &AuditContext,
) -> AppResult<i64> {
    autofill::apply(OperationType::Insert, Some(&mut *category), ctx)?;

    let mut active = to_active(category);
    active.id = ActiveValue::NotSet;
    let model = active
        .insert(db)
        .await
        .map_err(|e| AppError::from_db_unique(e, DUPLICATE_NAME))?;
    category.id = Some(model.id);
    Ok(model.id)
}

/// Частичное обновление: пишутся только заполненные поля.
/// createTime/createUser никогда не перезаписываются.
pub async fn update(
    db: &DatabaseConnection,
    category: &mut Category,
    ctx: &AuditContext,
) -> AppResult<()> {
    let id = category
        .id
        .ok_or_else(|| AppError::business("Category id is required"))?;

    autofill::apply(OperationType::Update, Some(&mut *category), ctx)?;

    let mut active = to_active(category);
    active.create_time = ActiveValue::NotSet;
    active.create_user = ActiveValue::NotSet;

    match active.update(db).await {
        Ok(_) => Ok(()),
        Err(DbErr::RecordNotUpdated | DbErr::RecordNotFound(_)) => Err(AppError::NotFound(format!(
            "Category {} not found",
            id
        ))),
        Err(e) => Err(AppError::from_db_unique(e, DUPLICATE_NAME)),
    }
}

#[cfg(test)]
pub async fn get_by_id(db: &DatabaseConnection, id: i64) -> AppResult<Option<Category>> {
    let result = Entity::find_by_id(id).one(db).await?;
    Ok(result.map(Into::into))
}

/// Постраничный список с фильтрами по имени (подстрока) и типу
pub async fn page(
    db: &DatabaseConnection,
    query: &CategoryPageQuery,
) -> AppResult<(Vec<Category>, u64)> {
    let mut select = Entity::find();
    if let Some(name) = query.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
        select = select.filter(Column::Name.contains(name));
    }
    if let Some(category_type) = query.category_type {
        select = select.filter(Column::CategoryType.eq(category_type));
    }

    let paginator = ordered(select).paginate(db, query.page_size());
    let total = paginator.num_items().await?;
    let models = paginator.fetch_page(query.page() - 1).await?;

    Ok((models.into_iter().map(Into::into).collect(), total))
}

/// Включённые категории, при необходимости только одного типа
pub async fn list_enabled(
    db: &DatabaseConnection,
    category_type: Option<i32>,
) -> AppResult<Vec<Category>> {
    let mut select = Entity::find().filter(Column::Status.eq(CategoryStatus::Enabled.code()));
    if let Some(category_type) = category_type {
        select = select.filter(Column::CategoryType.eq(category_type));
    }
    let models = ordered(select).all(db).await?;
    Ok(models.into_iter().map(Into::into).collect())
}

pub async fn delete(db: &DatabaseConnection, id: i64) -> AppResult<bool> {
    let result = Entity::delete_by_id(id).exec(db).await?;
    Ok(result.rows_affected > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::memory_connection;
    use contracts::domain::a001_category::aggregate::CategoryDto;

    fn new_category(name: &str, category_type: CategoryType, sort: i32) -> Category {
        Category::new_for_insert(&CategoryDto {
            id: None,
            category_type: Some(category_type),
            name: Some(name.into()),
            sort: Some(sort),
        })
    }

    #[tokio::test]
    async fn test_insert_stores_audit_fields() {
        let db = memory_connection().await;
        let mut category = new_category("Soups", CategoryType::Dish, 1);

        let id = insert(&db, &mut category, &AuditContext::for_actor(42))
            .await
            .unwrap();

        let stored = get_by_id(&db, id).await.unwrap().unwrap();
        assert_eq!(stored.name.as_deref(), Some("Soups"));
        assert_eq!(stored.status, Some(CategoryStatus::Enabled));
        assert_eq!(stored.create_user, Some(42));
        assert_eq!(stored.update_user, Some(42));
        assert!(stored.create_time.is_some());
        assert_eq!(stored.create_time, stored.update_time);
    }

    #[tokio::test]
    async fn test_duplicate_name_is_business_error() {
        let db = memory_connection().await;
        let ctx = AuditContext::for_actor(1);
        insert(&db, &mut new_category("Drinks", CategoryType::Dish, 1), &ctx)
            .await
            .unwrap();

        let err = insert(&db, &mut new_category("Drinks", CategoryType::Setmeal, 2), &ctx)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Business(msg) if msg == DUPLICATE_NAME));
    }

    #[tokio::test]
    async fn test_update_is_partial_and_keeps_create_fields() {
        let db = memory_connection().await;
        let mut category = new_category("Desserts", CategoryType::Dish, 5);
        let id = insert(&db, &mut category, &AuditContext::for_actor(1))
            .await
            .unwrap();
        let original = get_by_id(&db, id).await.unwrap().unwrap();

        let mut patch = Category::status_change(id, CategoryStatus::Disabled);
        update(&db, &mut patch, &AuditContext::for_actor(2))
            .await
            .unwrap();

        let stored = get_by_id(&db, id).await.unwrap().unwrap();
        assert_eq!(stored.status, Some(CategoryStatus::Disabled));
        assert_eq!(stored.name, original.name);
        assert_eq!(stored.sort, Some(5));
        assert_eq!(stored.create_time, original.create_time);
        assert_eq!(stored.create_user, Some(1));
        assert_eq!(stored.update_user, Some(2));
        assert!(stored.update_time >= original.update_time);
    }

    #[tokio::test]
    async fn test_update_missing_row_is_not_found() {
        let db = memory_connection().await;
        let mut patch = Category::status_change(404, CategoryStatus::Enabled);
        let err = update(&db, &mut patch, &AuditContext::for_actor(1))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_page_filters_and_orders() {
        let db = memory_connection().await;
        let ctx = AuditContext::for_actor(1);
        for (name, ty, sort) in [
            ("Hot dishes", CategoryType::Dish, 3),
            ("Cold dishes", CategoryType::Dish, 1),
            ("Business lunch", CategoryType::Setmeal, 2),
            ("Kids lunch", CategoryType::Setmeal, 4),
        ] {
            insert(&db, &mut new_category(name, ty, sort), &ctx)
                .await
                .unwrap();
        }

        let (records, total) = page(&db, &CategoryPageQuery::default()).await.unwrap();
        assert_eq!(total, 4);
        let sorts: Vec<i32> = records.iter().filter_map(|c| c.sort).collect();
        assert_eq!(sorts, vec![1, 2, 3, 4]);

        let query = CategoryPageQuery {
            name: Some("lunch".into()),
            category_type: Some(CategoryType::Setmeal.code()),
            page: Some(2),
            page_size: Some(1),
        };
        let (records, total) = page(&db, &query).await.unwrap();
        assert_eq!(total, 2);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name.as_deref(), Some("Kids lunch"));
    }

    #[tokio::test]
    async fn test_page_far_beyond_last_is_empty() {
        let db = memory_connection().await;
        insert(
            &db,
            &mut new_category("Noodles", CategoryType::Dish, 1),
            &AuditContext::for_actor(1),
        )
        .await
        .unwrap();

        let query: CategoryPageQuery =
            serde_json::from_str(r#"{"page": "18446744073709551615", "pageSize": "10"}"#)
                .unwrap();
        let (records, total) = page(&db, &query).await.unwrap();
        assert_eq!(total, 1);
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_list_enabled_skips_disabled() {
        let db = memory_connection().await;
        let ctx = AuditContext::for_actor(1);
        let id = insert(&db, &mut new_category("Salads", CategoryType::Dish, 1), &ctx)
            .await
            .unwrap();
        insert(&db, &mut new_category("Grill", CategoryType::Dish, 2), &ctx)
            .await
            .unwrap();
        insert(&db, &mut new_category("Combo", CategoryType::Setmeal, 1), &ctx)
            .await
            .unwrap();
        update(
            &db,
            &mut Category::status_change(id, CategoryStatus::Disabled),
            &ctx,
        )
        .await
        .unwrap();

        let dishes = list_enabled(&db, Some(CategoryType::Dish.code())).await.unwrap();
        assert_eq!(dishes.len(), 1);
        assert_eq!(dishes[0].name.as_deref(), Some("Grill"));

        let all = list_enabled(&db, None).await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn test_delete() {
        let db = memory_connection().await;
        let id = insert(
            &db,
            &mut new_category("Bakery", CategoryType::Dish, 1),
            &AuditContext::for_actor(1),
        )
        .await
        .unwrap();

        assert!(delete(&db, id).await.unwrap());
        assert!(!delete(&db, id).await.unwrap());
        assert!(get_by_id(&db, id).await.unwrap().is_none());
    }
}
