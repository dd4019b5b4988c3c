use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::common::serde_helpers::empty_string_as_none;
use crate::domain::common::{AuditSlots, AutoFill};

// ============================================================================
// Enums
// ============================================================================

/// Что группирует категория: блюда или комплексные обеды (set meals)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
pub enum CategoryType {
    Dish,
    Setmeal,
}

impl CategoryType {
    pub fn code(self) -> i32 {
        match self {
            CategoryType::Dish => 1,
            CategoryType::Setmeal => 2,
        }
    }
}

impl From<CategoryType> for i32 {
    fn from(value: CategoryType) -> Self {
        value.code()
    }
}

impl TryFrom<i32> for CategoryType {
    type Error = String;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(CategoryType::Dish),
            2 => Ok(CategoryType::Setmeal),
            other => Err(format!("Unknown category type: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
pub enum CategoryStatus {
    Disabled,
    Enabled,
}

impl CategoryStatus {
    pub fn code(self) -> i32 {
        match self {
            CategoryStatus::Disabled => 0,
            CategoryStatus::Enabled => 1,
        }
    }
}

impl From<CategoryStatus> for i32 {
    fn from(value: CategoryStatus) -> Self {
        value.code()
    }
}

impl TryFrom<i32> for CategoryStatus {
    type Error = String;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(CategoryStatus::Disabled),
            1 => Ok(CategoryStatus::Enabled),
            other => Err(format!("Unknown category status: {}", other)),
        }
    }
}

// ============================================================================
// Entity
// ============================================================================

/// Категория блюд / комплексных обедов.
///
/// Все поля кроме аудита опциональны: одна и та же структура используется
/// для полной вставки и для частичного обновления (пустые поля не пишутся).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: Option<i64>,
    #[serde(rename = "type")]
    pub category_type: Option<CategoryType>,
    pub name: Option<String>,
    pub sort: Option<i32>,
    pub status: Option<CategoryStatus>,
    pub create_time: Option<DateTime<Utc>>,
    pub update_time: Option<DateTime<Utc>>,
    pub create_user: Option<i64>,
    pub update_user: Option<i64>,
}

impl Category {
    /// Новая категория из DTO (включена по умолчанию)
    pub fn new_for_insert(dto: &CategoryDto) -> Self {
        Self {
            id: None,
            category_type: dto.category_type,
            name: dto.name.as_ref().map(|n| n.trim().to_string()),
            sort: Some(dto.sort.unwrap_or(0)),
            status: Some(CategoryStatus::Enabled),
            ..Default::default()
        }
    }

    /// Частичное обновление: только заполненные в DTO поля
    pub fn from_dto(dto: &CategoryDto) -> Self {
        Self {
            id: dto.id,
            category_type: dto.category_type,
            name: dto.name.as_ref().map(|n| n.trim().to_string()),
            sort: dto.sort,
            ..Default::default()
        }
    }

    /// Изменение статуса (включить/выключить)
    pub fn status_change(id: i64, status: CategoryStatus) -> Self {
        Self {
            id: Some(id),
            status: Some(status),
            ..Default::default()
        }
    }

    pub fn validate_for_insert(&self) -> Result<(), String> {
        match &self.name {
            Some(name) if !name.is_empty() => {}
            _ => return Err("Category name must not be empty".into()),
        }
        if self.category_type.is_none() {
            return Err("Category type is required".into());
        }
        Ok(())
    }

    pub fn validate_for_update(&self) -> Result<(), String> {
        if self.id.is_none() {
            return Err("Category id is required".into());
        }
        if matches!(&self.name, Some(name) if name.is_empty()) {
            return Err("Category name must not be empty".into());
        }
        Ok(())
    }
}

impl AutoFill for Category {
    fn audit_slots(&mut self) -> AuditSlots<'_> {
        AuditSlots::full(
            &mut self.create_time,
            &mut self.update_time,
            &mut self.create_user,
            &mut self.update_user,
        )
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// DTO для создания/обновления категории
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryDto {
    pub id: Option<i64>,
    #[serde(rename = "type")]
    pub category_type: Option<CategoryType>,
    pub name: Option<String>,
    pub sort: Option<i32>,
}

pub const DEFAULT_PAGE_SIZE: u64 = 10;
pub const MAX_PAGE_SIZE: u64 = 500;
/// OFFSET = (page - 1) * page_size должен помещаться в i64 (SQLite)
pub const MAX_PAGE: u64 = i64::MAX as u64 / MAX_PAGE_SIZE;

/// Параметры постраничного запроса (`/admin/category/page`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPageQuery {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub page: Option<u64>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub page_size: Option<u64>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub name: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "empty_string_as_none")]
    pub category_type: Option<i32>,
}

impl CategoryPageQuery {
    /// Номер страницы, начиная с 1
    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1).clamp(1, MAX_PAGE)
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_serializes_type_and_status_as_numbers() {
        let category = Category {
            id: Some(7),
            category_type: Some(CategoryType::Setmeal),
            name: Some("Lunch".into()),
            sort: Some(3),
            status: Some(CategoryStatus::Enabled),
            create_user: Some(1),
            ..Default::default()
        };
        let json = serde_json::to_value(&category).unwrap();
        assert_eq!(json["type"], 2);
        assert_eq!(json["status"], 1);
        assert_eq!(json["createUser"], 1);
        assert!(json["updateTime"].is_null());
    }

    #[test]
    fn test_dto_rejects_unknown_type() {
        let err = serde_json::from_str::<CategoryDto>(r#"{"type": 9, "name": "x"}"#);
        assert!(err.is_err());
        let ok: CategoryDto = serde_json::from_str(r#"{"type": 1, "name": "Hot", "sort": 2}"#).unwrap();
        assert_eq!(ok.category_type, Some(CategoryType::Dish));
    }

    #[test]
    fn test_new_for_insert_defaults() {
        let dto = CategoryDto {
            id: Some(99),
            category_type: Some(CategoryType::Dish),
            name: Some("  Soups ".into()),
            sort: None,
        };
        let category = Category::new_for_insert(&dto);
        assert_eq!(category.id, None);
        assert_eq!(category.name.as_deref(), Some("Soups"));
        assert_eq!(category.sort, Some(0));
        assert_eq!(category.status, Some(CategoryStatus::Enabled));
        assert!(category.validate_for_insert().is_ok());
    }

    #[test]
    fn test_validation() {
        let blank = Category::new_for_insert(&CategoryDto {
            category_type: Some(CategoryType::Dish),
            name: Some("   ".into()),
            ..Default::default()
        });
        assert!(blank.validate_for_insert().is_err());

        let untyped = Category::new_for_insert(&CategoryDto {
            name: Some("Drinks".into()),
            ..Default::default()
        });
        assert!(untyped.validate_for_insert().is_err());

        assert!(Category::from_dto(&CategoryDto::default())
            .validate_for_update()
            .is_err());
        assert!(Category::status_change(1, CategoryStatus::Disabled)
            .validate_for_update()
            .is_ok());
    }

    #[test]
    fn test_page_query_defaults_and_clamp() {
        let q = CategoryPageQuery::default();
        assert_eq!(q.page(), 1);
        assert_eq!(q.page_size(), DEFAULT_PAGE_SIZE);

        let q = CategoryPageQuery {
            page: Some(0),
            page_size: Some(100_000),
            ..Default::default()
        };
        assert_eq!(q.page(), 1);
        assert_eq!(q.page_size(), MAX_PAGE_SIZE);
    }

    #[test]
    fn test_page_number_is_bounded() {
        let q: CategoryPageQuery =
            serde_json::from_str(r#"{"page": "18446744073709551615", "pageSize": "500"}"#)
                .unwrap();
        assert_eq!(q.page(), MAX_PAGE);
        let offset = (q.page() - 1).checked_mul(q.page_size()).unwrap();
        assert!(offset <= i64::MAX as u64);
    }
}
