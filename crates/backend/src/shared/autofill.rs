//! Заполнение полей аудита перед записью в БД.
//!
//! Репозиторий вызывает [`apply`] непосредственно перед insert/update,
//! передавая вид операции и контекст текущего запроса. Сущность участвует,
//! реализуя [`AutoFill`].

use chrono::Utc;
use contracts::domain::common::{AuditField, AutoFill};
use std::fmt;
use thiserror::Error;

/// Вид операции записи
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationType {
    Insert,
    Update,
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationType::Insert => f.write_str("INSERT"),
            OperationType::Update => f.write_str("UPDATE"),
        }
    }
}

/// Контекст запроса: кто выполняет операцию.
///
/// Строится для каждого запроса из проверенного JWT и передаётся явно.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AuditContext {
    actor_id: Option<i64>,
}

impl AuditContext {
    pub fn for_actor(actor_id: i64) -> Self {
        Self {
            actor_id: Some(actor_id),
        }
    }

    /// Операции самого сервера (bootstrap), без пользователя
    pub fn system() -> Self {
        Self { actor_id: None }
    }

    pub fn actor_id(&self) -> Option<i64> {
        self.actor_id
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AutoFillError {
    #[error("audit field fill failed: {0}")]
    MissingField(AuditField),
}

/// Заполняет поля аудита `target` для операции `kind`.
///
/// * `None` — ничего не делает.
/// * `Insert` — одно и то же время в createTime/updateTime, актор в
///   createUser/updateUser.
/// * `Update` — только updateTime/updateUser.
///
/// Все нужные поля проверяются до записи: при ошибке сущность не меняется.
pub fn apply<T>(
    kind: OperationType,
    target: Option<&mut T>,
    ctx: &AuditContext,
) -> Result<(), AutoFillError>
where
    T: AutoFill + ?Sized,
{
    let Some(target) = target else {
        return Ok(());
    };

    let actor = ctx.actor_id();
    tracing::debug!(operation = %kind, actor = ?actor, "Auto-filling audit fields");

    let slots = target.audit_slots();
    match kind {
        OperationType::Insert => {
            let create_time = require(slots.create_time, AuditField::CreateTime)?;
            let update_time = require(slots.update_time, AuditField::UpdateTime)?;
            let create_user = require(slots.create_user, AuditField::CreateUser)?;
            let update_user = require(slots.update_user, AuditField::UpdateUser)?;

            let now = Utc::now();
            *create_time = Some(now);
            *update_time = Some(now);
            *create_user = actor;
            *update_user = actor;
        }
        OperationType::Update => {
            let update_time = require(slots.update_time, AuditField::UpdateTime)?;
            let update_user = require(slots.update_user, AuditField::UpdateUser)?;

            *update_time = Some(Utc::now());
            *update_user = actor;
        }
    }

    Ok(())
}

fn require<S>(slot: Option<S>, field: AuditField) -> Result<S, AutoFillError> {
    slot.ok_or_else(|| {
        tracing::error!("Entity does not expose audit field {}", field);
        AutoFillError::MissingField(field)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration};
    use contracts::domain::a001_category::aggregate::Category;
    use contracts::domain::common::AuditSlots;

    /// Сущность без поля updateUser
    #[derive(Default)]
    struct NoUpdateUser {
        create_time: Option<DateTime<Utc>>,
        update_time: Option<DateTime<Utc>>,
        create_user: Option<i64>,
    }

    impl AutoFill for NoUpdateUser {
        fn audit_slots(&mut self) -> AuditSlots<'_> {
            AuditSlots {
                create_time: Some(&mut self.create_time),
                update_time: Some(&mut self.update_time),
                create_user: Some(&mut self.create_user),
                update_user: None,
            }
        }
    }

    #[test]
    fn test_insert_fills_all_fields() {
        let ctx = AuditContext::for_actor(42);
        let mut category = Category::default();

        let before = Utc::now();
        apply(OperationType::Insert, Some(&mut category), &ctx).unwrap();
        let after = Utc::now();

        let created = category.create_time.unwrap();
        assert_eq!(category.create_time, category.update_time);
        assert!(created >= before && created <= after);
        assert_eq!(category.create_user, Some(42));
        assert_eq!(category.update_user, Some(42));
    }

    #[test]
    fn test_update_keeps_create_fields() {
        let created = Utc::now() - Duration::days(3);
        let mut category = Category {
            id: Some(1),
            create_time: Some(created),
            update_time: Some(created),
            create_user: Some(7),
            update_user: Some(7),
            ..Default::default()
        };

        apply(
            OperationType::Update,
            Some(&mut category),
            &AuditContext::for_actor(42),
        )
        .unwrap();

        assert_eq!(category.create_time, Some(created));
        assert_eq!(category.create_user, Some(7));
        assert!(category.update_time.unwrap() > created);
        assert_eq!(category.update_user, Some(42));
    }

    #[test]
    fn test_absent_target_is_noop() {
        let ctx = AuditContext::for_actor(1);
        assert!(apply::<Category>(OperationType::Insert, None, &ctx).is_ok());

        let mut args: Vec<Category> = Vec::new();
        assert!(apply(OperationType::Update, args.first_mut(), &ctx).is_ok());
    }

    #[test]
    fn test_missing_field_fails_without_partial_mutation() {
        let ctx = AuditContext::for_actor(5);
        let mut entity = NoUpdateUser::default();

        let err = apply(OperationType::Insert, Some(&mut entity), &ctx).unwrap_err();
        assert_eq!(err, AutoFillError::MissingField(AuditField::UpdateUser));
        assert_eq!(err.to_string(), "audit field fill failed: updateUser");
        assert!(entity.create_time.is_none());
        assert!(entity.update_time.is_none());
        assert!(entity.create_user.is_none());

        let err = apply(OperationType::Update, Some(&mut entity), &ctx).unwrap_err();
        assert_eq!(err, AutoFillError::MissingField(AuditField::UpdateUser));
        assert!(entity.update_time.is_none());
    }

    #[test]
    fn test_works_through_trait_object() {
        let mut category = Category::default();
        let target: &mut dyn AutoFill = &mut category;
        apply(OperationType::Insert, Some(target), &AuditContext::system()).unwrap();
        assert!(category.create_time.is_some());
        assert_eq!(category.create_user, None);
    }

    #[test]
    fn test_operation_type_display() {
        assert_eq!(OperationType::Insert.to_string(), "INSERT");
        assert_eq!(OperationType::Update.to_string(), "UPDATE");
    }
}
