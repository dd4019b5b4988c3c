use chrono::{DateTime, Utc};
use std::fmt;

/// Audit field of an entity, named by its wire form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuditField {
    CreateTime,
    UpdateTime,
    CreateUser,
    UpdateUser,
}

impl AuditField {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditField::CreateTime => "createTime",
            AuditField::UpdateTime => "updateTime",
            AuditField::CreateUser => "createUser",
            AuditField::UpdateUser => "updateUser",
        }
    }
}

impl fmt::Display for AuditField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mutable views into the audit fields an entity exposes.
///
/// A `None` slot means the entity does not carry that field.
#[derive(Default)]
pub struct AuditSlots<'a> {
    pub create_time: Option<&'a mut Option<DateTime<Utc>>>,
    pub update_time: Option<&'a mut Option<DateTime<Utc>>>,
    pub create_user: Option<&'a mut Option<i64>>,
    pub update_user: Option<&'a mut Option<i64>>,
}

impl<'a> AuditSlots<'a> {
    /// Slots for an entity carrying all four audit fields.
    pub fn full(
        create_time: &'a mut Option<DateTime<Utc>>,
        update_time: &'a mut Option<DateTime<Utc>>,
        create_user: &'a mut Option<i64>,
        update_user: &'a mut Option<i64>,
    ) -> Self {
        Self {
            create_time: Some(create_time),
            update_time: Some(update_time),
            create_user: Some(create_user),
            update_user: Some(update_user),
        }
    }
}

/// Capability of an entity to have its audit fields filled before persistence.
pub trait AutoFill {
    fn audit_slots(&mut self) -> AuditSlots<'_>;
}
