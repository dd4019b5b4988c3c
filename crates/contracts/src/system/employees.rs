use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::common::{AuditSlots, AutoFill};

pub const STATUS_LOCKED: i32 = 0;
pub const STATUS_ACTIVE: i32 = 1;

/// Сотрудник, который может войти в админку
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: Option<i64>,
    pub name: String,
    pub username: String,
    #[serde(skip_serializing, default)]
    pub password: String,
    pub status: i32,
    pub create_time: Option<DateTime<Utc>>,
    pub update_time: Option<DateTime<Utc>>,
    pub create_user: Option<i64>,
    pub update_user: Option<i64>,
}

impl Employee {
    pub fn is_active(&self) -> bool {
        self.status == STATUS_ACTIVE
    }
}

impl AutoFill for Employee {
    fn audit_slots(&mut self) -> AuditSlots<'_> {
        AuditSlots::full(
            &mut self.create_time,
            &mut self.update_time,
            &mut self.create_user,
            &mut self.update_user,
        )
    }
}
