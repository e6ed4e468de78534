//! Role model
//!
//! Table: consultant_roles

use chrono::{DateTime, Utc};
use cm_core::traits::{Entity, Id, Identifiable, Timestamped};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Billable role
///
/// `rate_per_hour` is the *current* rate. Work entries keep their own copy
/// taken when they were recorded, so editing it only affects future work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub id: Id,
    pub name: String,
    pub rate_per_hour: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Identifiable for Role {
    fn id(&self) -> Id {
        self.id
    }
}

impl Timestamped for Role {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

impl Entity for Role {
    const TABLE_NAME: &'static str = "consultant_roles";
    const TYPE_NAME: &'static str = "Role";
}

/// Writable role attributes (create and full replace)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RoleParams {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub rate_per_hour: Decimal,
}

impl RoleParams {
    pub fn new(name: impl Into<String>, rate_per_hour: Decimal) -> Self {
        Self {
            name: name.into(),
            rate_per_hour,
        }
    }
}
