//! Consultant model
//!
//! Table: consultants

use chrono::{DateTime, Utc};
use cm_core::traits::{Entity, Id, Identifiable, Timestamped};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Consultant entity
///
/// The role is referenced by id only; rate lookups go through the role store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Consultant {
    pub id: Id,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub profile_image_path: Option<String>,
    pub consultant_role_id: Id,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Consultant {
    /// Display name ("First Last")
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl Identifiable for Consultant {
    fn id(&self) -> Id {
        self.id
    }
}

impl Timestamped for Consultant {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

impl Entity for Consultant {
    const TABLE_NAME: &'static str = "consultants";
    const TYPE_NAME: &'static str = "Consultant";
}

/// Writable consultant attributes (create and full replace)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ConsultantParams {
    #[validate(length(min = 1, max = 255))]
    pub first_name: String,
    #[validate(length(min = 1, max = 255))]
    pub last_name: String,
    #[validate(email)]
    pub email: String,
    pub consultant_role_id: Id,
}

impl ConsultantParams {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        consultant_role_id: Id,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            consultant_role_id,
        }
    }
}
