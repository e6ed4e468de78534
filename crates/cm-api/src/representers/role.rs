//! Role representer

use cm_core::traits::Id;
use cm_models::Role;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleRepresentation {
    pub id: Id,
    pub name: String,
    pub rate_per_hour: Decimal,
}

impl From<Role> for RoleRepresentation {
    fn from(role: Role) -> Self {
        Self {
            id: role.id,
            name: role.name,
            rate_per_hour: role.rate_per_hour,
        }
    }
}
