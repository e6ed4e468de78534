//! Consultant representer

use std::collections::HashMap;

use cm_core::traits::Id;
use cm_models::{Consultant, Role};
use rust_decimal::Decimal;
use serde::Serialize;

/// Consultant with its current role resolved
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsultantRepresentation {
    pub id: Id,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub profile_image_path: Option<String>,
    pub consultant_role_id: Id,
    pub consultant_role_name: String,
    /// Rate new work would be billed at; recorded entries keep their own
    pub current_rate_per_hour: Decimal,
}

pub struct ConsultantRepresenter;

impl ConsultantRepresenter {
    pub fn represent(consultant: Consultant, role: Option<&Role>) -> ConsultantRepresentation {
        ConsultantRepresentation {
            id: consultant.id,
            first_name: consultant.first_name,
            last_name: consultant.last_name,
            email: consultant.email,
            profile_image_path: consultant.profile_image_path,
            consultant_role_id: consultant.consultant_role_id,
            consultant_role_name: role.map(|r| r.name.clone()).unwrap_or_default(),
            current_rate_per_hour: role.map(|r| r.rate_per_hour).unwrap_or_default(),
        }
    }

    pub fn represent_all(consultants: Vec<Consultant>, roles: Vec<Role>) -> Vec<ConsultantRepresentation> {
        let roles: HashMap<Id, Role> = roles.into_iter().map(|r| (r.id, r)).collect();
        consultants
            .into_iter()
            .map(|c| {
                let role = roles.get(&c.consultant_role_id);
                Self::represent(c, role)
            })
            .collect()
    }
}
