use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::Role;

/// Authorization context of the signed-in user, read from `profiles`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Profile {
    pub id: String,
    pub email: Option<String>,
    pub role: Role,
    pub full_name: Option<String>,
    pub created_at: DateTime<Utc>,
}
