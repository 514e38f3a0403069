use serde::{Deserialize, Serialize};

/// Account kinds the marketplace knows about: the demand side (EPC
/// companies) and the two supply sides.
pub const USER_TYPES: [&str; 3] = ["epc_company", "engineer", "tool_provider"];

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct User {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub user_type: String,
    pub created_at: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub user_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}
