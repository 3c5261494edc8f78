use serde::{Deserialize, Serialize};

/// Which side of the product an account belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Citizen,
    Employee,
}

/// Account record in the local roster.
///
/// `score` and `reports` are gamification counters kept for citizens only;
/// employees leave them unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: String,
    pub email: String,
    pub role: UserRole,
    pub name: String,
    pub score: Option<u32>,
    pub reports: Option<u32>,
}

impl UserAccount {
    pub fn is_citizen(&self) -> bool {
        self.role == UserRole::Citizen
    }
}
