use std::sync::Arc;

use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::users::models::{UserAccount, UserRole};
use crate::modules::storage::BlobStore;
use crate::shared::constants::{STORAGE_KEY_SESSION_USER, STORAGE_KEY_USERS};

/// Mock session and roster layer behind both app variants.
///
/// Accounts live in the local blob store and any password signs in; this is
/// not an authentication system. It exists so the citizen and employee
/// screens share a current-user concept and the leaderboard has a roster to
/// read.
pub struct UserDirectory {
    users: Vec<UserAccount>,
    session: Option<UserAccount>,
    blob: Arc<dyn BlobStore>,
}

impl UserDirectory {
    /// Load the roster and any saved session from storage
    pub fn load(blob: Arc<dyn BlobStore>) -> Self {
        let users = match blob.get(STORAGE_KEY_USERS) {
            Ok(Some(json)) => serde_json::from_str(&json).unwrap_or_else(|e| {
                tracing::error!("Failed to decode user roster: {}", e);
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::error!("Failed to read user roster: {}", e);
                Vec::new()
            }
        };

        let session = match blob.get(STORAGE_KEY_SESSION_USER) {
            Ok(Some(json)) => serde_json::from_str(&json).ok(),
            _ => None,
        };

        Self {
            users,
            session,
            blob,
        }
    }

    // ===== Session =====

    pub fn current_user(&self) -> Option<&UserAccount> {
        self.session.as_ref()
    }

    /// Create an account and sign it in. Duplicate emails are rejected.
    pub fn sign_up(&mut self, email: &str, name: &str, role: UserRole) -> Result<UserAccount> {
        if self.users.iter().any(|u| u.email == email) {
            return Err(AppError::Validation(format!(
                "User already exists with email {}",
                email
            )));
        }

        let is_citizen = role == UserRole::Citizen;
        let user = UserAccount {
            id: format!("user-{}", Uuid::new_v4()),
            email: email.to_string(),
            role,
            name: name.to_string(),
            score: is_citizen.then_some(0),
            reports: is_citizen.then_some(0),
        };

        self.users.push(user.clone());
        self.persist_users();
        self.set_session(Some(user.clone()));

        tracing::info!("Signed up {} account for {}", role_label(role), email);
        Ok(user)
    }

    /// Sign in by email. Unknown emails return `None`; the password is
    /// intentionally not checked.
    pub fn sign_in(&mut self, email: &str) -> Option<UserAccount> {
        let user = self.users.iter().find(|u| u.email == email)?.clone();
        self.set_session(Some(user.clone()));
        Some(user)
    }

    pub fn sign_out(&mut self) {
        self.set_session(None);
    }

    // ===== Roster =====

    /// Merge name/score/report-count changes onto an account, updating the
    /// session copy when it is the signed-in user. `None` if the id is
    /// unknown.
    pub fn update_user(
        &mut self,
        id: &str,
        name: Option<String>,
        score: Option<u32>,
        reports: Option<u32>,
    ) -> Option<UserAccount> {
        let user = self.users.iter_mut().find(|u| u.id == id)?;

        if let Some(name) = name {
            user.name = name;
        }
        if score.is_some() {
            user.score = score;
        }
        if reports.is_some() {
            user.reports = reports;
        }
        let updated = user.clone();

        self.persist_users();
        if self.session.as_ref().is_some_and(|s| s.id == id) {
            self.set_session(Some(updated.clone()));
        }

        Some(updated)
    }

    /// Credit a citizen for a submission: one more report, plus points.
    /// No-op for employees and unknown ids.
    pub fn record_submission(&mut self, user_id: &str, points: u32) -> Option<UserAccount> {
        let user = self
            .users
            .iter()
            .find(|u| u.id == user_id && u.is_citizen())?;

        let score = Some(user.score.unwrap_or(0) + points);
        let reports = Some(user.reports.unwrap_or(0) + 1);
        self.update_user(user_id, None, score, reports)
    }

    /// Citizen accounts, for the leaderboard
    pub fn citizens(&self) -> Vec<&UserAccount> {
        self.users.iter().filter(|u| u.is_citizen()).collect()
    }

    pub fn users(&self) -> &[UserAccount] {
        &self.users
    }

    // ===== Persistence =====

    fn set_session(&mut self, session: Option<UserAccount>) {
        match &session {
            Some(user) => {
                if let Ok(json) = serde_json::to_string(user) {
                    if let Err(e) = self.blob.put(STORAGE_KEY_SESSION_USER, &json) {
                        tracing::error!("Failed to persist session user: {}", e);
                    }
                }
            }
            None => {
                if let Err(e) = self.blob.remove(STORAGE_KEY_SESSION_USER) {
                    tracing::error!("Failed to clear session user: {}", e);
                }
            }
        }
        self.session = session;
    }

    fn persist_users(&self) {
        let json = match serde_json::to_string(&self.users) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!("Failed to encode user roster: {}", e);
                return;
            }
        };
        if let Err(e) = self.blob.put(STORAGE_KEY_USERS, &json) {
            tracing::error!("Failed to persist user roster: {}", e);
        }
    }
}

fn role_label(role: UserRole) -> &'static str {
    match role {
        UserRole::Citizen => "citizen",
        UserRole::Employee => "employee",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::storage::MemoryBlobStore;

    fn new_directory() -> UserDirectory {
        UserDirectory::load(Arc::new(MemoryBlobStore::new()))
    }

    #[test]
    fn test_sign_up_creates_citizen_with_counters() {
        let mut directory = new_directory();
        let user = directory
            .sign_up("citizen@demo.com", "Demo Citizen", UserRole::Citizen)
            .unwrap();

        assert_eq!(user.score, Some(0));
        assert_eq!(user.reports, Some(0));
        assert_eq!(directory.current_user().unwrap().email, "citizen@demo.com");

        let employee = directory
            .sign_up("employee@demo.com", "Demo Employee", UserRole::Employee)
            .unwrap();
        assert_eq!(employee.score, None);
        assert_eq!(employee.reports, None);
    }

    #[test]
    fn test_sign_up_rejects_duplicate_email() {
        let mut directory = new_directory();
        directory
            .sign_up("citizen@demo.com", "Demo Citizen", UserRole::Citizen)
            .unwrap();

        let result = directory.sign_up("citizen@demo.com", "Other", UserRole::Citizen);
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_sign_in_and_out() {
        let mut directory = new_directory();
        directory
            .sign_up("citizen@demo.com", "Demo Citizen", UserRole::Citizen)
            .unwrap();
        directory.sign_out();
        assert!(directory.current_user().is_none());

        assert!(directory.sign_in("citizen@demo.com").is_some());
        assert!(directory.current_user().is_some());

        // Unknown email is a sentinel, not an error
        assert!(directory.sign_in("nobody@demo.com").is_none());
    }

    #[test]
    fn test_record_submission_credits_citizens_only() {
        let mut directory = new_directory();
        let citizen = directory
            .sign_up("citizen@demo.com", "Demo Citizen", UserRole::Citizen)
            .unwrap();
        let employee = directory
            .sign_up("employee@demo.com", "Demo Employee", UserRole::Employee)
            .unwrap();

        let updated = directory.record_submission(&citizen.id, 10).unwrap();
        assert_eq!(updated.score, Some(10));
        assert_eq!(updated.reports, Some(1));

        let updated = directory.record_submission(&citizen.id, 10).unwrap();
        assert_eq!(updated.score, Some(20));
        assert_eq!(updated.reports, Some(2));

        assert!(directory.record_submission(&employee.id, 10).is_none());
    }

    #[test]
    fn test_session_and_roster_survive_reload() {
        let blob: Arc<dyn BlobStore> = Arc::new(MemoryBlobStore::new());

        let mut directory = UserDirectory::load(Arc::clone(&blob));
        directory
            .sign_up("citizen@demo.com", "Demo Citizen", UserRole::Citizen)
            .unwrap();
        drop(directory);

        let reloaded = UserDirectory::load(blob);
        assert_eq!(reloaded.users().len(), 1);
        assert_eq!(reloaded.current_user().unwrap().email, "citizen@demo.com");
        assert_eq!(reloaded.citizens().len(), 1);
    }
}
