//! Static credential store

use std::collections::HashSet;

use crate::auth::models::{CredentialRecord, Profile, UserRole};
use crate::error::{Error, Result};

/// Read-only list of credential records, fixed for the process lifetime.
///
/// Passwords are compared with plain equality. Production use needs hashed
/// secrets and a constant-time compare before this can be called an
/// authentication system.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    records: Vec<CredentialRecord>,
}

impl CredentialStore {
    /// Build a store, rejecting duplicate emails
    pub fn new(records: Vec<CredentialRecord>) -> Result<Self> {
        let mut seen = HashSet::new();
        for record in &records {
            if !seen.insert(record.email.as_str()) {
                return Err(Error::DuplicateUser(record.email.clone()));
            }
        }
        Ok(Self { records })
    }

    /// The two demo accounts shipped with the app
    pub fn demo() -> Self {
        Self {
            records: demo_records(),
        }
    }

    /// Find the record matching both fields exactly
    pub fn authenticate(&self, email: &str, password: &str) -> Result<Profile> {
        self.records
            .iter()
            .find(|r| r.email == email && r.password == password)
            .map(CredentialRecord::profile)
            .ok_or(Error::Authentication)
    }

    pub fn records(&self) -> &[CredentialRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for CredentialStore {
    fn default() -> Self {
        Self::demo()
    }
}

/// Seed accounts used when the config does not list any users
pub fn demo_records() -> Vec<CredentialRecord> {
    vec![
        CredentialRecord {
            id: 1,
            email: "admin@elegantsteelhw.com".to_string(),
            password: "password123".to_string(),
            name: "Admin User".to_string(),
            role: UserRole::Admin,
            status: "Active".to_string(),
        },
        CredentialRecord {
            id: 2,
            email: "employee@elegantsteelhw.com".to_string(),
            password: "password123".to_string(),
            name: "John Employee".to_string(),
            role: UserRole::Employee,
            status: "Active".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_record_can_log_in() {
        let store = CredentialStore::demo();
        for record in store.records() {
            let profile = store
                .authenticate(&record.email, &record.password)
                .expect("seed record should authenticate");
            assert_eq!(profile.id, record.id);
            assert_eq!(profile.role, record.role);
        }
    }

    #[test]
    fn test_wrong_password() {
        let store = CredentialStore::demo();
        let result = store.authenticate("admin@elegantsteelhw.com", "password124");
        assert!(matches!(result, Err(Error::Authentication)));
    }

    #[test]
    fn test_comparison_is_case_sensitive() {
        let store = CredentialStore::demo();
        assert!(store
            .authenticate("Admin@elegantsteelhw.com", "password123")
            .is_err());
        assert!(store
            .authenticate("admin@elegantsteelhw.com", "PASSWORD123")
            .is_err());
    }

    #[test]
    fn test_duplicate_emails_rejected() {
        let mut records = demo_records();
        records[1].email = records[0].email.clone();
        let result = CredentialStore::new(records);
        assert!(matches!(result, Err(Error::DuplicateUser(e)) if e == "admin@elegantsteelhw.com"));
    }
}
