use chrono::{DateTime, TimeZone, Utc};

use crate::models::User;

/// Shared password for every seeded identity. A real identity provider
/// stores per-user credentials; the mock keeps a single constant so the
/// demo accounts stay usable.
pub const MOCK_PASSWORD: &str = "password123";

const MOCK_TOKEN: &str = "mock-session-token";

pub fn session_token() -> String {
    MOCK_TOKEN.to_string()
}

/// Authoritative set of known identities consulted by login, signup and
/// password reset. The session store only talks to this interface so the
/// mock can later be swapped for a real identity provider.
pub trait IdentityDirectory: Send + Sync {
    fn find_by_email(&self, email: &str) -> Option<User>;
    fn insert(&mut self, user: User, password: &str);
    fn verify_password(&self, email: &str, candidate: &str) -> bool;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

struct DirectoryEntry {
    user: User,
    password: String,
}

/// In-memory directory seeded with the demo accounts.
pub struct MockDirectory {
    entries: Vec<DirectoryEntry>,
}

impl MockDirectory {
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn with_seed_users() -> Self {
        let mut directory = Self::empty();
        for user in seed_users() {
            directory.insert(user, MOCK_PASSWORD);
        }
        directory
    }
}

impl Default for MockDirectory {
    fn default() -> Self {
        Self::with_seed_users()
    }
}

impl IdentityDirectory for MockDirectory {
    fn find_by_email(&self, email: &str) -> Option<User> {
        self.entries
            .iter()
            .find(|entry| entry.user.email == email)
            .map(|entry| entry.user.clone())
    }

    fn insert(&mut self, user: User, password: &str) {
        self.entries.push(DirectoryEntry {
            user,
            password: password.to_string(),
        });
    }

    fn verify_password(&self, email: &str, candidate: &str) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.user.email == email && entry.password == candidate)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

fn seed_users() -> Vec<User> {
    vec![
        User {
            id: "1".to_string(),
            name: "John Doe".to_string(),
            email: "john@company.com".to_string(),
            avatar: Some(avatar_url("2379004")),
            is_online: Some(true),
            role: Some("Senior Developer".to_string()),
            department: Some("Engineering".to_string()),
            phone: Some("+1 (555) 123-4567".to_string()),
            timezone: Some("America/New_York".to_string()),
            created_at: date(2023, 1, 15),
            last_login_at: Some(Utc::now()),
        },
        User {
            id: "2".to_string(),
            name: "Sarah Wilson".to_string(),
            email: "sarah@company.com".to_string(),
            avatar: Some(avatar_url("774909")),
            is_online: Some(true),
            role: Some("Product Manager".to_string()),
            department: Some("Product".to_string()),
            phone: None,
            timezone: None,
            created_at: date(2023, 2, 20),
            last_login_at: None,
        },
    ]
}

fn date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

fn avatar_url(photo_id: &str) -> String {
    format!(
        "https://images.pexels.com/photos/{photo_id}/pexels-photo-{photo_id}.jpeg?auto=compress&cs=tinysrgb&w=150&h=150&dpr=1"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeds_two_demo_accounts() {
        let directory = MockDirectory::with_seed_users();
        assert_eq!(directory.len(), 2);
        assert!(directory.find_by_email("john@company.com").is_some());
        assert!(directory.find_by_email("nobody@company.com").is_none());
    }

    #[test]
    fn verifies_the_shared_mock_password() {
        let directory = MockDirectory::with_seed_users();
        assert!(directory.verify_password("john@company.com", MOCK_PASSWORD));
        assert!(!directory.verify_password("john@company.com", "wrong"));
        assert!(!directory.verify_password("nobody@company.com", MOCK_PASSWORD));
    }
}
