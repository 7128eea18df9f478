//! Account subsystem.
//!
//! # Data Flow
//! ```text
//! POST /register → auth.rs (hash password) → AccountStore (append row)
//! POST /login    → AccountStore (first row for username)
//!                → auth.rs (verify hash) → session.rs (issue token)
//! GET  /chat     → session.rs middleware (validate bearer token)
//! ```
//!
//! # Design Decisions
//! - Registration performs no existence check, so two accounts may share a
//!   username; lookups return the first row ever stored for that name
//! - Login failures collapse into one generic outcome

pub mod auth;
pub mod session;

use dashmap::DashMap;

/// A stored account row.
#[derive(Debug, Clone)]
pub struct Account {
    pub username: String,
    /// Opaque password digest; only auth.rs interprets it.
    pub password_hash: String,
}

/// Append-only account table keyed by username.
#[derive(Default)]
pub struct AccountStore {
    rows: DashMap<String, Vec<Account>>,
}

impl AccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a row. Duplicate usernames are permitted.
    pub fn insert(&self, account: Account) {
        self.rows
            .entry(account.username.clone())
            .or_default()
            .push(account);
    }

    /// First stored row for the username, if any.
    pub fn find_first(&self, username: &str) -> Option<Account> {
        self.rows
            .get(username)
            .and_then(|rows| rows.first().cloned())
    }

    /// Total number of stored rows, duplicates included.
    pub fn len(&self) -> usize {
        self.rows.iter().map(|rows| rows.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_usernames_append_rows() {
        let store = AccountStore::new();
        store.insert(Account {
            username: "alice".to_string(),
            password_hash: "first".to_string(),
        });
        store.insert(Account {
            username: "alice".to_string(),
            password_hash: "second".to_string(),
        });

        assert_eq!(store.len(), 2);
        assert_eq!(store.find_first("alice").unwrap().password_hash, "first");
    }

    #[test]
    fn unknown_username_finds_nothing() {
        let store = AccountStore::new();
        assert!(store.find_first("nouser").is_none());
    }
}
