use spin_sdk::http::{Request, Response};

use crate::core::db::{lock, Database, SharedDb};
use crate::core::errors::{ApiError, SocialError};
use crate::core::helpers::{message, parse_json};
use crate::models::models::User;

// === Credential store ===

/// Usernames travel as the second word of the token, so they must be a
/// single non-empty word.
pub fn valid_username(username: &str) -> bool {
    !username.is_empty() && !username.chars().any(char::is_whitespace)
}

impl Database {
    /// Add an account. A taken username is rejected and the existing record
    /// is left untouched.
    pub fn register(&mut self, username: &str, password: &str, email: &str) -> Result<(), SocialError> {
        if !valid_username(username) {
            return Err(SocialError::InvalidUsername);
        }
        if self.users.contains_key(username) {
            return Err(SocialError::DuplicateUser);
        }

        let stored = self
            .settings
            .password_scheme
            .digest(password)
            .map_err(|e| SocialError::PasswordHash(e.to_string()))?;

        self.users.insert(
            username.to_string(),
            User {
                username: username.to_string(),
                password: stored,
                email: email.to_string(),
            },
        );
        Ok(())
    }

    pub fn lookup(&self, username: &str) -> Option<&User> {
        self.users.get(username)
    }
}

// === HTTP handlers ===

pub fn signup(db: &SharedDb, req: &Request) -> Result<Response, ApiError> {
    let user: User = parse_json(req.body())?;

    let result = lock(db)?.register(&user.username, &user.password, &user.email);
    match result {
        Ok(()) => {
            tracing::info!(username = %user.username, "user created");
            message("User created successfully")
        }
        Err(e) => {
            tracing::warn!(username = %user.username, error = %e, "signup rejected");
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::core::helpers::PasswordScheme;

    #[test]
    fn duplicate_signup_keeps_first_record() {
        let mut db = Database::default();
        db.register("alice", "pw1", "a@x.com").unwrap();

        let err = db.register("alice", "other", "b@y.com").unwrap_err();
        assert_eq!(err, SocialError::DuplicateUser);

        let user = db.lookup("alice").unwrap();
        assert_eq!(user.password, "pw1");
        assert_eq!(user.email, "a@x.com");
    }

    #[test]
    fn usernames_must_be_one_word() {
        let mut db = Database::default();
        for name in ["", "bob smith", " bob", "bob\t", "a\nb", "\u{a0}bob"] {
            assert_eq!(
                db.register(name, "pw", "e@x.com").unwrap_err(),
                SocialError::InvalidUsername,
                "{:?}",
                name
            );
        }
        assert!(db.users.is_empty());
        assert!(db.register("bob.smith", "pw", "e@x.com").is_ok());
    }

    #[test]
    fn spaced_name_cannot_impersonate_a_user() {
        let mut db = Database::default();
        db.register("bob", "pw1", "b@x.com").unwrap();
        db.create("T", "C", "bob");

        assert!(db.register("bob smith", "pw2", "s@x.com").is_err());
        assert_eq!(db.login("bob smith", "pw2").unwrap_err(), SocialError::InvalidCredentials);
        assert_eq!(db.list().len(), 1);
    }

    #[test]
    fn lookup_unknown_is_none() {
        let db = Database::default();
        assert!(db.lookup("nobody").is_none());
    }

    #[test]
    fn plaintext_scheme_stores_password_verbatim() {
        // Credentials are kept exactly as sent.
        let mut db = Database::default();
        db.register("alice", "pw1", "a@x.com").unwrap();
        assert_eq!(db.lookup("alice").unwrap().password, "pw1");
    }

    #[test]
    fn argon2_scheme_diverges_from_plaintext_storage() {
        let mut db = Database::new(Settings {
            password_scheme: PasswordScheme::Argon2,
            ..Default::default()
        });
        db.register("alice", "pw1", "a@x.com").unwrap();
        let stored = &db.lookup("alice").unwrap().password;
        assert_ne!(stored, "pw1");
        assert!(stored.starts_with("$argon2"));
    }
}
