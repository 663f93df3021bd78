use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::config::Settings;
use crate::core::errors::ApiError;
use crate::models::models::{Post, User};

/// The whole service state: credentials, posts and both reaction ledgers.
///
/// Component operations are implemented next to their handlers (`users`,
/// `auth`, `posts`, `reactions`); this module only owns the storage and its
/// lifecycle.
#[derive(Debug, Default)]
pub struct Database {
    pub(crate) settings: Settings,
    pub(crate) users: HashMap<String, User>,
    pub(crate) posts: Vec<Post>,
    pub(crate) likes: HashMap<usize, Vec<String>>,
    pub(crate) dislikes: HashMap<usize, Vec<String>>,
}

/// One lock serializes every request against the store.
pub type SharedDb = Arc<Mutex<Database>>;

impl Database {
    pub fn new(settings: Settings) -> Self {
        Database {
            settings,
            ..Default::default()
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn into_shared(self) -> SharedDb {
        Arc::new(Mutex::new(self))
    }

    /// Drop every user, post and reaction; settings are kept.
    pub fn reset(&mut self) {
        self.users.clear();
        self.posts.clear();
        self.likes.clear();
        self.dislikes.clear();
    }

    /// Seed a few accounts with a post each. Accounts that already exist are
    /// left alone.
    pub fn seed_demo(&mut self) -> anyhow::Result<()> {
        let demo = [
            ("test", "test@example.com", "Hello", "This is my first post!"),
            ("alice", "alice@example.com", "Welcome", "Excited to share thoughts here."),
            ("bob", "bob@example.com", "Hey everyone", "Just joined, looking forward to connecting."),
        ];

        for (username, email, title, content) in demo {
            if self.lookup(username).is_some() {
                continue;
            }
            // Demo passwords equal the username.
            self.register(username, username, email)?;
            self.create(title, content, username);
        }

        tracing::info!(users = self.users.len(), posts = self.posts.len(), "seeded demo data");
        Ok(())
    }
}

pub fn lock(db: &SharedDb) -> Result<MutexGuard<'_, Database>, ApiError> {
    db.lock()
        .map_err(|_| ApiError::InternalError("store lock poisoned".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_is_idempotent() {
        let mut db = Database::default();
        db.seed_demo().unwrap();
        db.seed_demo().unwrap();
        assert_eq!(db.users.len(), 3);
        assert_eq!(db.posts.len(), 3);
        assert_eq!(db.posts[1].author, "alice");
        assert!(db.login("bob", "bob").is_ok());
    }

    #[test]
    fn reset_clears_everything_but_settings() {
        let settings = Settings {
            dedupe_reactions: true,
            ..Default::default()
        };
        let mut db = Database::new(settings.clone());
        db.seed_demo().unwrap();
        db.like(0, "bob").unwrap();
        db.reset();
        assert!(db.users.is_empty());
        assert!(db.posts.is_empty());
        assert!(db.likes.is_empty());
        assert_eq!(db.settings(), &settings);
    }

    #[test]
    fn lock_hands_out_the_store() {
        let db = Database::default().into_shared();
        lock(&db).unwrap().register("alice", "pw1", "a@x.com").unwrap();
        assert!(lock(&db).unwrap().lookup("alice").is_some());
    }
}
