use http::StatusCode;
use spin_sdk::http::{Request, Response};

use crate::auth::authenticate;
use crate::core::db::{lock, Database, SharedDb};
use crate::core::errors::{ApiError, Mutation, SocialError};
use crate::core::helpers::{json_response, message, parse_json};
use crate::models::models::{NewPost, Post, PostUpdate};
use crate::policy::can_modify;

// === Post repository ===
//
// Posts are addressed by their position. Deleting a post shifts every later
// index down by one.

impl Database {
    pub fn list(&self) -> &[Post] {
        &self.posts
    }

    pub fn post(&self, index: usize) -> Result<&Post, SocialError> {
        self.posts.get(index).ok_or(SocialError::NotFound(index))
    }

    /// Append a post owned by `actor` and return its index.
    pub fn create(&mut self, title: &str, content: &str, actor: &str) -> usize {
        self.posts.push(Post {
            title: title.to_string(),
            content: content.to_string(),
            author: actor.to_string(),
        });
        self.posts.len() - 1
    }

    /// Overwrite a post the actor owns.
    ///
    /// The stored author is replaced by `author` unless the store pins
    /// authorship.
    pub fn replace(
        &mut self,
        index: usize,
        title: &str,
        content: &str,
        author: &str,
        actor: &str,
    ) -> Result<(), SocialError> {
        let pin_author = self.settings.pin_post_author;
        let existing = self.posts.get_mut(index).ok_or(SocialError::NotFound(index))?;
        if !can_modify(actor, existing) {
            return Err(SocialError::Forbidden(Mutation::Edit));
        }

        let author = if pin_author {
            existing.author.clone()
        } else {
            author.to_string()
        };
        *existing = Post {
            title: title.to_string(),
            content: content.to_string(),
            author,
        };
        Ok(())
    }

    /// Remove a post the actor owns. Reaction ledgers keep their keys.
    pub fn delete(&mut self, index: usize, actor: &str) -> Result<Post, SocialError> {
        let existing = self.post(index)?;
        if !can_modify(actor, existing) {
            return Err(SocialError::Forbidden(Mutation::Delete));
        }
        Ok(self.posts.remove(index))
    }
}

// === HTTP handlers ===

pub fn list_posts(db: &SharedDb, req: &Request) -> Result<Response, ApiError> {
    authenticate(req)?;
    let posts = lock(db)?.list().to_vec();
    json_response(StatusCode::OK, &posts)
}

pub fn create_post(db: &SharedDb, req: &Request) -> Result<Response, ApiError> {
    let actor = authenticate(req)?;
    let body: NewPost = parse_json(req.body())?;

    let index = lock(db)?.create(&body.title, &body.content, &actor);
    tracing::info!(index, author = %actor, "post created");

    json_response(
        StatusCode::OK,
        &serde_json::json!({ "message": "Post created successfully", "index": index }),
    )
}

pub fn edit_post(db: &SharedDb, req: &Request, index: usize) -> Result<Response, ApiError> {
    let actor = authenticate(req)?;
    let body: PostUpdate = parse_json(req.body())?;

    let result = lock(db)?.replace(index, &body.title, &body.content, &body.author, &actor);
    match result {
        Ok(()) => {
            tracing::info!(index, actor = %actor, "post updated");
            message("Post updated successfully")
        }
        Err(e) => {
            tracing::warn!(index, actor = %actor, error = %e, "edit rejected");
            Err(e.into())
        }
    }
}

pub fn delete_post(db: &SharedDb, req: &Request, index: usize) -> Result<Response, ApiError> {
    let actor = authenticate(req)?;

    let result = lock(db)?.delete(index, &actor);
    match result {
        Ok(post) => {
            tracing::info!(index, actor = %actor, title = %post.title, "post deleted");
            message("Post deleted successfully")
        }
        Err(e) => {
            tracing::warn!(index, actor = %actor, error = %e, "delete rejected");
            Err(e.into())
        }
    }
}
