use std::collections::HashMap;

use http::StatusCode;
use spin_sdk::http::{Request, Response};

use crate::auth::authenticate;
use crate::core::db::{lock, Database, SharedDb};
use crate::core::errors::{ApiError, Reaction, SocialError};
use crate::core::helpers::{json_response, message};
use crate::models::models::ReactionSummary;
use crate::policy::can_react;

// === Reaction ledger ===

impl Database {
    pub fn like(&mut self, index: usize, actor: &str) -> Result<(), SocialError> {
        self.react(index, actor, Reaction::Like)
    }

    pub fn dislike(&mut self, index: usize, actor: &str) -> Result<(), SocialError> {
        self.react(index, actor, Reaction::Dislike)
    }

    /// Record a reaction against a post index.
    ///
    /// The ledger is an append-only log unless the store dedupes reactions,
    /// in which case a repeat by the same actor is accepted but not recorded.
    pub fn react(&mut self, index: usize, actor: &str, reaction: Reaction) -> Result<(), SocialError> {
        let post = self.post(index)?;
        if !can_react(actor, post) {
            return Err(SocialError::SelfReaction(reaction));
        }

        let dedupe = self.settings.dedupe_reactions;
        let actors = self.ledger_mut(reaction).entry(index).or_default();
        if dedupe && actors.iter().any(|a| a == actor) {
            return Ok(());
        }
        actors.push(actor.to_string());
        Ok(())
    }

    pub fn reactions(&self, index: usize) -> Result<ReactionSummary, SocialError> {
        self.post(index)?;
        Ok(ReactionSummary {
            likes: self.likes.get(&index).cloned().unwrap_or_default(),
            dislikes: self.dislikes.get(&index).cloned().unwrap_or_default(),
        })
    }

    fn ledger_mut(&mut self, reaction: Reaction) -> &mut HashMap<usize, Vec<String>> {
        match reaction {
            Reaction::Like => &mut self.likes,
            Reaction::Dislike => &mut self.dislikes,
        }
    }
}

// === HTTP handlers ===

pub fn handle_reaction(
    db: &SharedDb,
    req: &Request,
    index: usize,
    reaction: Reaction,
) -> Result<Response, ApiError> {
    let actor = authenticate(req)?;

    let result = lock(db)?.react(index, &actor, reaction);
    match result {
        Ok(()) => {
            tracing::info!(index, actor = %actor, %reaction, "reaction recorded");
            match reaction {
                Reaction::Like => message("Post liked successfully"),
                Reaction::Dislike => message("Post disliked successfully"),
            }
        }
        Err(e) => {
            tracing::warn!(index, actor = %actor, error = %e, "reaction rejected");
            Err(e.into())
        }
    }
}

pub fn get_reactions(db: &SharedDb, req: &Request, index: usize) -> Result<Response, ApiError> {
    authenticate(req)?;
    let summary = lock(db)?.reactions(index)?;
    json_response(StatusCode::OK, &summary)
}
