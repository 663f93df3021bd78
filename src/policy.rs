//! Access decisions for posts. Pure functions of the actor and the stored
//! post; the caller is responsible for looking the post up.

use crate::models::models::Post;

/// Only the stored author may edit or delete a post.
pub fn can_modify(actor: &str, post: &Post) -> bool {
    actor == post.author
}

/// Anyone but the author may like or dislike a post.
pub fn can_react(actor: &str, post: &Post) -> bool {
    actor != post.author
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post_by(author: &str) -> Post {
        Post {
            title: "T1".to_string(),
            content: "C1".to_string(),
            author: author.to_string(),
        }
    }

    #[test]
    fn modify_and_react_are_complementary() {
        let post = post_by("alice");
        for actor in ["alice", "bob", "", "Alice", "alice "] {
            assert_ne!(can_modify(actor, &post), can_react(actor, &post), "actor {:?}", actor);
        }
    }

    #[test]
    fn only_exact_author_matches() {
        let post = post_by("alice");
        assert!(can_modify("alice", &post));
        assert!(!can_modify("Alice", &post));
        assert!(!can_modify("bob", &post));
        assert!(can_react("bob", &post));
        assert!(!can_react("alice", &post));
    }
}
