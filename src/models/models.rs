use serde::{Deserialize, Serialize};

/// A registered account. Doubles as the signup request body.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub username: String,
    pub password: String,
    pub email: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Post {
    pub title: String,
    pub content: String,
    pub author: String,
}

/// Body of `POST /posts`. Any `author` the client sends is dropped.
#[derive(Deserialize, Clone, Debug)]
pub struct NewPost {
    pub title: String,
    pub content: String,
}

/// Body of `PUT /posts/{index}`.
#[derive(Deserialize, Clone, Debug)]
pub struct PostUpdate {
    pub title: String,
    pub content: String,
    pub author: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub access_token: String,
    pub token_type: String,
}

#[derive(Deserialize, Clone, Debug)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct ReactionSummary {
    pub likes: Vec<String>,
    pub dislikes: Vec<String>,
}
