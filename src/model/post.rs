use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use validator::Validate;

use crate::model::{Comment, PostId, UserId};

/// A post on the feed.
///
/// # Document Store
/// This struct implements [`Document`](doc_store::Document), see
/// [`post_collection`](crate::post_collection) for likes and comment actions.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: PostId,
    pub text: String,
    pub image: Option<String>,
    /// Author of the post.
    pub user: UserId,
    pub likes: BTreeSet<UserId>,
    pub comments: Vec<Comment>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PostCreate {
    #[validate(length(min = 1, message = "Text is required"))]
    pub text: String,
    pub user: UserId,
    #[validate(url(message = "Image must be a URL"))]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct PostUpdate {
    #[validate(length(min = 1, message = "Text must not be empty"))]
    pub text: Option<String>,
    #[validate(url(message = "Image must be a URL"))]
    pub image: Option<String>,
}

/// Body of the like toggle.
#[derive(Debug, Clone, Deserialize)]
pub struct LikeToggle {
    pub user: UserId,
}

impl Post {
    pub fn new(id: PostId, params: PostCreate) -> Self {
        let now = Utc::now();
        Self {
            id,
            text: params.text,
            image: params.image,
            user: params.user,
            likes: BTreeSet::new(),
            comments: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, update: PostUpdate) {
        if let Some(text) = update.text {
            self.text = text;
        }
        if let Some(image) = update.image {
            self.image = Some(image);
        }
        self.touch();
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
