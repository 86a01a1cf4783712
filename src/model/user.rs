use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use validator::Validate;

use crate::model::{Experience, UserId, DEFAULT_IMAGE};

/// A registered user and the profile attached to it.
///
/// # Document Store
/// This struct implements [`Document`](doc_store::Document), see
/// [`user_collection`](crate::user_collection) for the create/update payloads, the
/// experience actions and the friend-request pair action.
///
/// The three relationship sets are only ever changed together with the matching set of
/// the other user, through [`relationship::apply`](crate::relationship::apply).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub surname: String,
    pub email: String,
    pub bio: String,
    pub title: String,
    pub area: String,
    pub image: String,
    pub experiences: Vec<Experience>,
    pub friends: BTreeSet<UserId>,
    /// Users this user has sent a pending request to.
    pub request_send: BTreeSet<UserId>,
    /// Users with a pending request to this user.
    pub request_pending: BTreeSet<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a new user.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserCreate {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Surname is required"))]
    pub surname: String,
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Bio is required"))]
    pub bio: String,
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Area is required"))]
    pub area: String,
    #[validate(url(message = "Image must be a URL"))]
    pub image: Option<String>,
}

/// Payload for replacing profile fields of an existing user.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "Surname must not be empty"))]
    pub surname: Option<String>,
    #[validate(email(message = "A valid email is required"))]
    pub email: Option<String>,
    #[validate(length(min = 1, message = "Bio must not be empty"))]
    pub bio: Option<String>,
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "Area must not be empty"))]
    pub area: Option<String>,
    #[validate(url(message = "Image must be a URL"))]
    pub image: Option<String>,
}

impl User {
    /// Builds a user with no experiences and no relationships.
    pub fn new(id: UserId, params: UserCreate) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: params.name,
            surname: params.surname,
            email: params.email,
            bio: params.bio,
            title: params.title,
            area: params.area,
            image: params.image.unwrap_or_else(|| DEFAULT_IMAGE.to_string()),
            experiences: Vec::new(),
            friends: BTreeSet::new(),
            request_send: BTreeSet::new(),
            request_pending: BTreeSet::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, update: UserUpdate) {
        let UserUpdate {
            name,
            surname,
            email,
            bio,
            title,
            area,
            image,
        } = update;
        if let Some(name) = name {
            self.name = name;
        }
        if let Some(surname) = surname {
            self.surname = surname;
        }
        if let Some(email) = email {
            self.email = email;
        }
        if let Some(bio) = bio {
            self.bio = bio;
        }
        if let Some(title) = title {
            self.title = title;
        }
        if let Some(area) = area {
            self.area = area;
        }
        if let Some(image) = image {
            self.image = image;
        }
        self.touch();
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
