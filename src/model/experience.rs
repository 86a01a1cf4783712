use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::model::{ExperienceId, DEFAULT_IMAGE};

/// A work experience on a user's profile. Owned by exactly one [`User`](crate::model::User).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub id: ExperienceId,
    pub role: String,
    pub company: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub description: String,
    pub area: String,
    pub image: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceCreate {
    #[validate(length(min = 1, message = "Role is required"))]
    pub role: String,
    #[validate(length(min = 1, message = "Company is required"))]
    pub company: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[validate(length(min = 1, message = "Area is required"))]
    pub area: String,
    #[validate(url(message = "Image must be a URL"))]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceUpdate {
    #[validate(length(min = 1, message = "Role must not be empty"))]
    pub role: Option<String>,
    #[validate(length(min = 1, message = "Company must not be empty"))]
    pub company: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[validate(length(min = 1, message = "Description must not be empty"))]
    pub description: Option<String>,
    #[validate(length(min = 1, message = "Area must not be empty"))]
    pub area: Option<String>,
    #[validate(url(message = "Image must be a URL"))]
    pub image: Option<String>,
}

impl Experience {
    pub fn new(id: ExperienceId, params: ExperienceCreate) -> Self {
        let now = Utc::now();
        Self {
            id,
            role: params.role,
            company: params.company,
            start_date: params.start_date,
            end_date: params.end_date,
            description: params.description,
            area: params.area,
            image: params.image.unwrap_or_else(|| DEFAULT_IMAGE.to_string()),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, update: ExperienceUpdate) {
        if let Some(role) = update.role {
            self.role = role;
        }
        if let Some(company) = update.company {
            self.company = company;
        }
        if let Some(start_date) = update.start_date {
            self.start_date = start_date;
        }
        if let Some(end_date) = update.end_date {
            self.end_date = Some(end_date);
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(area) = update.area {
            self.area = area;
        }
        if let Some(image) = update.image {
            self.image = image;
        }
        self.updated_at = Utc::now();
    }

    /// An experience may be ongoing, but never end before it starts.
    pub fn has_valid_dates(&self) -> bool {
        self.end_date.map_or(true, |end| end >= self.start_date)
    }
}
