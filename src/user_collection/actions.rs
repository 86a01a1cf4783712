//! Single-document actions on a [`User`](crate::model::User).
//!
//! Experiences are embedded in the user, so adding, editing and removing one is an
//! action on the owning user rather than a collection of its own.

use crate::model::{Experience, ExperienceCreate, ExperienceId, ExperienceUpdate};

#[derive(Debug, Clone)]
pub enum UserAction {
    /// Appends a new experience.
    AddExperience(ExperienceCreate),
    UpdateExperience(ExperienceId, ExperienceUpdate),
    RemoveExperience(ExperienceId),
    /// Replaces the profile picture with an uploaded file's URL.
    SetImage(String),
    SetExperienceImage(ExperienceId, String),
}

/// Results from UserActions - variants match 1:1 with UserAction
#[derive(Debug, Clone)]
pub enum UserActionResult {
    AddExperience(Experience),
    UpdateExperience(Experience),
    RemoveExperience(()),
    SetImage(()),
    SetExperienceImage(Experience),
}
