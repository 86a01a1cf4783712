//! Document trait implementation for [`User`].
//!
//! Experiences are validated here because a start/end date pair can only be checked
//! once both dates are known, which for updates means after merging into the stored one.

use super::actions::{UserAction, UserActionResult};
use super::error::UserError;
use crate::model::{Experience, ExperienceId, User, UserCreate, UserId, UserUpdate};
use crate::relationship::{self, FriendRequest, Outcome};
use async_trait::async_trait;
use doc_store::Document;

const INVALID_DATES: &str = "End date must not be before start date";

#[async_trait]
impl Document for User {
    type Id = UserId;
    type Create = UserCreate;
    type Update = UserUpdate;
    type Action = UserAction;
    type ActionResult = UserActionResult;
    type PairAction = FriendRequest;
    type PairActionResult = Outcome;
    type Context = ();
    type Error = UserError;

    fn from_create_params(id: UserId, params: UserCreate) -> Result<Self, UserError> {
        Ok(User::new(id, params))
    }

    async fn on_update(&mut self, update: UserUpdate, _ctx: &()) -> Result<(), UserError> {
        self.apply(update);
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: UserAction,
        _ctx: &(),
    ) -> Result<UserActionResult, UserError> {
        match action {
            UserAction::AddExperience(params) => {
                let experience = Experience::new(ExperienceId::new(), params);
                if !experience.has_valid_dates() {
                    return Err(UserError::Validation(INVALID_DATES.into()));
                }
                self.experiences.push(experience.clone());
                self.touch();
                Ok(UserActionResult::AddExperience(experience))
            }
            UserAction::UpdateExperience(id, update) => {
                let existing = self.experience_mut(id)?;
                let mut updated = existing.clone();
                updated.apply(update);
                if !updated.has_valid_dates() {
                    return Err(UserError::Validation(INVALID_DATES.into()));
                }
                *existing = updated.clone();
                self.touch();
                Ok(UserActionResult::UpdateExperience(updated))
            }
            UserAction::RemoveExperience(id) => {
                let before = self.experiences.len();
                self.experiences.retain(|e| e.id != id);
                if self.experiences.len() == before {
                    return Err(UserError::ExperienceNotFound(id.to_string()));
                }
                self.touch();
                Ok(UserActionResult::RemoveExperience(()))
            }
            UserAction::SetImage(url) => {
                self.image = url;
                self.touch();
                Ok(UserActionResult::SetImage(()))
            }
            UserAction::SetExperienceImage(id, url) => {
                let experience = self.experience_mut(id)?;
                experience.image = url;
                experience.updated_at = chrono::Utc::now();
                let experience = experience.clone();
                self.touch();
                Ok(UserActionResult::SetExperienceImage(experience))
            }
        }
    }

    /// `self` is the user issuing the request, `other` the one it is about.
    async fn handle_pair_action(
        &mut self,
        other: &mut User,
        action: FriendRequest,
        _ctx: &(),
    ) -> Result<Outcome, UserError> {
        if self.id == other.id {
            return Err(UserError::SelfRelation);
        }
        Ok(relationship::apply(action, self, other))
    }
}

impl User {
    fn experience_mut(&mut self, id: ExperienceId) -> Result<&mut Experience, UserError> {
        self.experiences
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| UserError::ExperienceNotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ExperienceCreate;
    use chrono::NaiveDate;

    fn user() -> User {
        User::new(
            UserId::new(),
            UserCreate {
                name: "Ada".into(),
                surname: "Lovelace".into(),
                email: "ada@example.com".into(),
                bio: "bio".into(),
                title: "Engineer".into(),
                area: "London".into(),
                image: None,
            },
        )
    }

    fn experience(start: (i32, u32, u32), end: Option<(i32, u32, u32)>) -> ExperienceCreate {
        let date = |(y, m, d): (i32, u32, u32)| NaiveDate::from_ymd_opt(y, m, d).unwrap();
        ExperienceCreate {
            role: "Developer".into(),
            company: "Acme".into(),
            start_date: date(start),
            end_date: end.map(date),
            description: "Built things".into(),
            area: "Remote".into(),
            image: None,
        }
    }

    #[tokio::test]
    async fn add_experience_rejects_end_before_start() {
        let mut user = user();
        let result = user
            .handle_action(
                UserAction::AddExperience(experience((2020, 1, 1), Some((2019, 1, 1)))),
                &(),
            )
            .await;

        assert_eq!(result.unwrap_err(), UserError::Validation(INVALID_DATES.into()));
        assert!(user.experiences.is_empty());
    }

    #[tokio::test]
    async fn update_experience_keeps_stored_one_on_invalid_dates() {
        let mut user = user();
        let UserActionResult::AddExperience(added) = user
            .handle_action(UserAction::AddExperience(experience((2020, 1, 1), None)), &())
            .await
            .unwrap()
        else {
            panic!("unexpected result");
        };

        let update = crate::model::ExperienceUpdate {
            end_date: NaiveDate::from_ymd_opt(2010, 1, 1),
            role: Some("Lead".into()),
            ..Default::default()
        };
        let result = user
            .handle_action(UserAction::UpdateExperience(added.id, update), &())
            .await;

        assert!(matches!(result, Err(UserError::Validation(_))));
        assert_eq!(user.experiences[0], added);
    }

    #[tokio::test]
    async fn unknown_experience_is_reported() {
        let mut user = user();
        let id = ExperienceId::new();
        let result = user
            .handle_action(UserAction::RemoveExperience(id), &())
            .await;
        assert_eq!(result.unwrap_err(), UserError::ExperienceNotFound(id.to_string()));
    }

    #[tokio::test]
    async fn friend_request_to_self_is_rejected() {
        let mut a = user();
        let mut b = a.clone();
        let result = a.handle_pair_action(&mut b, FriendRequest::Toggle, &()).await;
        assert_eq!(result.unwrap_err(), UserError::SelfRelation);
        assert!(a.request_send.is_empty());
    }
}
