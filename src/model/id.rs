//! Type-safe identifiers.
//!
//! Every document and sub-record is keyed by a v4 UUID wrapped in its own newtype, so a
//! `PostId` can never be passed where a `UserId` is expected. Ids serialize as the bare
//! hyphenated UUID string.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;
use uuid::Uuid;

macro_rules! document_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self)
            }
        }
    };
}

document_id!(
    /// Identifier of a [`User`](crate::model::User).
    UserId
);
document_id!(
    /// Identifier of an [`Experience`](crate::model::Experience) inside a user.
    ExperienceId
);
document_id!(
    /// Identifier of a [`Post`](crate::model::Post).
    PostId
);
document_id!(
    /// Identifier of a [`Comment`](crate::model::Comment) inside a post.
    CommentId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip_through_strings() {
        let id = UserId::new();
        assert_eq!(id.to_string().parse::<UserId>().unwrap(), id);
    }

    #[test]
    fn malformed_ids_do_not_parse() {
        assert!("not-an-id".parse::<PostId>().is_err());
        assert!("".parse::<CommentId>().is_err());
    }

    #[test]
    fn ids_serialize_as_plain_strings() {
        let id = ExperienceId::new();
        assert_eq!(serde_json::to_value(id).unwrap(), serde_json::json!(id.to_string()));
    }
}
