//! # Friend-request state machine
//!
//! The relationship between two users lives in three sets on each [`User`]: `friends`,
//! `request_send` and `request_pending`. Seen from the sender of a request, an ordered
//! pair is in one of four [`RelationState`]s:
//!
//! ```text
//!                 Toggle                     AcceptOrToggle
//!   None  ───────────────────▶  PendingSent ─────────────────▶ Friends
//!     ▲  ◀───────────────────        │                           │
//!     │         Toggle               │ Decline (by receiver)     │ AcceptOrToggle
//!     └──────────────────────────────┴───────────────────────────┘
//! ```
//!
//! `PendingReceived` is `PendingSent` seen from the other user.
//!
//! [`apply`] is the only function that writes those sets. It always writes both users,
//! which keeps the pair symmetric:
//!
//! - `a.request_send` contains `b` iff `b.request_pending` contains `a`
//! - `a.friends` contains `b` iff `b.friends` contains `a`
//! - a pair is never pending and friends at the same time, and pending in one direction
//!   at most
//!
//! The user collection runs [`apply`] inside a single pair action, so the two halves of
//! a transition are never observed apart.

use crate::model::User;

/// The three friend-request operations, each issued by `sender` about `receiver`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FriendRequest {
    /// Send a request, or withdraw one already sent.
    Toggle,
    /// Accept a pending request, or end an existing friendship.
    AcceptOrToggle,
    /// Refuse a request the receiver sent to the sender.
    Decline,
}

/// Relationship of an ordered pair, from the sender's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationState {
    None,
    PendingSent,
    PendingReceived,
    Friends,
}

/// What a friend-request operation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    RequestSent,
    RequestUnsent,
    AlreadyFriends,
    AlreadyReceived,
    Accepted,
    Unfriended,
    SendRequestFirst,
    Declined,
    NothingToDecline,
}

impl Outcome {
    /// Text returned to the client.
    pub fn message(self) -> &'static str {
        match self {
            Outcome::RequestSent => "Friend Request sent",
            Outcome::RequestUnsent => "Friend Request unsent",
            Outcome::AlreadyFriends => "You are already friends",
            Outcome::AlreadyReceived => "This user already sent you a friend request",
            Outcome::Accepted => "Request accepted",
            Outcome::Unfriended => "No longer friends",
            Outcome::SendRequestFirst => "Send a friend request first",
            Outcome::Declined => "Request declined",
            Outcome::NothingToDecline => "No request to decline",
        }
    }

    /// Whether either user was modified.
    pub fn changed(self) -> bool {
        matches!(
            self,
            Outcome::RequestSent
                | Outcome::RequestUnsent
                | Outcome::Accepted
                | Outcome::Unfriended
                | Outcome::Declined
        )
    }
}

/// Current state of `(sender, receiver)` as recorded on the sender.
pub fn state(sender: &User, receiver: &User) -> RelationState {
    if sender.friends.contains(&receiver.id) {
        RelationState::Friends
    } else if sender.request_send.contains(&receiver.id) {
        RelationState::PendingSent
    } else if sender.request_pending.contains(&receiver.id) {
        RelationState::PendingReceived
    } else {
        RelationState::None
    }
}

/// Runs `op` for `sender` about `receiver`, mutating both users as needed.
///
/// Both users must be distinct; the collection guarantees it.
pub fn apply(op: FriendRequest, sender: &mut User, receiver: &mut User) -> Outcome {
    let current = state(sender, receiver);
    let outcome = match (op, current) {
        (FriendRequest::Toggle, RelationState::Friends) => Outcome::AlreadyFriends,
        (FriendRequest::Toggle, RelationState::None) => {
            open_request(sender, receiver);
            Outcome::RequestSent
        }
        (FriendRequest::Toggle, RelationState::PendingSent) => {
            close_request(sender, receiver);
            Outcome::RequestUnsent
        }
        (FriendRequest::Toggle, RelationState::PendingReceived) => Outcome::AlreadyReceived,

        (FriendRequest::AcceptOrToggle, RelationState::None) => Outcome::SendRequestFirst,
        (FriendRequest::AcceptOrToggle, RelationState::PendingReceived) => {
            close_request(receiver, sender);
            befriend(sender, receiver);
            Outcome::Accepted
        }
        (FriendRequest::AcceptOrToggle, RelationState::PendingSent) => {
            close_request(sender, receiver);
            befriend(sender, receiver);
            Outcome::Accepted
        }
        (FriendRequest::AcceptOrToggle, RelationState::Friends) => {
            unfriend(sender, receiver);
            Outcome::Unfriended
        }

        (FriendRequest::Decline, RelationState::PendingReceived) => {
            close_request(receiver, sender);
            Outcome::Declined
        }
        (FriendRequest::Decline, _) => Outcome::NothingToDecline,
    };

    if outcome.changed() {
        sender.touch();
        receiver.touch();
    }
    outcome
}

fn open_request(from: &mut User, to: &mut User) {
    from.request_send.insert(to.id);
    to.request_pending.insert(from.id);
}

fn close_request(from: &mut User, to: &mut User) {
    from.request_send.remove(&to.id);
    to.request_pending.remove(&from.id);
}

fn befriend(a: &mut User, b: &mut User) {
    a.friends.insert(b.id);
    b.friends.insert(a.id);
}

fn unfriend(a: &mut User, b: &mut User) {
    a.friends.remove(&b.id);
    b.friends.remove(&a.id);
}
