//! Notification kind enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What happened, from the recipient's side of the transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "notification_kind", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationKind {
    /// To the poster: someone is applying to help.
    Volunteering,
    /// To the volunteer: their offer was recorded.
    Volunteered,
    /// To the poster: they accepted a volunteer.
    Accepting,
    /// To the volunteer: they were accepted.
    Accepted,
    /// To the poster: the request was completed.
    Completed,
    /// To the volunteer: the poster cancelled.
    CancelledByPoster,
    /// To the poster: the volunteer withdrew.
    CancelledByVolunteer,
    /// To a pending applicant: someone else was accepted.
    Declined,
}

impl NotificationKind {
    /// Return the kind as an uppercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Volunteering => "VOLUNTEERING",
            Self::Volunteered => "VOLUNTEERED",
            Self::Accepting => "ACCEPTING",
            Self::Accepted => "ACCEPTED",
            Self::Completed => "COMPLETED",
            Self::CancelledByPoster => "CANCELLED_BY_POSTER",
            Self::CancelledByVolunteer => "CANCELLED_BY_VOLUNTEER",
            Self::Declined => "DECLINED",
        }
    }

    /// Human-readable summary, given the other party's username and the
    /// request title.
    pub fn describe(&self, related_username: &str, title: &str) -> String {
        match self {
            Self::Volunteering => format!("{related_username} is applying to help with \"{title}\""),
            Self::Volunteered => {
                format!("You volunteered to help {related_username} with \"{title}\"")
            }
            Self::Accepting => {
                format!("You accepted {related_username} as volunteer for \"{title}\"")
            }
            Self::Accepted => {
                format!("{related_username} accepted your help with \"{title}\"")
            }
            Self::Completed => {
                format!("Your request \"{title}\" was completed by {related_username}")
            }
            Self::CancelledByPoster => {
                format!("{related_username} cancelled the request \"{title}\"")
            }
            Self::CancelledByVolunteer => {
                format!("{related_username} withdrew from your request \"{title}\"")
            }
            Self::Declined => {
                format!("{related_username} accepted another volunteer for \"{title}\"")
            }
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
