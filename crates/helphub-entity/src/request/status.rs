//! Lifecycle status of a help request.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Status of a help request.
///
/// ```text
/// WAITING ──volunteer──▶ VOLUNTEERED
///    │                        │
///    └────────accept──────────┴──▶ ACCEPTING ──complete──▶ COMPLETED ──▶ DONE
///                                    │  │
///                         withdraw ◀─┘  └─cancel──▶ CANCELLED
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "request_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestStatus {
    /// Posted, nobody engaged yet.
    Waiting,
    /// Somebody offered help and is recorded as the applicant; no
    /// volunteer attached yet.
    Volunteered,
    /// A volunteer was accepted and is helping.
    Accepting,
    /// The poster confirmed the help was given.
    Completed,
    /// Closed out by the poster after completion.
    Done,
    /// Cancelled by the poster.
    Cancelled,
}

impl RequestStatus {
    /// Whether a volunteer may still be accepted.
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Waiting | Self::Volunteered)
    }

    /// Whether a request in this status must carry a volunteer.
    ///
    /// For every persisted request, `volunteer_id.is_some()` equals this.
    pub fn requires_volunteer(&self) -> bool {
        matches!(self, Self::Accepting | Self::Completed | Self::Done)
    }

    /// Whether the request may be deleted in this status.
    pub fn is_deletable(&self) -> bool {
        !matches!(self, Self::Done)
    }

    /// Whether the poster may move the request to `target` through a plain
    /// update rather than a dedicated transition.
    pub fn can_set_manually(&self, target: RequestStatus) -> bool {
        if *self == target {
            return true;
        }
        matches!(
            (self, target),
            (Self::Completed, Self::Done)
                | (Self::Waiting | Self::Volunteered, Self::Cancelled)
                | (Self::Cancelled, Self::Waiting)
        )
    }

    /// Return the status as an uppercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Waiting => "WAITING",
            Self::Volunteered => "VOLUNTEERED",
            Self::Accepting => "ACCEPTING",
            Self::Completed => "COMPLETED",
            Self::Done => "DONE",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RequestStatus {
    type Err = helphub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "WAITING" => Ok(Self::Waiting),
            "VOLUNTEERED" => Ok(Self::Volunteered),
            "ACCEPTING" => Ok(Self::Accepting),
            "COMPLETED" => Ok(Self::Completed),
            "DONE" => Ok(Self::Done),
            "CANCELLED" => Ok(Self::Cancelled),
            _ => Err(helphub_core::AppError::validation(format!(
                "Invalid request status: '{s}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [RequestStatus; 6] = [
        RequestStatus::Waiting,
        RequestStatus::Volunteered,
        RequestStatus::Accepting,
        RequestStatus::Completed,
        RequestStatus::Done,
        RequestStatus::Cancelled,
    ];

    #[test]
    fn test_only_done_is_protected_from_delete() {
        for status in ALL {
            assert_eq!(status.is_deletable(), status != RequestStatus::Done);
        }
    }

    #[test]
    fn test_manual_transitions() {
        assert!(RequestStatus::Completed.can_set_manually(RequestStatus::Done));
        assert!(RequestStatus::Waiting.can_set_manually(RequestStatus::Cancelled));
        assert!(RequestStatus::Cancelled.can_set_manually(RequestStatus::Waiting));
        assert!(RequestStatus::Accepting.can_set_manually(RequestStatus::Accepting));

        assert!(!RequestStatus::Waiting.can_set_manually(RequestStatus::Accepting));
        assert!(!RequestStatus::Accepting.can_set_manually(RequestStatus::Completed));
        assert!(!RequestStatus::Done.can_set_manually(RequestStatus::Waiting));
        assert!(!RequestStatus::Waiting.can_set_manually(RequestStatus::Done));
    }

    #[test]
    fn test_manual_transitions_never_require_a_new_volunteer() {
        for from in ALL {
            for to in ALL {
                if from != to && from.can_set_manually(to) && to.requires_volunteer() {
                    assert!(from.requires_volunteer(), "{from} -> {to}");
                }
            }
        }
    }

    #[test]
    fn test_serde_uses_uppercase_names() {
        let json = serde_json::to_string(&RequestStatus::Volunteered).unwrap();
        assert_eq!(json, "\"VOLUNTEERED\"");
        assert_eq!("cancelled".parse::<RequestStatus>().unwrap(), RequestStatus::Cancelled);
    }
}
