//! Emergency level of a help request.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How urgently the poster needs help.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "emergency_level", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmergencyLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl EmergencyLevel {
    /// Return the level as an uppercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for EmergencyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EmergencyLevel {
    type Err = helphub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "LOW" => Ok(Self::Low),
            "MEDIUM" => Ok(Self::Medium),
            "HIGH" => Ok(Self::High),
            "CRITICAL" => Ok(Self::Critical),
            _ => Err(helphub_core::AppError::validation(format!(
                "Invalid emergency level: '{s}'. Expected one of: LOW, MEDIUM, HIGH, CRITICAL"
            ))),
        }
    }
}
