use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Pipeline stage of an application. Stored as its snake_case name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Draft,
    #[default]
    Submitted,
    Received,
    InterviewRequested,
    OnsiteRequested,
    Offer,
    Rejected,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 7] = [
        ApplicationStatus::Draft,
        ApplicationStatus::Submitted,
        ApplicationStatus::Received,
        ApplicationStatus::InterviewRequested,
        ApplicationStatus::OnsiteRequested,
        ApplicationStatus::Offer,
        ApplicationStatus::Rejected,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ApplicationStatus::Draft => "draft",
            ApplicationStatus::Submitted => "submitted",
            ApplicationStatus::Received => "received",
            ApplicationStatus::InterviewRequested => "interview_requested",
            ApplicationStatus::OnsiteRequested => "onsite_requested",
            ApplicationStatus::Offer => "offer",
            ApplicationStatus::Rejected => "rejected",
        }
    }

    fn allowed_list() -> String {
        let mut names: Vec<&str> = Self::ALL.iter().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names.join(", ")
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApplicationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == wanted)
            .ok_or_else(|| format!("status must be one of: {}", Self::allowed_list()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_every_status() {
        for status in ApplicationStatus::ALL {
            assert_eq!(status.as_str().parse::<ApplicationStatus>(), Ok(status));
        }
    }

    #[test]
    fn test_default_is_submitted() {
        assert_eq!(ApplicationStatus::default(), ApplicationStatus::Submitted);
    }

    #[test]
    fn test_unknown_status_lists_allowed_values_sorted() {
        let err = "hired".parse::<ApplicationStatus>().unwrap_err();
        assert_eq!(
            err,
            "status must be one of: draft, interview_requested, offer, onsite_requested, \
             received, rejected, submitted"
        );
    }

    #[test]
    fn test_parse_is_case_sensitive_but_trims() {
        assert_eq!(" offer ".parse::<ApplicationStatus>(), Ok(ApplicationStatus::Offer));
        assert!("Offer".parse::<ApplicationStatus>().is_err());
    }

    #[test]
    fn test_serde_matches_as_str() {
        let json = serde_json::to_string(&ApplicationStatus::InterviewRequested).unwrap();
        assert_eq!(json, r#""interview_requested""#);
        assert_eq!(ApplicationStatus::OnsiteRequested.to_string(), "onsite_requested");
    }
}
