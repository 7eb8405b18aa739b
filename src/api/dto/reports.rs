//! DTOs for abuse reports.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::FlagOutcome;

/// A report naming a link by code or by short URL.
#[derive(Debug, Deserialize, Validate)]
pub struct ReportRequest {
    #[validate(length(min = 1, max = 2048, message = "Link must not be empty"))]
    pub link: String,
}

#[derive(Debug, Serialize)]
pub struct ReportResponse {
    pub status: &'static str,
}

impl From<FlagOutcome> for ReportResponse {
    fn from(outcome: FlagOutcome) -> Self {
        Self {
            status: match outcome {
                FlagOutcome::Flagged => "flagged",
                FlagOutcome::AlreadyFlagged => "already_flagged",
            },
        }
    }
}
