use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Review, TargetKind};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SubmitReviewRequest {
    pub target_id: i64,
    pub kind: TargetKind,
    pub rating: u8,
    pub comment: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReviewList {
    pub items: Vec<Review>,
}

/// `can_review` is purchase-gated and drops back to false once a review
/// exists; `has_reviewed` tells the client to show the existing review
/// instead of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Eligibility {
    pub can_review: bool,
    pub has_reviewed: bool,
}
