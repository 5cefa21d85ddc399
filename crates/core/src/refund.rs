//! Refund request lifecycle states.

use serde::{Deserialize, Serialize};

/// Review state of a refund request. New requests start as `Pending`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RefundStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl RefundStatus {
    /// The stored (and wire) spelling of the status.
    pub fn as_str(self) -> &'static str {
        match self {
            RefundStatus::Pending => "Pending",
            RefundStatus::Approved => "Approved",
            RefundStatus::Rejected => "Rejected",
        }
    }
}
