//! Types for one-time code service results

use chrono::{DateTime, Utc};

/// Result of an atomic compare-and-delete on the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsumeOutcome {
    /// The code matched and the entry was removed
    Consumed,
    /// A valid entry exists but the code differs; the entry was kept
    Mismatch,
    /// No entry, or the entry had expired
    Absent,
}

/// Result of issuing a code
///
/// Deliberately omits the code itself.
#[derive(Debug, Clone)]
pub struct IssueReceipt {
    /// Identifier the code was issued for
    pub identifier: String,
    /// When the issued code stops being accepted
    pub expires_at: DateTime<Utc>,
    /// The mail provider's message id
    pub message_id: String,
}
