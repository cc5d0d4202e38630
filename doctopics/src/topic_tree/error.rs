//! Error types for topic tree construction

use super::topic::TopicId;
use thiserror::Error;

/// Errors raised by topic tree mutations
///
/// Every rejected mutation leaves the tree unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TopicTreeError {
    /// The topic already belongs to another parent
    #[error("Cannot attach topic {topic}: it is already a sub-topic of topic {owner}")]
    OwnershipViolation {
        /// The topic that was being attached
        topic: TopicId,
        /// Its current parent
        owner: TopicId,
    },

    /// The topic would become its own ancestor
    #[error("Cannot attach topic {topic} under topic {parent}: it would create a cycle")]
    Cycle {
        /// The topic that was being attached
        topic: TopicId,
        /// The requested parent
        parent: TopicId,
    },

    /// The id does not belong to this tree
    #[error("Unknown topic {0}")]
    UnknownTopic(TopicId),

    /// The sub-topic position does not exist
    #[error("Position {index} is out of range for topic {parent} ({len} sub-topics)")]
    IndexOutOfRange {
        /// The parent whose sub-topics were addressed
        parent: TopicId,
        /// Requested position
        index: usize,
        /// Number of sub-topics
        len: usize,
    },
}
