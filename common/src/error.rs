//! Error type shared by every highlight pipeline.

/// Failure raised while resolving offsets or rewriting a tree.
#[derive(Debug, Clone, PartialEq)]
pub enum HighlightError {
    /// A flattened-text offset lies past the end of the subtree it was resolved against.
    OffsetOutOfRange { offset: usize, len: usize },
    /// The tail of a match could not be placed: the tree ran out of text before the match did.
    MatchOverrun { unplaced: usize },
    /// A match started before the end of a match that was already wrapped.
    OutOfOrder { start: usize, previous_end: usize },
    /// A text split position outside the node, or inside a surrogate pair.
    InvalidSplit { offset: usize, len: usize },
    /// A text operation was applied to a node that is not a text node.
    NotText,
    /// The host document refused an operation.
    Host(String),
}

impl std::fmt::Display for HighlightError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OffsetOutOfRange { offset, len } => {
                write!(f, "offset {} exceeds content length {}", offset, len)
            }
            Self::MatchOverrun { unplaced } => {
                write!(f, "ran out of text with {} matched units left to wrap", unplaced)
            }
            Self::OutOfOrder { start, previous_end } => {
                write!(f, "match at {} starts before the previous match end {}", start, previous_end)
            }
            Self::InvalidSplit { offset, len } => {
                write!(f, "cannot split text of length {} at {}", len, offset)
            }
            Self::NotText => write!(f, "node is not a text node"),
            Self::Host(message) => write!(f, "host error: {}", message),
        }
    }
}

impl std::error::Error for HighlightError {}

pub type Result<T> = std::result::Result<T, HighlightError>;
