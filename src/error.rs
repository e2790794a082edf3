use crate::{Attribute, AttributeSet, Fd};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),

    /// A split that would leave one branch as large as the relation it came from.
    #[error("splitting {relation} on {violation} does not shrink the relation")]
    NonTerminating { relation: AttributeSet, violation: Fd },

    #[error("decomposition exceeded the limit of {0} splits")]
    SplitLimitExceeded(usize),
}

/// Malformed schemas, dependencies or notation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidInput {
    #[error("relation has no attributes")]
    EmptyAttributeSet,

    #[error("dependency {0} has an empty side")]
    EmptySide(Fd),

    #[error("dependency {fd} mentions {attribute}, which is not in {relation}")]
    UnknownAttribute {
        fd: Fd,
        attribute: Attribute,
        relation: AttributeSet,
    },

    #[error("cannot parse {input:?}: {reason}")]
    Parse { input: String, reason: String },
}
