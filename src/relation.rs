use crate::{
    alg::project,
    bcnf,
    error::{InvalidInput, Result},
    AttributeSet, FdSet,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A relation schema together with the dependencies that hold over it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Relation {
    pub attributes: AttributeSet,
    pub fds: FdSet,
}

impl Relation {
    /// Build a relation, rejecting empty schemas, dependencies with an empty
    /// side and dependencies that mention attributes outside the schema.
    pub fn new(attributes: AttributeSet, fds: FdSet) -> Result<Self> {
        if attributes.is_empty() {
            return Err(InvalidInput::EmptyAttributeSet.into());
        }

        for fd in fds.iter() {
            if fd.lhs.is_empty() || fd.rhs.is_empty() {
                return Err(InvalidInput::EmptySide(fd.clone()).into());
            }
            let unknown = fd.attributes().difference(&attributes).next().cloned();
            if let Some(attribute) = unknown {
                return Err(InvalidInput::UnknownAttribute {
                    fd: fd.clone(),
                    attribute,
                    relation: attributes,
                }
                .into());
            }
        }

        Ok(Self { attributes, fds })
    }

    /// Restrict the relation to `attributes`, projecting its dependencies.
    pub(crate) fn sub_relation(&self, attributes: AttributeSet) -> Relation {
        let fds = project(&attributes, &self.fds);
        Relation { attributes, fds }
    }

    /// Whether every dependency satisfies BCNF.
    pub fn is_bcnf(&self) -> bool {
        bcnf::is_decomposed(&self.attributes, &self.fds)
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R({}) {}", self.attributes, self.fds)
    }
}
