use super::decompose::{run, DecomposeConfig, Node};
use crate::{error::Result, Fd, Relation};
use ptree::{Style, TreeItem};
use serde::{Deserialize, Serialize};
use std::{borrow::Cow, collections::BTreeSet, io};

/// The history of a BCNF decomposition.
///
/// Inner nodes record the dependency their relation was split on; the
/// leaves are the resulting BCNF relations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecompositionTree {
    pub relation: Relation,
    pub violation: Option<Fd>,
    pub children: Vec<DecompositionTree>,
}

impl TreeItem for DecompositionTree {
    type Child = Self;

    fn write_self<W: io::Write>(&self, f: &mut W, style: &Style) -> io::Result<()> {
        match &self.violation {
            Some(fd) => write!(
                f,
                "{} split on {}",
                style.paint(&self.relation.attributes),
                fd
            ),
            None => write!(f, "{}", style.paint(&self.relation)),
        }
    }

    fn children(&self) -> Cow<[Self::Child]> {
        Cow::from(&self.children[..])
    }
}

impl DecompositionTree {
    fn leaf(relation: Relation) -> Self {
        Self {
            relation,
            violation: None,
            children: vec![],
        }
    }

    /// Assemble the tree rooted at the first node, or `None` if there are no
    /// nodes.
    fn from_nodes(nodes: Vec<Node>) -> Option<Self> {
        // Children always follow their parent, so building back to front
        // finds every child already assembled.
        let mut built: Vec<Option<DecompositionTree>> = vec![None; nodes.len()];
        for (id, node) in nodes.into_iter().enumerate().rev() {
            let children = node
                .children
                .iter()
                .filter_map(|&child| built[child].take())
                .collect();
            built[id] = Some(DecompositionTree {
                relation: node.relation,
                violation: node.violation,
                children,
            });
        }
        built.into_iter().next().flatten()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// BCNF relations, depth first. Unlike [`super::bcnf_decompose`], a
    /// relation reached through several branches is listed each time.
    pub fn leaves(&self) -> Vec<&Relation> {
        let mut ans = vec![];
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            if node.is_leaf() {
                ans.push(&node.relation);
            }
            stack.extend(node.children.iter().rev());
        }
        ans
    }

    /// The BCNF relations in the order [`super::bcnf_decompose`] returns
    /// them: depth first, each attribute set once.
    pub fn into_relations(self) -> Vec<Relation> {
        let mut seen = BTreeSet::new();
        let mut ans = vec![];
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            if node.is_leaf() {
                if seen.insert(node.relation.attributes.clone()) {
                    ans.push(node.relation);
                }
            } else {
                stack.extend(node.children.into_iter().rev());
            }
        }
        ans
    }

    /// Number of splits performed.
    pub fn num_splits(&self) -> usize {
        let mut ans = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            if !node.is_leaf() {
                ans += 1;
            }
            stack.extend(node.children.iter());
        }
        ans
    }

    /// Render the tree as text.
    pub fn render(&self) -> io::Result<String> {
        let mut buf = Vec::new();
        ptree::write_tree(self, &mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

/// Decompose `relation` like [`super::bcnf_decompose_with`], keeping every
/// intermediate split.
pub fn bcnf_decompose_tree(
    relation: &Relation,
    config: &DecomposeConfig,
) -> Result<DecompositionTree> {
    let trace = run(relation, config)?;
    Ok(DecompositionTree::from_nodes(trace.nodes)
        .unwrap_or_else(|| DecompositionTree::leaf(relation.clone())))
}
