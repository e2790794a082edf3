use crate::{
    attribute::Notation, closure::closure, error::InvalidInput, Attribute, AttributeSet,
};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeSet, fmt, str::FromStr};

/// A functional dependency `lhs -> rhs`.
///
/// Dependencies are ordered by `lhs` first and then by `rhs`; this is the
/// canonical order used whenever "the first" dependency of a set is needed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Fd {
    pub lhs: AttributeSet,
    pub rhs: AttributeSet,
}

impl Fd {
    pub fn new(lhs: AttributeSet, rhs: AttributeSet) -> Self {
        Self { lhs, rhs }
    }

    /// `lhs -> a` for a single attribute.
    pub fn single(lhs: AttributeSet, a: Attribute) -> Self {
        Self::new(lhs, AttributeSet::from([a]))
    }

    /// Whether the rhs is already contained in the lhs.
    pub fn is_trivial(&self) -> bool {
        self.rhs.is_subset(&self.lhs)
    }

    /// One dependency per rhs attribute.
    pub fn split(&self) -> impl Iterator<Item = Fd> + '_ {
        self.rhs
            .iter()
            .map(move |a| Fd::single(self.lhs.clone(), a.clone()))
    }

    /// All attributes mentioned on either side.
    pub fn attributes(&self) -> AttributeSet {
        &self.lhs | &self.rhs
    }

    /// Parse `lhs -> rhs`, reading both sides in `notation`.
    pub fn parse_with(s: &str, notation: Notation) -> Result<Self, InvalidInput> {
        let (lhs, rhs) = split_arrow(s)?;
        let fd = Fd::new(
            AttributeSet::parse_with(lhs, notation)?,
            AttributeSet::parse_with(rhs, notation)?,
        );
        if fd.lhs.is_empty() || fd.rhs.is_empty() {
            return Err(InvalidInput::EmptySide(fd));
        }
        Ok(fd)
    }
}

fn split_arrow(s: &str) -> Result<(&str, &str), InvalidInput> {
    s.split_once("->").ok_or_else(|| InvalidInput::Parse {
        input: s.to_owned(),
        reason: "missing `->`".to_owned(),
    })
}

impl fmt::Display for Fd {
    /// Both sides share one notation, so `A,B -> city` reads back as written.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let notation = Notation::of(&self.attributes());
        self.lhs.write_with(f, notation)?;
        write!(f, " -> ")?;
        self.rhs.write_with(f, notation)
    }
}

impl FromStr for Fd {
    type Err = InvalidInput;

    /// Parses `AB->C`, `AB -> CD` or `city, zip -> state`. A separator on
    /// either side switches both sides to separated names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lhs, rhs) = split_arrow(s)?;
        let notation = match (Notation::detect(lhs), Notation::detect(rhs)) {
            (Notation::Compact, Notation::Compact) => Notation::Compact,
            _ => Notation::Separated,
        };
        Self::parse_with(s, notation)
    }
}

/// A set of functional dependencies. Duplicates collapse by value.
#[derive(
    Debug,
    Default,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Deref,
    derive_more::DerefMut,
    derive_more::AsRef,
    derive_more::AsMut,
    derive_more::From,
    derive_more::IntoIterator,
)]
#[from(forward)]
#[as_ref(forward)]
#[as_mut(forward)]
#[into_iterator(owned, ref)]
#[serde(transparent)]
pub struct FdSet(pub BTreeSet<Fd>);

impl FdSet {
    pub fn new() -> Self {
        Default::default()
    }

    /// Replace every composite rhs with one dependency per attribute.
    pub fn split_rhs(&self) -> FdSet {
        self.iter().flat_map(Fd::split).collect()
    }

    /// All attributes mentioned by the dependencies.
    pub fn attributes(&self) -> AttributeSet {
        let mut ans = AttributeSet::new();
        for fd in self.iter() {
            ans.extend(fd.lhs.iter().cloned());
            ans.extend(fd.rhs.iter().cloned());
        }
        ans
    }

    /// Whether `fd` follows from this set, i.e. its rhs lies in the closure
    /// of its lhs.
    pub fn implies(&self, fd: &Fd) -> bool {
        fd.rhs.is_subset(&closure(&fd.lhs, self))
    }

    /// Whether every dependency of `other` follows from this set.
    pub fn implies_all(&self, other: &FdSet) -> bool {
        other.iter().all(|fd| self.implies(fd))
    }

    /// Whether both sets imply each other.
    pub fn is_equivalent(&self, other: &FdSet) -> bool {
        self.implies_all(other) && other.implies_all(self)
    }

    /// A copy of the set with `fd` removed.
    pub fn without(&self, fd: &Fd) -> FdSet {
        let mut ans = self.clone();
        ans.remove(fd);
        ans
    }
}

impl FromIterator<Fd> for FdSet {
    fn from_iter<T: IntoIterator<Item = Fd>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for FdSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, fd) in self.iter().enumerate() {
            if i != 0 {
                write!(f, ", ")?;
            }
            write!(f, "{fd}")?;
        }
        write!(f, "}}")
    }
}

impl FromStr for FdSet {
    type Err = InvalidInput;

    /// Parses dependencies separated by `;` or newlines.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(|c: char| c == ';' || c == '\n')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::parse::<Fd>)
            .collect()
    }
}

impl FdSet {
    /// Like [`FdSet::from_str`], with every dependency read in `notation`.
    pub fn parse_with(s: &str, notation: Notation) -> Result<Self, InvalidInput> {
        s.split(|c: char| c == ';' || c == '\n')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(|t| Fd::parse_with(t, notation))
            .collect()
    }
}

#[macro_export]
macro_rules! fd {
    ($($l: ident)+ -> $($r: ident)+) => {
        $crate::fd::Fd::new($crate::attrs!($($l)+), $crate::attrs!($($r)+))
    };
}

#[macro_export]
macro_rules! fds {
    () => {
        $crate::fd::FdSet::new()
    };
    ($($($l: ident)+ -> $($r: ident)+),+ $(,)?) => {{
        let mut set = $crate::fd::FdSet::new();
        $(
            set.insert($crate::fd!($($l)+ -> $($r)+));
        )+
        set
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{attrs, fd, fds};

    #[test]
    fn test_display() {
        assert_eq!("BC -> D", format!("{}", fd!(C B -> D)));
        assert_eq!("{A -> B, BC -> D}", format!("{}", fds![B C -> D, A -> B]));
        assert_eq!("{}", format!("{}", fds![]));
        assert_eq!("city,zip -> state,", format!("{}", fd!(zip city -> state)));
        assert_eq!("A,B -> city,", format!("{}", fd!(A B -> city)));
    }

    #[test]
    fn test_parse() {
        assert_eq!(fd!(A B -> C), "AB->C".parse::<Fd>().unwrap());
        assert_eq!(
            fd!(city zip -> state),
            "city, zip -> state".parse::<Fd>().unwrap()
        );
        assert_eq!(
            fds![A -> B, B C -> D],
            "A -> B; BC -> D\n".parse::<FdSet>().unwrap()
        );
        assert!(matches!(
            "AB".parse::<Fd>(),
            Err(InvalidInput::Parse { .. })
        ));
        assert_eq!(fd!(city -> state), "city, -> state".parse::<Fd>().unwrap());
        assert_eq!(fd!(A B -> city), "A B -> city".parse::<Fd>().unwrap());
        assert!(matches!("->B".parse::<Fd>(), Err(InvalidInput::EmptySide(_))));
    }

    #[test]
    fn test_parse_with() {
        assert_eq!(
            fd!(city -> state),
            Fd::parse_with("city -> state", Notation::Separated).unwrap()
        );
        assert_eq!(
            fds![city zip -> state, state -> zip],
            FdSet::parse_with("city zip -> state; state -> zip", Notation::Separated).unwrap()
        );
    }

    #[test]
    fn test_display_parse_round_trip() {
        for fd in [
            fd!(city zip -> state),
            fd!(city -> state),
            fd!(A B -> city),
            fd!(A B -> C D),
        ] {
            assert_eq!(fd, format!("{fd}").parse::<Fd>().unwrap());
        }
    }

    #[test]
    fn test_split_rhs() {
        let fds = fds![A -> B C, B -> D];
        assert_eq!(fds![A -> B, A -> C, B -> D], fds.split_rhs());
    }

    #[test]
    fn test_canonical_order() {
        let fds = fds![B C -> D, A -> C, A -> B];
        let order: Vec<_> = fds.iter().cloned().collect();
        assert_eq!(vec![fd!(A -> B), fd!(A -> C), fd!(B C -> D)], order);
    }

    #[test]
    fn test_implies() {
        let fds = fds![A -> B, B -> C];
        assert!(fds.implies(&fd!(A -> C)));
        assert!(fds.implies(&fd!(A -> B C)));
        assert!(fds.implies(&fd!(A D -> D)));
        assert!(!fds.implies(&fd!(C -> A)));
    }

    #[test]
    fn test_is_equivalent() {
        let lhs = fds![A -> B C, B -> C];
        let rhs = fds![A -> B, B -> C];
        assert!(lhs.is_equivalent(&rhs));
        assert!(!rhs.is_equivalent(&fds![A -> B]));
        assert_eq!(attrs!(A B C), lhs.attributes());
    }
}
