use crate::error::InvalidInput;
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeSet,
    fmt,
    ops::{BitAnd, BitOr, Sub},
    str::FromStr,
};

/// A column of a relation.
///
/// Names are compared case-sensitively. Single characters are the usual
/// convention, but longer names are supported.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::Deref,
    derive_more::AsRef,
    derive_more::From,
    derive_more::Into,
)]
#[as_ref(forward)]
#[serde(transparent)]
pub struct Attribute(pub String);

impl Attribute {
    /// Whether the name is usable inside the textual notation.
    fn is_valid_name(name: &str) -> bool {
        !name.is_empty() && name.chars().all(|c| c.is_alphanumeric() || c == '_')
    }
}

impl From<&str> for Attribute {
    fn from(name: &str) -> Self {
        Self(name.to_owned())
    }
}

impl From<char> for Attribute {
    fn from(name: char) -> Self {
        Self(name.to_string())
    }
}

/// A set of attributes, kept deduplicated and sorted.
///
/// The `Display` form is the canonical key of the set: names are
/// concatenated when all of them are one character long (`ABD`), and
/// comma-separated otherwise (`city,name`, or `state,` for a single name).
/// Parsing the display form gives the set back.
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
pub struct AttributeSet(pub BTreeSet<Attribute>);

impl AttributeSet {
    pub fn new() -> Self {
        Default::default()
    }

    /// A copy of the set with `attribute` removed.
    pub fn without(&self, attribute: &Attribute) -> Self {
        let mut ans = self.clone();
        ans.remove(attribute);
        ans
    }

    /// A copy of the set with `attribute` added.
    pub fn with(&self, attribute: Attribute) -> Self {
        let mut ans = self.clone();
        ans.insert(attribute);
        ans
    }

    /// Whether every attribute name is a single character.
    pub fn is_compact(&self) -> bool {
        self.iter().all(|a| a.chars().count() == 1)
    }
}

impl FromIterator<Attribute> for AttributeSet {
    fn from_iter<T: IntoIterator<Item = Attribute>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> FromIterator<&'a Attribute> for AttributeSet {
    fn from_iter<T: IntoIterator<Item = &'a Attribute>>(iter: T) -> Self {
        Self(iter.into_iter().cloned().collect())
    }
}

impl FromIterator<char> for AttributeSet {
    fn from_iter<T: IntoIterator<Item = char>>(iter: T) -> Self {
        Self(iter.into_iter().map(Attribute::from).collect())
    }
}

/// How a string of attribute names is split into attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notation {
    /// One character per attribute: `ABD`.
    Compact,
    /// Names separated by commas or whitespace: `city,name`. A single name
    /// is written with a trailing comma (`state,`).
    Separated,
}

impl Notation {
    fn is_separator(c: char) -> bool {
        c == ',' || c.is_whitespace()
    }

    /// `Separated` if `s` contains a separator, `Compact` otherwise.
    pub fn detect(s: &str) -> Self {
        if s.trim().contains(Self::is_separator) {
            Notation::Separated
        } else {
            Notation::Compact
        }
    }

    /// The notation `set` is displayed in.
    pub fn of(set: &AttributeSet) -> Self {
        if set.is_compact() {
            Notation::Compact
        } else {
            Notation::Separated
        }
    }
}

impl AttributeSet {
    /// Parse `s` with an explicit notation.
    pub fn parse_with(s: &str, notation: Notation) -> Result<Self, InvalidInput> {
        let s = s.trim();
        if s.is_empty() || s == "{}" {
            return Ok(Self::new());
        }

        let names: Vec<String> = match notation {
            Notation::Separated => s
                .split(Notation::is_separator)
                .filter(|t| !t.is_empty())
                .map(str::to_owned)
                .collect(),
            Notation::Compact => s.chars().map(String::from).collect(),
        };

        names
            .into_iter()
            .map(|name| {
                if Attribute::is_valid_name(&name) {
                    Ok(Attribute(name))
                } else {
                    Err(InvalidInput::Parse {
                        input: s.to_owned(),
                        reason: format!("invalid attribute name {name:?}"),
                    })
                }
            })
            .collect()
    }

    /// Write the set in the given notation.
    pub(crate) fn write_with(
        &self,
        f: &mut fmt::Formatter<'_>,
        notation: Notation,
    ) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "{{}}");
        }

        match notation {
            Notation::Compact => {
                for a in self.iter() {
                    write!(f, "{a}")?;
                }
            }
            Notation::Separated => {
                for (i, a) in self.iter().enumerate() {
                    if i != 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{a}")?;
                }
                if self.len() == 1 {
                    write!(f, ",")?;
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for AttributeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_with(f, Notation::of(self))
    }
}

impl FromStr for AttributeSet {
    type Err = InvalidInput;

    /// Parses `ABD`, `A B D`, `A,B,D`, `city, name` or `state,`. A string
    /// without separators is read one character per attribute.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_with(s, Notation::detect(s))
    }
}

impl<'a, 'b> BitOr<&'b AttributeSet> for &'a AttributeSet {
    type Output = AttributeSet;

    fn bitor(self, rhs: &'b AttributeSet) -> Self::Output {
        AttributeSet(&self.0 | &rhs.0)
    }
}

impl<'a, 'b> BitAnd<&'b AttributeSet> for &'a AttributeSet {
    type Output = AttributeSet;

    fn bitand(self, rhs: &'b AttributeSet) -> Self::Output {
        AttributeSet(&self.0 & &rhs.0)
    }
}

impl<'a, 'b> Sub<&'b AttributeSet> for &'a AttributeSet {
    type Output = AttributeSet;

    fn sub(self, rhs: &'b AttributeSet) -> Self::Output {
        AttributeSet(&self.0 - &rhs.0)
    }
}

#[macro_export]
macro_rules! attrs {
    () => {
        $crate::attribute::AttributeSet::new()
    };
    ($($x: ident)+) => {{
        let mut set = $crate::attribute::AttributeSet::new();
        $(
            set.insert($crate::attribute::Attribute::from(stringify!($x)));
        )+
        set
    }};
}
