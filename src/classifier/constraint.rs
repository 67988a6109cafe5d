use std::fmt::{self, Display};
use std::slice;

use itertools::Itertools;
use serde::Deserialize;

use crate::builder::BuildError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum ConstraintKind {
    SimpleFeature,
    SimpleRelation,
    ComplexRelation,
    InverseRelation,
}

impl ConstraintKind {
    /// The number of positional tokens the grammar supplies for this kind.
    pub fn arity(self) -> usize {
        match self {
            Self::SimpleFeature => 2,
            Self::SimpleRelation => 4,
            Self::ComplexRelation | Self::InverseRelation => 5,
        }
    }

    pub fn is_relation(self) -> bool {
        !matches!(self, Self::SimpleFeature)
    }
}

impl Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::SimpleFeature => "simple feature",
                Self::SimpleRelation => "simple relation",
                Self::ComplexRelation => "complex relation",
                Self::InverseRelation => "inverse relation",
            }
        )
    }
}

/// Asserts that `variable` matches `label`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SimpleFeature {
    pub variable: String,
    pub label: String,
}

impl SimpleFeature {
    pub fn from_tokens([variable, label]: [String; 2]) -> Self {
        Self { variable, label }
    }
}

/// Relates `variable` to `target_variable` declared in the class `target`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SimpleRelation {
    pub target: String,
    pub target_variable: String,
    pub variable: String,
    pub label: String,
}

impl SimpleRelation {
    pub fn from_tokens([target, target_variable, variable, label]: [String; 4]) -> Self {
        Self {
            target,
            target_variable,
            variable,
            label,
        }
    }
}

/// Relates two own variables to a single variable of `target`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComplexRelation {
    pub target: String,
    pub target_variable: String,
    pub variables: [String; 2],
    pub label: String,
}

impl ComplexRelation {
    pub fn from_tokens([target, target_variable, first, second, label]: [String; 5]) -> Self {
        Self {
            target,
            target_variable,
            variables: [first, second],
            label,
        }
    }
}

/// Relates one own variable to two variables of `target`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InverseRelation {
    pub target: String,
    pub variable: String,
    pub target_variables: [String; 2],
    pub label: String,
}

impl InverseRelation {
    // the own variable comes first in the token stream, unlike the other relations
    pub fn from_tokens([variable, target, first, second, label]: [String; 5]) -> Self {
        Self {
            target,
            variable,
            target_variables: [first, second],
            label,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Constraint {
    SimpleFeature(SimpleFeature),
    SimpleRelation(SimpleRelation),
    ComplexRelation(ComplexRelation),
    InverseRelation(InverseRelation),
}

impl Constraint {
    /// Builds a constraint of the given kind from the positional tokens of a grammar production.
    ///
    /// No names are resolved here; that happens in the consistency sweep.
    /// A token list of the wrong length yields [`BuildError::MalformedConstraint`].
    pub fn from_tokens(kind: ConstraintKind, tokens: Vec<String>) -> Result<Self, BuildError> {
        let supplied = tokens.len();
        let malformed = |_: Vec<String>| BuildError::MalformedConstraint {
            kind,
            expected: kind.arity(),
            supplied,
        };

        Ok(match kind {
            ConstraintKind::SimpleFeature => {
                SimpleFeature::from_tokens(tokens.try_into().map_err(malformed)?).into()
            }

            ConstraintKind::SimpleRelation => {
                SimpleRelation::from_tokens(tokens.try_into().map_err(malformed)?).into()
            }

            ConstraintKind::ComplexRelation => {
                ComplexRelation::from_tokens(tokens.try_into().map_err(malformed)?).into()
            }

            ConstraintKind::InverseRelation => {
                InverseRelation::from_tokens(tokens.try_into().map_err(malformed)?).into()
            }
        })
    }

    pub fn kind(&self) -> ConstraintKind {
        match self {
            Self::SimpleFeature(_) => ConstraintKind::SimpleFeature,
            Self::SimpleRelation(_) => ConstraintKind::SimpleRelation,
            Self::ComplexRelation(_) => ConstraintKind::ComplexRelation,
            Self::InverseRelation(_) => ConstraintKind::InverseRelation,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::SimpleFeature(c) => &c.label,
            Self::SimpleRelation(c) => &c.label,
            Self::ComplexRelation(c) => &c.label,
            Self::InverseRelation(c) => &c.label,
        }
    }

    /// Variables that must be declared in the class owning the constraint, in checking order.
    pub fn own_variables(&self) -> &[String] {
        match self {
            Self::SimpleFeature(c) => slice::from_ref(&c.variable),
            Self::SimpleRelation(c) => slice::from_ref(&c.variable),
            Self::ComplexRelation(c) => &c.variables,
            Self::InverseRelation(c) => slice::from_ref(&c.variable),
        }
    }

    /// The class a relation refers to. `None` for simple features.
    pub fn target(&self) -> Option<&str> {
        match self {
            Self::SimpleFeature(_) => None,
            Self::SimpleRelation(c) => Some(&c.target),
            Self::ComplexRelation(c) => Some(&c.target),
            Self::InverseRelation(c) => Some(&c.target),
        }
    }

    /// Variables that must be declared in the target class, in checking order.
    ///
    /// Only inverse relations reference two of them.
    pub fn target_variables(&self) -> &[String] {
        match self {
            Self::SimpleFeature(_) => &[],
            Self::SimpleRelation(c) => slice::from_ref(&c.target_variable),
            Self::ComplexRelation(c) => slice::from_ref(&c.target_variable),
            Self::InverseRelation(c) => &c.target_variables,
        }
    }
}

macro_rules! impl_from_variant {
    ($( $variant:ident ),+ $(,)?) => {
        $(
            impl From<$variant> for Constraint {
                fn from(constraint: $variant) -> Self {
                    Self::$variant(constraint)
                }
            }
        )+
    };
}

impl_from_variant!(SimpleFeature, SimpleRelation, ComplexRelation, InverseRelation);

impl Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SimpleFeature(c) => write!(f, "{} is {}", c.variable, c.label),

            Self::SimpleRelation(c) => write!(
                f,
                "{} is {} relative to {}.{}",
                c.variable, c.label, c.target, c.target_variable
            ),

            Self::ComplexRelation(c) => write!(
                f,
                "({}) is {} relative to {}.{}",
                c.variables.iter().join(", "),
                c.label,
                c.target,
                c.target_variable
            ),

            Self::InverseRelation(c) => write!(
                f,
                "{} is {} relative to {}.({})",
                c.variable,
                c.label,
                c.target,
                c.target_variables.iter().join(", ")
            ),
        }
    }
}

/// The ordered constraints of a single class.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstraintList(Vec<Constraint>);

impl ConstraintList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Constructs a constraint from grammar tokens and appends it to the list.
    pub fn assemble(
        &mut self,
        kind: ConstraintKind,
        tokens: Vec<String>,
    ) -> Result<&mut Self, BuildError> {
        let constraint = Constraint::from_tokens(kind, tokens)?;
        self.push(constraint);

        Ok(self)
    }

    pub fn push(&mut self, constraint: impl Into<Constraint>) {
        self.0.push(constraint.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, Constraint> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a ConstraintList {
    type Item = &'a Constraint;
    type IntoIter = slice::Iter<'a, Constraint>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<Constraint> for ConstraintList {
    fn from_iter<I: IntoIterator<Item = Constraint>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
