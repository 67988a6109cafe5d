use std::error::Error;
use std::fmt::{self, Display};

use crate::classifier::ConstraintKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Variable,
    Constant,
}

impl Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Variable => "variable",
                Self::Constant => "constant",
            }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// A variable or a constant is declared twice in the same class.
    DuplicateSymbol {
        class: String,
        name: String,
        kind: SymbolKind,
    },

    DuplicateClass {
        class: String,
    },

    /// The superclass has not been registered before the class extending it.
    UndeclaredSuperclass {
        class: String,
        superclass: String,
    },

    /// A relation targets a class that does not exist.
    UndeclaredClass {
        class: String,
        target: String,
    },

    /// `class` does not declare `variable`.
    ///
    /// `referenced_from` is the class owning the offending constraint. It differs from `class`
    /// when the variable was looked up in the target of a relation.
    UndeclaredVariable {
        class: String,
        variable: String,
        referenced_from: String,
    },

    MalformedConstraint {
        kind: ConstraintKind,
        expected: usize,
        supplied: usize,
    },
}

impl BuildError {
    /// The class the error is reported against.
    pub fn class(&self) -> Option<&str> {
        match self {
            Self::DuplicateSymbol { class, .. }
            | Self::DuplicateClass { class }
            | Self::UndeclaredSuperclass { class, .. }
            | Self::UndeclaredClass { class, .. }
            | Self::UndeclaredVariable { class, .. } => Some(class),

            Self::MalformedConstraint { .. } => None,
        }
    }
}

impl Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateSymbol { class, name, kind } => {
                write!(f, "redeclaration of {} `{}` in class `{}`", kind, name, class)
            }

            Self::DuplicateClass { class } => write!(f, "redeclaration of class `{}`", class),

            Self::UndeclaredSuperclass { class, superclass } => write!(
                f,
                "class `{}` extends a non-declared class `{}`",
                class, superclass
            ),

            Self::UndeclaredClass { class, target } => write!(
                f,
                "relation in class `{}` references a non-existent class `{}`",
                class, target
            ),

            Self::UndeclaredVariable {
                class,
                variable,
                referenced_from,
            } if class == referenced_from => write!(
                f,
                "rule in class `{}` references a non-existent variable `{}`",
                class, variable
            ),

            Self::UndeclaredVariable {
                class,
                variable,
                referenced_from,
            } => write!(
                f,
                "relation in class `{}` references a non-existent variable `{}` of class `{}`",
                referenced_from, variable, class
            ),

            Self::MalformedConstraint {
                kind,
                expected,
                supplied,
            } => write!(
                f,
                "a {} takes {} tokens, but {} were supplied",
                kind, expected, supplied
            ),
        }
    }
}

impl Error for BuildError {}
