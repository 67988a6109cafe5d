//! Builder and validator for hierarchical fuzzy tree classifiers.
//!
//! A grammar driver feeds declarations through [`VariableSet`], [`ConstantMap`] and
//! [`ConstraintList`], registers each class with a [`TreeClassifierBuilder`] and finally calls
//! [`TreeClassifierBuilder::finalize`] to obtain a validated [`Classifier`].

pub mod builder;
pub mod classifier;
pub mod config;
pub mod dump;
pub mod errors;

pub use builder::{BuildError, SymbolKind, TreeClassifierBuilder};
pub use classifier::{
    ClassId, Classifier, ConstantMap, Constraint, ConstraintKind, ConstraintList, Dependency,
    FuzzyClass, VariableSet,
};
pub use config::{BuilderConfig, ErrorPolicy};
