use indexmap::{IndexMap, IndexSet};
use tracing::trace;

use crate::builder::{BuildError, SymbolKind};

use super::constraint::ConstraintList;
use super::ClassId;

/// The variables declared directly in a class.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableSet(IndexSet<String>);

impl VariableSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a variable to the local scope of `class`.
    pub fn declare(
        &mut self,
        class: &str,
        name: impl Into<String>,
    ) -> Result<&mut Self, BuildError> {
        let name = name.into();
        trace!(class, variable = %name, "declaring a variable");

        if self.0.contains(&name) {
            return Err(BuildError::DuplicateSymbol {
                class: class.to_owned(),
                name,
                kind: SymbolKind::Variable,
            });
        }

        self.0.insert(name);

        Ok(self)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// The constants declared directly in a class, mapped to their literal values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstantMap(IndexMap<String, String>);

impl ConstantMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a constant to the local scope of `class`.
    ///
    /// Constants live in a namespace separate from variables.
    pub fn declare(
        &mut self,
        class: &str,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<&mut Self, BuildError> {
        let name = name.into();
        trace!(class, constant = %name, "declaring a constant");

        if self.0.contains_key(&name) {
            return Err(BuildError::DuplicateSymbol {
                class: class.to_owned(),
                name,
                kind: SymbolKind::Constant,
            });
        }

        self.0.insert(name, value.into());

        Ok(self)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

#[derive(Debug, Clone)]
pub struct FuzzyClass {
    name: String,
    superclass: Option<ClassId>,
    variables: VariableSet,
    constants: ConstantMap,
    constraints: ConstraintList,
    hidden: bool,
}

impl FuzzyClass {
    pub(crate) fn new(
        name: String,
        superclass: Option<ClassId>,
        variables: VariableSet,
        constants: ConstantMap,
        constraints: ConstraintList,
        hidden: bool,
    ) -> Self {
        Self {
            name,
            superclass,
            variables,
            constants,
            constraints,
            hidden,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn superclass(&self) -> Option<ClassId> {
        self.superclass
    }

    pub fn variables(&self) -> &VariableSet {
        &self.variables
    }

    pub fn constants(&self) -> &ConstantMap {
        &self.constants
    }

    pub fn constraints(&self) -> &ConstraintList {
        &self.constraints
    }

    /// Hidden classes are left out of [`Classifier::visible_classes`](super::Classifier::visible_classes)
    /// but can still be extended and targeted by relations.
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Checks the local scope only; inherited variables are not considered.
    pub fn contains_var(&self, name: &str) -> bool {
        self.variables.contains(name)
    }
}
