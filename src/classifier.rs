pub mod class;
pub mod constraint;
pub mod layout;

use std::fmt::{self, Display};
use std::iter::successors;
use std::ops::Index;

use indexmap::IndexMap;
use slotmap::{new_key_type, SlotMap};

pub use self::class::{ConstantMap, FuzzyClass, VariableSet};
pub use self::constraint::{
    ComplexRelation, Constraint, ConstraintKind, ConstraintList, InverseRelation, SimpleFeature,
    SimpleRelation,
};
pub use self::layout::ClassifierLayout;

new_key_type! {
    pub struct ClassId;
}

/// A directed edge of the dependency graph: a constraint of `owner` refers to `target`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Dependency {
    pub owner: String,
    pub target: String,
}

impl Dependency {
    pub fn new(owner: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            target: target.into(),
        }
    }
}

impl Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.owner, self.target)
    }
}

/// The registry of all classes of a fuzzy classifier.
///
/// Classes refer to each other by name or by [`ClassId`]; the registry is the only owner.
/// A populated, validated `Classifier` is obtained from
/// [`TreeClassifierBuilder::finalize`](crate::builder::TreeClassifierBuilder::finalize).
#[derive(Debug, Clone)]
pub struct Classifier {
    classes: SlotMap<ClassId, FuzzyClass>,
    names: IndexMap<String, ClassId>,
    dependencies: Vec<Dependency>,
    layout: ClassifierLayout,
}

impl Classifier {
    pub(crate) fn new() -> Self {
        Self {
            classes: SlotMap::with_key(),
            names: IndexMap::new(),
            dependencies: vec![],
            layout: ClassifierLayout::default(),
        }
    }

    /// Inserts a class under its own name.
    ///
    /// Returns the class back if the name is already taken.
    pub(crate) fn add_class(&mut self, class: FuzzyClass) -> Result<ClassId, FuzzyClass> {
        use indexmap::map::Entry;

        match self.names.entry(class.name().to_owned()) {
            Entry::Occupied(_) => Err(class),

            Entry::Vacant(entry) => {
                let id = self.classes.insert(class);
                entry.insert(id);

                Ok(id)
            }
        }
    }

    pub(crate) fn add_dependencies(&mut self, dependencies: impl IntoIterator<Item = Dependency>) {
        self.dependencies.extend(dependencies);
    }

    /// Prepares the classifier for the inference engine.
    pub(crate) fn setup(&mut self) {
        self.layout = ClassifierLayout::compute(self);
    }

    pub fn get(&self, name: &str) -> Option<&FuzzyClass> {
        self.id_of(name).map(|id| &self.classes[id])
    }

    pub fn get_by_id(&self, id: ClassId) -> Option<&FuzzyClass> {
        self.classes.get(id)
    }

    pub fn id_of(&self, name: &str) -> Option<ClassId> {
        self.names.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterates over the classes in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (ClassId, &FuzzyClass)> + '_ {
        self.names.values().map(|&id| (id, &self.classes[id]))
    }

    pub fn class_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.names.keys().map(String::as_str)
    }

    /// Iterates over the classes that are not hidden, in registration order.
    pub fn visible_classes(&self) -> impl Iterator<Item = &FuzzyClass> + '_ {
        self.iter()
            .map(|(_, class)| class)
            .filter(|class| !class.is_hidden())
    }

    pub fn superclass_of(&self, id: ClassId) -> Option<&FuzzyClass> {
        self.classes
            .get(id)
            .and_then(FuzzyClass::superclass)
            .map(|parent| &self[parent])
    }

    /// Iterates over the superclass chain of `id`, nearest first, excluding the class itself.
    pub fn ancestors(&self, id: ClassId) -> impl Iterator<Item = ClassId> + '_ {
        successors(self.classes.get(id).and_then(FuzzyClass::superclass), |&parent| {
            self[parent].superclass()
        })
    }

    /// Finds the nearest class along the superclass chain of `id` (starting with the class
    /// itself) that declares the variable `name`.
    ///
    /// A redeclaration in a subclass shadows the inherited variable.
    pub fn resolve_variable(&self, id: ClassId, name: &str) -> Option<&FuzzyClass> {
        self.classes.get(id)?;

        successors(Some(id), |&id| self[id].superclass())
            .map(|id| &self[id])
            .find(|class| class.contains_var(name))
    }

    /// Looks up a constant along the superclass chain of `id`, nearest declaration first.
    pub fn resolve_constant(&self, id: ClassId, name: &str) -> Option<(&FuzzyClass, &str)> {
        self.classes.get(id)?;

        successors(Some(id), |&id| self[id].superclass())
            .map(|id| &self[id])
            .find_map(|class| class.constants().get(name).map(|value| (class, value)))
    }

    /// The dependency graph as a multiset of edges, in discovery order.
    ///
    /// The same edge appears once per relation that produced it.
    pub fn dependencies(&self) -> &[Dependency] {
        &self.dependencies
    }

    /// The edges whose owner is `name`.
    pub fn dependencies_of<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Dependency> {
        self.dependencies
            .iter()
            .filter(move |dependency| dependency.owner == name)
    }

    pub fn layout(&self) -> &ClassifierLayout {
        &self.layout
    }

    /// Classes ordered so that superclasses and relation targets come first, as far as
    /// dependency cycles allow.
    pub fn evaluation_order(&self) -> impl Iterator<Item = &FuzzyClass> + '_ {
        self.layout.order().iter().map(|&id| &self[id])
    }

    pub fn is_cyclic(&self, name: &str) -> bool {
        self.id_of(name)
            .map_or(false, |id| self.layout.is_cyclic(id))
    }
}

impl Index<ClassId> for Classifier {
    type Output = FuzzyClass;

    fn index(&self, id: ClassId) -> &FuzzyClass {
        &self.classes[id]
    }
}
