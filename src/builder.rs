mod consistency;
mod error;

use tracing::{debug, instrument};

use crate::classifier::{
    ClassId, Classifier, ConstantMap, ConstraintList, Dependency, FuzzyClass, VariableSet,
};
use crate::config::{BuilderConfig, ErrorPolicy};
use crate::errors::Diagnostics;

use self::consistency::ConsistencyChecker;

pub use self::error::{BuildError, SymbolKind};

/// Assembles a [`Classifier`] from the construction calls issued by the grammar, in file order.
///
/// Local checks (duplicate symbols, unknown superclasses) happen as the calls come in.
/// Everything that needs to look at other classes is deferred to [`finalize`](Self::finalize),
/// so relations may refer to classes declared further down, while superclasses may not.
#[derive(Debug)]
pub struct TreeClassifierBuilder {
    config: BuilderConfig,
    classifier: Classifier,
}

impl Default for TreeClassifierBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeClassifierBuilder {
    pub fn new() -> Self {
        Self::with_config(BuilderConfig::default())
    }

    pub fn with_config(config: BuilderConfig) -> Self {
        Self {
            config,
            classifier: Classifier::new(),
        }
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    /// Whether a class with this name has been registered so far.
    pub fn contains_class(&self, name: &str) -> bool {
        self.classifier.contains(name)
    }

    pub fn class_count(&self) -> usize {
        self.classifier.len()
    }

    /// Registers a completed class declaration.
    ///
    /// The superclass, if any, must already be registered. An empty superclass name is treated
    /// as no superclass.
    pub fn register_class(
        &mut self,
        name: impl Into<String>,
        superclass: Option<&str>,
        variables: VariableSet,
        constants: ConstantMap,
        constraints: ConstraintList,
        hidden: bool,
    ) -> Result<ClassId, BuildError> {
        let name = name.into();
        let superclass = match superclass.filter(|superclass| !superclass.is_empty()) {
            None => None,

            Some(superclass) => match self.classifier.id_of(superclass) {
                Some(id) => Some(id),

                None => {
                    return Err(BuildError::UndeclaredSuperclass {
                        class: name,
                        superclass: superclass.to_owned(),
                    })
                }
            },
        };

        debug!(
            class = %name,
            superclass = ?superclass.map(|id| self.classifier[id].name()),
            variables = variables.len(),
            constants = constants.len(),
            constraints = constraints.len(),
            hidden,
            "registering a class"
        );

        let class = FuzzyClass::new(name, superclass, variables, constants, constraints, hidden);

        self.classifier
            .add_class(class)
            .map_err(|class| BuildError::DuplicateClass {
                class: class.name().to_owned(),
            })
    }

    /// Validates every class against the whole registry and returns the finished classifier.
    ///
    /// Fails with the first violation found.
    #[instrument(level = "debug", skip_all)]
    pub fn finalize(self) -> Result<Classifier, BuildError> {
        let mut first_error = None;
        let dependencies = ConsistencyChecker::new(&self.classifier).check(
            ErrorPolicy::FailFast,
            |err| {
                first_error.get_or_insert(err);
            },
        );

        match first_error {
            Some(err) => Err(err),
            None => Ok(self.complete(dependencies)),
        }
    }

    /// Like [`finalize`](Self::finalize), but reports violations to `diagnostics` following the
    /// configured [`ErrorPolicy`].
    ///
    /// Returns `None` if any violation has been reported.
    #[instrument(level = "debug", skip_all)]
    pub fn finalize_with_diagnostics(self, diagnostics: &mut Diagnostics) -> Option<Classifier> {
        let mut failed = false;
        let dependencies = ConsistencyChecker::new(&self.classifier).check(
            self.config.error_policy,
            |err| {
                failed = true;
                diagnostics.error().with_error(err).emit();
            },
        );

        (!failed).then(|| self.complete(dependencies))
    }

    fn complete(self, dependencies: Vec<Dependency>) -> Classifier {
        let mut classifier = self.classifier;
        classifier.add_dependencies(dependencies);
        classifier.setup();

        debug!(
            classes = classifier.len(),
            dependencies = classifier.dependencies().len(),
            "the classifier is ready"
        );

        classifier
    }
}
