use tracing::{debug, trace, trace_span};

use crate::classifier::{
    Classifier, ComplexRelation, Constraint, Dependency, FuzzyClass, InverseRelation,
    SimpleRelation,
};
use crate::config::ErrorPolicy;

use super::BuildError;

/// The global pass over a fully registered classifier.
///
/// This is the only place where names are resolved across classes.
pub(super) struct ConsistencyChecker<'a> {
    classifier: &'a Classifier,
    dependencies: Vec<Dependency>,
}

impl<'a> ConsistencyChecker<'a> {
    pub fn new(classifier: &'a Classifier) -> Self {
        Self {
            classifier,
            dependencies: vec![],
        }
    }

    /// Checks every constraint of every class in registration order.
    ///
    /// Violations are passed to `report`. Under [`ErrorPolicy::FailFast`] the sweep stops after
    /// the first one. Returns the dependency edges of the relations that passed.
    pub fn check(
        mut self,
        policy: ErrorPolicy,
        mut report: impl FnMut(BuildError),
    ) -> Vec<Dependency> {
        debug!(classes = self.classifier.len(), ?policy, "running the consistency sweep");

        let classifier = self.classifier;

        'sweep: for (_, class) in classifier.iter() {
            let span = trace_span!("check_class", class = class.name());
            let _span = span.enter();

            for constraint in class.constraints() {
                if let Err(err) = self.check_constraint(class, constraint) {
                    report(err);

                    if policy == ErrorPolicy::FailFast {
                        break 'sweep;
                    }
                }
            }
        }

        debug!(edges = self.dependencies.len(), "consistency sweep finished");

        self.dependencies
    }

    fn check_constraint(
        &mut self,
        class: &FuzzyClass,
        constraint: &Constraint,
    ) -> Result<(), BuildError> {
        trace!(kind = %constraint.kind(), %constraint, "checking a constraint");

        for variable in constraint.own_variables() {
            self.check_variable(class, variable, class)?;
        }

        match constraint {
            Constraint::SimpleFeature(_) => Ok(()),

            Constraint::SimpleRelation(SimpleRelation { target, .. })
            | Constraint::ComplexRelation(ComplexRelation { target, .. })
            | Constraint::InverseRelation(InverseRelation { target, .. }) => {
                self.check_relation(class, target, constraint.target_variables())
            }
        }
    }

    fn check_relation(
        &mut self,
        class: &FuzzyClass,
        target_name: &str,
        target_variables: &[String],
    ) -> Result<(), BuildError> {
        let classifier = self.classifier;

        let Some(target) = classifier.get(target_name) else {
            return Err(BuildError::UndeclaredClass {
                class: class.name().to_owned(),
                target: target_name.to_owned(),
            });
        };

        for variable in target_variables {
            self.check_variable(target, variable, class)?;
        }

        trace!(owner = class.name(), target = target.name(), "adding a dependency");
        self.dependencies
            .push(Dependency::new(class.name(), target.name()));

        Ok(())
    }

    fn check_variable(
        &self,
        scope: &FuzzyClass,
        variable: &str,
        referenced_from: &FuzzyClass,
    ) -> Result<(), BuildError> {
        match scope.contains_var(variable) {
            true => Ok(()),

            false => Err(BuildError::UndeclaredVariable {
                class: scope.name().to_owned(),
                variable: variable.to_owned(),
                referenced_from: referenced_from.name().to_owned(),
            }),
        }
    }
}
