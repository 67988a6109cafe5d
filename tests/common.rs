#![allow(dead_code)]

use std::sync::Once;

use serde::Deserialize;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::prelude::*;

use treeclass::{
    BuildError, Classifier, ConstantMap, ConstraintKind, ConstraintList, TreeClassifierBuilder,
    VariableSet,
};

const LOG_ENV_NAME: &str = "TREECLASS_LOG";

pub fn init_tracing() {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let filter = EnvFilter::builder()
            .with_default_directive(LevelFilter::WARN.into())
            .with_env_var(LOG_ENV_NAME)
            .from_env_lossy();
        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer().with_test_writer())
            .with(filter)
            .init();
    });
}

/// A class declaration as the grammar would deliver it, piece by piece.
#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct ClassDecl {
    pub name: String,
    #[serde(default)]
    pub extends: Option<String>,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub variables: Vec<String>,
    #[serde(default)]
    pub constants: Vec<(String, String)>,
    #[serde(default)]
    pub constraints: Vec<(ConstraintKind, Vec<String>)>,
}

impl ClassDecl {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            extends: None,
            hidden: false,
            variables: vec![],
            constants: vec![],
            constraints: vec![],
        }
    }

    pub fn extends(mut self, superclass: &str) -> Self {
        self.extends = Some(superclass.to_owned());

        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;

        self
    }

    pub fn var(mut self, name: &str) -> Self {
        self.variables.push(name.to_owned());

        self
    }

    pub fn constant(mut self, name: &str, value: &str) -> Self {
        self.constants.push((name.to_owned(), value.to_owned()));

        self
    }

    pub fn rule(mut self, kind: ConstraintKind, tokens: &[&str]) -> Self {
        self.constraints
            .push((kind, tokens.iter().map(|&token| token.to_owned()).collect()));

        self
    }

    /// Issues the construction calls for this class in file order.
    pub fn register(self, builder: &mut TreeClassifierBuilder) -> Result<(), BuildError> {
        let mut variables = VariableSet::new();

        for variable in self.variables {
            variables.declare(&self.name, variable)?;
        }

        let mut constants = ConstantMap::new();

        for (name, value) in self.constants {
            constants.declare(&self.name, name, value)?;
        }

        let mut constraints = ConstraintList::new();

        for (kind, tokens) in self.constraints {
            constraints.assemble(kind, tokens)?;
        }

        builder.register_class(
            self.name,
            self.extends.as_deref(),
            variables,
            constants,
            constraints,
            self.hidden,
        )?;

        Ok(())
    }
}

pub fn register_all(
    builder: &mut TreeClassifierBuilder,
    decls: impl IntoIterator<Item = ClassDecl>,
) -> Result<(), BuildError> {
    for decl in decls {
        decl.register(builder)?;
    }

    Ok(())
}

pub fn build(decls: impl IntoIterator<Item = ClassDecl>) -> Result<Classifier, BuildError> {
    init_tracing();

    let mut builder = TreeClassifierBuilder::new();
    register_all(&mut builder, decls)?;

    builder.finalize()
}

/// Runs a RON script: a list of class declarations in file order.
pub fn run_script(script: &str) -> Result<Classifier, BuildError> {
    let decls: Vec<ClassDecl> = ron::from_str(script).expect("the script must be valid RON");

    build(decls)
}
