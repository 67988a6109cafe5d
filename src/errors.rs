use std::error::Error;
use std::fmt::{self, Display};

use tracing::{error, info, warn};

use crate::builder::BuildError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Fatal,
    Error,
    Warn,
    Info,
}

impl Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Fatal => "FATAL",
                Self::Error => "ERROR",
                Self::Warn => "WARN",
                Self::Info => "INFO",
            }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub level: Level,
    pub message: String,
    pub source: Option<BuildError>,
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.message)
    }
}

impl Error for Diagnostic {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source.as_ref().map(|err| err as &(dyn Error + 'static))
    }
}

#[must_use = "DiagnosticBuilder is useless unless emitted"]
pub struct DiagnosticBuilder<'a> {
    owner: &'a mut Diagnostics,
    level: Level,
    message: Option<String>,
    source: Option<BuildError>,
}

impl<'a> DiagnosticBuilder<'a> {
    fn new(owner: &'a mut Diagnostics, level: Level) -> Self {
        Self {
            owner,
            level,
            message: None,
            source: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());

        self
    }

    /// Attaches `error` as the source of the diagnostic, using its text as the message unless
    /// one is already set.
    pub fn with_error(mut self, error: BuildError) -> Self {
        self.message = self.message.or_else(|| Some(error.to_string()));
        self.source = Some(error);

        self
    }

    /// Emits the diagnostic.
    ///
    /// Panics if the message is not set.
    pub fn emit(self) {
        let diagnostic = Diagnostic {
            level: self.level,
            message: self.message.expect("message must be set"),
            source: self.source,
        };

        self.owner.emit(diagnostic);
    }
}

/// A sink for the problems found while building a classifier.
#[derive(Debug, Default)]
pub struct Diagnostics {
    diagnostics: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_level(&mut self, level: Level) -> DiagnosticBuilder<'_> {
        DiagnosticBuilder::new(self, level)
    }

    pub fn fatal(&mut self) -> DiagnosticBuilder<'_> {
        self.with_level(Level::Fatal)
    }

    pub fn error(&mut self) -> DiagnosticBuilder<'_> {
        self.with_level(Level::Error)
    }

    pub fn warn(&mut self) -> DiagnosticBuilder<'_> {
        self.with_level(Level::Warn)
    }

    pub fn info(&mut self) -> DiagnosticBuilder<'_> {
        self.with_level(Level::Info)
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|diagnostic| diagnostic.level <= Level::Error)
            .count()
    }

    /// The build errors attached to the emitted diagnostics, in emission order.
    pub fn errors(&self) -> impl Iterator<Item = &BuildError> {
        self.diagnostics
            .iter()
            .filter_map(|diagnostic| diagnostic.source.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    fn emit(&mut self, diagnostic: Diagnostic) {
        match diagnostic.level {
            Level::Fatal | Level::Error => error!(level = %diagnostic.level, "{}", diagnostic),
            Level::Warn => warn!("{}", diagnostic),
            Level::Info => info!("{}", diagnostic),
        }

        self.diagnostics.push(diagnostic);
    }
}
