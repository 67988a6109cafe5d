use serde::Deserialize;

/// How the consistency sweep reacts to violations when reporting into
/// [`Diagnostics`](crate::errors::Diagnostics).
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ErrorPolicy {
    /// Stop at the first violation.
    #[default]
    FailFast,

    /// Check every constraint and report each violation.
    CollectAll,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct BuilderConfig {
    pub error_policy: ErrorPolicy,
}

impl BuilderConfig {
    /// Parses a configuration written in RON, e.g. `(error_policy: CollectAll)`.
    ///
    /// Missing fields take their default values.
    pub fn from_ron(input: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(input)
    }

    pub fn with_error_policy(self, error_policy: ErrorPolicy) -> Self {
        Self {
            error_policy,
            ..self
        }
    }
}
