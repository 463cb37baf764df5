use thiserror::Error;

/// Errors raised while setting up or feeding the proportion board.
///
/// Steady-state absence (no body selected yet, no reference base, a zero
/// denominator) is never reported here: those cases flow through the
/// derivation as absent fields. Only structural misuse and rejected user
/// input surface as a [`RatioError`].
#[derive(Error, Debug)]
pub enum RatioError {
    #[error("Constant registry already sealed: {0}")]
    RegistrySealed(String),

    #[error("Duplicate constant name in registry batch: {0}")]
    DuplicateConstant(String),

    #[error("Unknown constant: {0}")]
    UnknownConstant(String),

    #[error("Subject '{subject}' accepts at most {limit} observer(s)")]
    ObserverLimit { subject: &'static str, limit: usize },

    #[error("Subject '{0}' was set while its observers were still recomputing")]
    ReentrantNotification(&'static str),

    #[error("Invalid number input: {0:?}")]
    InvalidNumberInput(String),

    #[error("Invalid board configuration: {0}")]
    InvalidConfig(String),

    #[error("Unable to parse board configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

impl PartialEq for RatioError {
    fn eq(&self, other: &Self) -> bool {
        use RatioError::*;
        match (self, other) {
            (RegistrySealed(a), RegistrySealed(b)) => a == b,
            (DuplicateConstant(a), DuplicateConstant(b)) => a == b,
            (UnknownConstant(a), UnknownConstant(b)) => a == b,
            (
                ObserverLimit {
                    subject: s1,
                    limit: l1,
                },
                ObserverLimit {
                    subject: s2,
                    limit: l2,
                },
            ) => s1 == s2 && l1 == l2,
            (ReentrantNotification(a), ReentrantNotification(b)) => a == b,
            (InvalidNumberInput(a), InvalidNumberInput(b)) => a == b,
            (InvalidConfig(a), InvalidConfig(b)) => a == b,

            // toml errors are not comparable: same variant is enough
            (ConfigParse(_), ConfigParse(_)) => true,

            _ => false,
        }
    }
}
