use thiserror::Error;

/// Invocation problems found before a command starts running.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsageError {
    #[error("/{command} takes at most {max} argument(s), got {given}")]
    TooManyArguments {
        command: &'static str,
        max: usize,
        given: usize,
    },
    #[error("/{command} does not accept a {found} argument")]
    UnsupportedArgument {
        command: &'static str,
        found: &'static str,
    },
    #[error("Unknown command: {0}")]
    UnknownCommand(String),
}
