mod context;
mod error;
mod language;
mod link;
mod registry;
mod stats;
mod target;

pub use context::{CommandContext, DEFAULT_PREFIX};
pub use error::UsageError;
pub use language::LanguageCommand;
pub use link::LinkCommand;
pub use registry::{CommandFuture, CommandRegistry};
pub use stats::StatsCommand;
pub use target::{TargetError, TargetQuery, is_uuid_shaped, resolve_target};

use async_trait::async_trait;
use mcsapi_api::PlayerUuid;

/// A parsed command argument. Hosts that resolve player selectors pass
/// [`Argument::Player`], everything else arrives as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Argument {
    Text(String),
    Player(PlayerUuid),
}

impl Argument {
    pub fn kind(&self) -> &'static str {
        match self {
            Argument::Text(_) => "text",
            Argument::Player(_) => "player",
        }
    }
}

impl From<&str> for Argument {
    fn from(value: &str) -> Self {
        Argument::Text(value.to_string())
    }
}

impl From<String> for Argument {
    fn from(value: String) -> Self {
        Argument::Text(value)
    }
}

impl From<PlayerUuid> for Argument {
    fn from(value: PlayerUuid) -> Self {
        Argument::Player(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub player: PlayerUuid,
    pub args: Vec<Argument>,
}

impl Invocation {
    pub fn new(player: PlayerUuid, args: Vec<Argument>) -> Invocation {
        Invocation { player, args }
    }

    pub fn first(&self) -> Option<&Argument> {
        self.args.first()
    }
}

/// Fails with [`UsageError::TooManyArguments`] when more than `max`
/// arguments were given.
pub fn check_arity(command: &'static str, invocation: &Invocation, max: usize) -> Result<(), UsageError> {
    let given = invocation.args.len();
    if given > max {
        return Err(UsageError::TooManyArguments { command, max, given });
    }
    Ok(())
}

#[async_trait]
pub trait CommandScheme: Send + Sync {
    fn name(&self) -> &'static str;

    /// Checked synchronously before [`CommandScheme::run`] is called.
    fn validate(&self, invocation: &Invocation) -> Result<(), UsageError> {
        check_arity(self.name(), invocation, 1)
    }

    /// Runs the command. Every failure path ends with exactly one error
    /// message to the invoker, and the result tells whether it succeeded.
    async fn run(&self, ctx: &CommandContext, invocation: Invocation) -> bool;
}
