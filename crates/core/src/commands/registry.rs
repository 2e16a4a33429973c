use super::context::CommandContext;
use super::error::UsageError;
use super::{Argument, CommandScheme, Invocation};
use mcsapi_api::PlayerUuid;
use rustc_hash::FxHashMap;
use std::future::Future;
use std::pin::Pin;
use tracing::info;

pub type CommandFuture<'a> = Pin<Box<dyn Future<Output = bool> + Send + 'a>>;

#[derive(Default)]
pub struct CommandRegistry {
    commands: FxHashMap<&'static str, Box<dyn CommandScheme>>,
    aliases: FxHashMap<String, &'static str>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, command: impl CommandScheme + 'static) {
        self.commands.insert(command.name(), Box::new(command));
    }

    /// Makes `alias` run `command`. Returns false if `command` is not registered.
    pub fn add_alias(&mut self, alias: impl Into<String>, command: &str) -> bool {
        match self.commands.get_key_value(command) {
            Some((&name, _)) => {
                self.aliases.insert(alias.into(), name);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, name: &str) -> Option<&dyn CommandScheme> {
        let name = self.aliases.get(name).copied().unwrap_or(name);
        self.commands.get(name).map(Box::as_ref)
    }

    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.commands.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Validates the invocation and hands back the running command.
    ///
    /// Usage errors are returned here, before anything is sent to the
    /// service. The future resolves to whether the command succeeded.
    pub fn execute<'a>(
        &'a self,
        ctx: &'a CommandContext,
        name: &str,
        player: PlayerUuid,
        args: Vec<Argument>,
    ) -> Result<CommandFuture<'a>, UsageError> {
        let command = self
            .get(name)
            .ok_or_else(|| UsageError::UnknownCommand(name.to_string()))?;
        let invocation = Invocation::new(player, args);
        command.validate(&invocation)?;

        info!("{} issued command /{}", player, command.name());
        Ok(command.run(ctx, invocation))
    }
}
