use crate::cache::IdentityCache;
use crate::messaging::{DebugSink, MessageSender, TracingDebugSink};
use crate::resolver::NameResolver;
use mcsapi_api::{PlayerUuid, RemoteService};
use mcsapi_text::{Message, MessageColor};
use std::error::Error;
use std::sync::Arc;

pub const DEFAULT_PREFIX: &str = "LCLPNetwork";

/// Everything a running command may touch. Cloning is cheap.
#[derive(Clone)]
pub struct CommandContext {
    pub client: Arc<dyn RemoteService>,
    pub cache: Arc<IdentityCache>,
    pub resolver: Arc<dyn NameResolver>,
    pub sender: Arc<dyn MessageSender>,
    pub debug_sink: Arc<dyn DebugSink>,
    prefix: String,
    link_host: String,
}

impl CommandContext {
    pub fn new(
        client: Arc<dyn RemoteService>,
        cache: Arc<IdentityCache>,
        resolver: Arc<dyn NameResolver>,
        sender: Arc<dyn MessageSender>,
    ) -> CommandContext {
        CommandContext {
            client,
            cache,
            resolver,
            sender,
            debug_sink: Arc::new(TracingDebugSink),
            prefix: DEFAULT_PREFIX.to_string(),
            link_host: String::new(),
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Base URL the link page lives under.
    pub fn with_link_host(mut self, host: &str) -> Self {
        self.link_host = host.trim_end_matches('/').to_string();
        self
    }

    pub fn with_debug_sink(mut self, sink: Arc<dyn DebugSink>) -> Self {
        self.debug_sink = sink;
        self
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn link_host(&self) -> &str {
        &self.link_host
    }

    pub fn prefixed(&self) -> Message {
        Message::prefixed(&self.prefix, MessageColor::Blue)
    }

    pub fn error_message(&self) -> Message {
        Message::error(&self.prefix)
    }

    pub fn reply(&self, player: PlayerUuid, message: Message) {
        self.sender.send(player, message);
    }

    /// Sends a prefixed, red translation.
    pub fn error(&self, player: PlayerUuid, key: &str) {
        self.reply(player, self.error_message().then_translate(key, Vec::new()));
    }

    pub fn debug(&self, enabled: bool, context: &str, err: &dyn Error) {
        if enabled {
            self.debug_sink.log_error(context, err);
        }
    }
}
