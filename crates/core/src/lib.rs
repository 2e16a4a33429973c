#![deny(rust_2018_idioms)]

pub mod bridge;
pub mod cache;
pub mod commands;
pub mod config;
pub mod economy;
pub mod messaging;
pub mod resolver;
pub mod translation;

pub use bridge::ServiceBridge;
pub use cache::IdentityCache;
pub use config::ServiceConfig;
pub use messaging::{DebugSink, MessageSender, StatsDisplay, TracingDebugSink};
pub use resolver::{MojangResolver, NameResolver, ResolveError};
pub use translation::{PlayerTranslations, Translations};
