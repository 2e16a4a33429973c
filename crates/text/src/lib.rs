//! Platform independent chat messages.
//!
//! Messages are built as a tree of styled text, translation and parent nodes
//! and are only translated when rendered for a specific locale.

mod color;
mod component;
mod message;
pub mod render;

pub use color::{ColorCode, MessageColor, SECTION_SIGN};
pub use component::{ClickEvent, ClickEventType, TextColor, TextComponent};
pub use message::{ColorMode, Message, MessageNode, Style, Text, Translation};
pub use render::Translator;
