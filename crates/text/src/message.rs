use crate::color::MessageColor;

/// How a node picks its color when rendered.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    /// Use the node's own color.
    #[default]
    Local,
    /// Use the resolved color of the nearest ancestor.
    Inherit,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    pub color: MessageColor,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
    pub obfuscated: bool,
    pub reset: bool,
}

impl Style {
    pub fn new(color: MessageColor) -> Style {
        Style {
            color,
            ..Default::default()
        }
    }

    pub fn is_plain(&self) -> bool {
        !self.bold
            && !self.italic
            && !self.underline
            && !self.strikethrough
            && !self.obfuscated
            && !self.reset
    }
}

macro_rules! impl_style_builder {
    ( $( $type:ty ),* ) => {
        $(
            impl $type {
                pub fn style(&self) -> &Style {
                    &self.style
                }

                pub fn color_mode(&self) -> ColorMode {
                    self.color_mode
                }

                pub fn color(mut self, color: MessageColor) -> Self {
                    self.style.color = color;
                    self
                }

                pub fn bold(mut self) -> Self {
                    self.style.bold = true;
                    self
                }

                pub fn italic(mut self) -> Self {
                    self.style.italic = true;
                    self
                }

                pub fn underline(mut self) -> Self {
                    self.style.underline = true;
                    self
                }

                pub fn strikethrough(mut self) -> Self {
                    self.style.strikethrough = true;
                    self
                }

                pub fn obfuscated(mut self) -> Self {
                    self.style.obfuscated = true;
                    self
                }

                pub fn reset(mut self) -> Self {
                    self.style.reset = true;
                    self
                }

                /// Take the color of the nearest ancestor when rendered.
                pub fn inherit(mut self) -> Self {
                    self.color_mode = ColorMode::Inherit;
                    self
                }

                pub fn local(mut self) -> Self {
                    self.color_mode = ColorMode::Local;
                    self
                }
            }
        )*
    };
}

/// A literal text leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
    style: Style,
    color_mode: ColorMode,
    text: String,
}

impl Text {
    pub fn new(text: impl Into<String>) -> Text {
        Text {
            style: Style::default(),
            color_mode: ColorMode::Local,
            text: text.into(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// A translation key resolved at render time. Substitutes are full message
/// nodes and are rendered before being handed to the translator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    style: Style,
    color_mode: ColorMode,
    key: String,
    substitutes: Vec<MessageNode>,
}

impl Translation {
    pub fn new(key: impl Into<String>, substitutes: Vec<MessageNode>) -> Translation {
        Translation {
            style: Style::default(),
            color_mode: ColorMode::Inherit,
            key: key.into(),
            substitutes,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn substitutes(&self) -> &[MessageNode] {
        &self.substitutes
    }
}

/// A parent node holding an ordered list of children.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Message {
    style: Style,
    color_mode: ColorMode,
    children: Vec<MessageNode>,
}

impl_style_builder!(Text, Translation, Message);

impl Message {
    pub fn blank() -> Message {
        Message::default()
    }

    /// A gray message starting with `"<prefix>> "` in `prefix_color`.
    pub fn prefixed(prefix: &str, prefix_color: MessageColor) -> Message {
        Message::blank()
            .then(Text::new(format!("{}> ", prefix)).color(prefix_color))
            .color(MessageColor::Gray)
    }

    /// A prefixed message whose own content is red.
    pub fn error(prefix: &str) -> Message {
        Message::prefixed(prefix, MessageColor::Blue).color(MessageColor::Red)
    }

    pub fn then(mut self, child: impl Into<MessageNode>) -> Message {
        self.children.push(child.into());
        self
    }

    pub fn then_text(self, text: impl Into<String>) -> Message {
        self.then(Text::new(text))
    }

    /// Append text that takes this message's color.
    pub fn then_inherit(self, text: impl Into<String>) -> Message {
        self.then(Text::new(text).inherit())
    }

    pub fn then_dot(self) -> Message {
        self.then_inherit(".")
    }

    pub fn then_translate(self, key: impl Into<String>, substitutes: Vec<MessageNode>) -> Message {
        self.then(Translation::new(key, substitutes))
    }

    pub fn children(&self) -> &[MessageNode] {
        &self.children
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageNode {
    Text(Text),
    Translation(Translation),
    Message(Message),
}

impl MessageNode {
    pub fn style(&self) -> &Style {
        match self {
            MessageNode::Text(node) => node.style(),
            MessageNode::Translation(node) => node.style(),
            MessageNode::Message(node) => node.style(),
        }
    }

    pub fn color_mode(&self) -> ColorMode {
        match self {
            MessageNode::Text(node) => node.color_mode(),
            MessageNode::Translation(node) => node.color_mode(),
            MessageNode::Message(node) => node.color_mode(),
        }
    }
}

impl From<Text> for MessageNode {
    fn from(value: Text) -> Self {
        MessageNode::Text(value)
    }
}

impl From<Translation> for MessageNode {
    fn from(value: Translation) -> Self {
        MessageNode::Translation(value)
    }
}

impl From<Message> for MessageNode {
    fn from(value: Message) -> Self {
        MessageNode::Message(value)
    }
}

impl From<&str> for MessageNode {
    fn from(value: &str) -> Self {
        MessageNode::Text(Text::new(value))
    }
}

impl From<String> for MessageNode {
    fn from(value: String) -> Self {
        MessageNode::Text(Text::new(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixed_puts_prefix_first() {
        let msg = Message::prefixed("Net", MessageColor::Green).then_text("hi");
        assert_eq!(msg.style().color, MessageColor::Gray);

        let children = msg.children();
        assert_eq!(children.len(), 2);
        match &children[0] {
            MessageNode::Text(prefix) => {
                assert_eq!(prefix.text(), "Net> ");
                assert_eq!(prefix.style().color, MessageColor::Green);
                assert_eq!(prefix.color_mode(), ColorMode::Local);
            }
            other => panic!("unexpected first child {:?}", other),
        }
    }

    #[test]
    fn error_is_red_with_blue_prefix() {
        let msg = Message::error("Net");
        assert_eq!(msg.style().color, MessageColor::Red);
        assert_eq!(msg.children()[0].style().color, MessageColor::Blue);
    }

    #[test]
    fn translation_defaults_to_inherit() {
        let msg = Message::blank().then_translate("a.b", vec![Text::new("x").into()]);
        let MessageNode::Translation(translation) = &msg.children()[0] else {
            panic!("expected translation child");
        };
        assert_eq!(translation.color_mode(), ColorMode::Inherit);
        assert_eq!(translation.key(), "a.b");
        assert_eq!(translation.substitutes().len(), 1);
    }

    #[test]
    fn style_builders_stack() {
        let text = Text::new("x")
            .color(MessageColor::Yellow)
            .bold()
            .underline()
            .inherit();
        assert!(text.style().bold);
        assert!(text.style().underline);
        assert!(!text.style().italic);
        assert_eq!(text.color_mode(), ColorMode::Inherit);
        assert!(!text.style().is_plain());
    }
}
