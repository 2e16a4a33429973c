//! Rendering of message trees.
//!
//! Every renderer is a pure function of the tree, the locale and the
//! translator, so a tree can be rendered for several players in different
//! languages without being rebuilt.

use crate::color::{ColorCode, SECTION_SIGN};
use crate::component::TextComponent;
use crate::message::{ColorMode, MessageNode, Style};
use std::sync::Arc;

/// Resolves translation keys for a locale.
pub trait Translator: Send + Sync {
    /// Translate `key` for `locale`, substituting the already rendered
    /// `substitutes` positionally.
    fn translate(&self, locale: &str, key: &str, substitutes: &[String]) -> String;

    fn has_translation(&self, locale: &str, key: &str) -> bool;
}

impl<T: Translator + ?Sized> Translator for &T {
    fn translate(&self, locale: &str, key: &str, substitutes: &[String]) -> String {
        (**self).translate(locale, key, substitutes)
    }

    fn has_translation(&self, locale: &str, key: &str) -> bool {
        (**self).has_translation(locale, key)
    }
}

impl<T: Translator + ?Sized> Translator for Arc<T> {
    fn translate(&self, locale: &str, key: &str, substitutes: &[String]) -> String {
        (**self).translate(locale, key, substitutes)
    }

    fn has_translation(&self, locale: &str, key: &str) -> bool {
        (**self).has_translation(locale, key)
    }
}

/// The style a node renders with, given the resolved style of its parent.
///
/// An inheriting node takes the parent's color and adds its own formatting
/// flags to the parent's. `reset` is never inherited.
pub fn resolve_style(node: &MessageNode, parent: Option<&Style>) -> Style {
    let own = *node.style();
    match (node.color_mode(), parent) {
        (ColorMode::Inherit, Some(parent)) => Style {
            color: parent.color,
            bold: own.bold || parent.bold,
            italic: own.italic || parent.italic,
            underline: own.underline || parent.underline,
            strikethrough: own.strikethrough || parent.strikethrough,
            obfuscated: own.obfuscated || parent.obfuscated,
            reset: own.reset,
        },
        _ => own,
    }
}

/// Renders the tree to unformatted text.
pub fn render_plain(node: &MessageNode, locale: &str, translator: &dyn Translator) -> String {
    let mut out = String::new();
    plain_into(node, locale, translator, &mut out);
    out
}

fn plain_into(node: &MessageNode, locale: &str, translator: &dyn Translator, out: &mut String) {
    match node {
        MessageNode::Text(text) => out.push_str(text.text()),
        MessageNode::Translation(translation) => {
            let substitutes: Vec<String> = translation
                .substitutes()
                .iter()
                .map(|sub| render_plain(sub, locale, translator))
                .collect();
            out.push_str(&translator.translate(locale, translation.key(), &substitutes));
        }
        MessageNode::Message(message) => {
            for child in message.children() {
                plain_into(child, locale, translator, out);
            }
        }
    }
}

fn legacy_codes(style: &Style) -> String {
    let mut codes = String::new();
    if style.reset {
        codes.push(SECTION_SIGN);
        codes.push('r');
    }
    codes += &style.color.legacy();
    if style.is_plain() {
        return codes;
    }
    for (enabled, code) in [
        (style.obfuscated, 'k'),
        (style.bold, 'l'),
        (style.strikethrough, 'm'),
        (style.underline, 'n'),
        (style.italic, 'o'),
    ] {
        if enabled {
            codes.push(SECTION_SIGN);
            codes.push(code);
        }
    }
    codes
}

/// Renders the tree to a `§`-coded string carrying resolved colors and
/// styles of every node, substitutes included.
pub fn render_legacy(node: &MessageNode, locale: &str, translator: &dyn Translator) -> String {
    let mut out = String::new();
    legacy_into(node, None, locale, translator, &mut out);
    out
}

fn legacy_into(
    node: &MessageNode,
    parent: Option<&Style>,
    locale: &str,
    translator: &dyn Translator,
    out: &mut String,
) {
    let style = resolve_style(node, parent);
    match node {
        MessageNode::Text(text) => {
            *out += &legacy_codes(&style);
            out.push_str(text.text());
        }
        MessageNode::Translation(translation) => {
            let codes = legacy_codes(&style);
            let substitutes: Vec<String> = translation
                .substitutes()
                .iter()
                .map(|sub| {
                    let mut rendered = String::new();
                    legacy_into(sub, Some(&style), locale, translator, &mut rendered);
                    // Restore our own formatting after the substitute.
                    rendered += &codes;
                    rendered
                })
                .collect();
            *out += &codes;
            *out += &translator.translate(locale, translation.key(), &substitutes);
        }
        MessageNode::Message(message) => {
            for child in message.children() {
                legacy_into(child, Some(&style), locale, translator, out);
            }
        }
    }
}

/// Removes `§` formatting codes. Pairs that are not a known code, and
/// incomplete `§#` colors, are kept as text the same way
/// [`TextComponent::from_legacy_text`] keeps them.
pub fn strip_codes(legacy: &str) -> String {
    let mut out = String::with_capacity(legacy.len());
    let mut chars = legacy.chars();
    while let Some(c) = chars.next() {
        if c != SECTION_SIGN {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('#') => {
                let mut hex = String::new();
                for _ in 0..6 {
                    match chars.next() {
                        Some(h) if h.is_ascii_hexdigit() => hex.push(h),
                        Some(h) => {
                            hex.push(h);
                            break;
                        }
                        None => break,
                    }
                }
                if hex.len() != 6 || !hex.chars().all(|h| h.is_ascii_hexdigit()) {
                    out.push(c);
                    out.push('#');
                    out += &hex;
                }
            }
            Some(code) if ColorCode::parse(code).is_some() => {}
            Some(code) => {
                out.push(c);
                out.push(code);
            }
            None => out.push(c),
        }
    }
    out
}

/// Renders the tree to a JSON chat component.
pub fn render_component(
    node: &MessageNode,
    locale: &str,
    translator: &dyn Translator,
) -> TextComponent {
    TextComponent {
        extra: TextComponent::from_legacy_text(&render_legacy(node, locale, translator)),
        ..Default::default()
    }
}
