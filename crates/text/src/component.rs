use crate::color::{ColorCode, MessageColor, SECTION_SIGN};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static URL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new("(https?://[a-zA-Z0-9\\-.]+\\.[a-zA-Z]{2,}(:[0-9]+)?(/[a-zA-Z0-9\\-._~%/#?+=&]*)?)")
        .unwrap()
});

fn is_valid_hex(ch: char) -> bool {
    ch.is_ascii_hexdigit()
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum TextColor {
    Hex(String),
    ColorCode(ColorCode),
}

impl From<MessageColor> for TextColor {
    fn from(color: MessageColor) -> Self {
        match color.color_code() {
            Some(code) => TextColor::ColorCode(code),
            None => {
                let (r, g, b) = color.rgb();
                TextColor::Hex(format!("#{:02x}{:02x}{:02x}", r, g, b))
            }
        }
    }
}

impl TextColor {
    pub fn rgb(&self) -> Option<(u8, u8, u8)> {
        match self {
            TextColor::ColorCode(code) => MessageColor::from_code(*code).map(MessageColor::rgb),
            TextColor::Hex(hex) => {
                let hex = hex.strip_prefix('#')?;
                if hex.len() != 6 {
                    return None;
                }
                let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
                Some((channel(0)?, channel(2)?, channel(4)?))
            }
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ClickEventType {
    OpenUrl,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ClickEvent {
    pub action: ClickEventType,
    pub value: String,
}

/// This is only used for `TextComponent` serialize
#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_false(field: &bool) -> bool {
    !*field
}

/// A chat component in the JSON shape Minecraft clients accept.
#[derive(Serialize, Default, Debug, Clone, PartialEq, Eq)]
pub struct TextComponent {
    pub text: String,
    #[serde(skip_serializing_if = "is_false")]
    pub bold: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub italic: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub underlined: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub strikethrough: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub obfuscated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<TextColor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(rename = "clickEvent")]
    pub click_event: Option<ClickEvent>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extra: Vec<TextComponent>,
}

impl TextComponent {
    /// Splits a `§`-coded string into flat components. URLs found in the text
    /// become separate components with an `open_url` click event.
    pub fn from_legacy_text(message: &str) -> Vec<TextComponent> {
        let mut components = Vec::new();

        let mut cur_component: TextComponent = Default::default();

        let mut chars = message.chars();
        'main_loop: while let Some(c) = chars.next() {
            if c != SECTION_SIGN {
                cur_component.text.push(c);
                continue;
            }
            let Some(code) = chars.next() else {
                cur_component.text.push(c);
                break;
            };
            if code == '#' {
                let mut hex = String::from(code);
                for _ in 0..6 {
                    match chars.next() {
                        Some(h) if is_valid_hex(h) => hex.push(h),
                        Some(h) => {
                            cur_component.text.push(c);
                            cur_component.text += &hex;
                            cur_component.text.push(h);
                            continue 'main_loop;
                        }
                        None => {
                            cur_component.text.push(c);
                            cur_component.text += &hex;
                            continue 'main_loop;
                        }
                    }
                }
                flush(&mut components, &cur_component);
                cur_component = TextComponent {
                    color: Some(TextColor::Hex(hex.to_ascii_lowercase())),
                    ..Default::default()
                };
                continue;
            }
            let Some(color) = ColorCode::parse(code) else {
                cur_component.text.push(c);
                cur_component.text.push(code);
                continue;
            };
            if color.is_formatting() && color != ColorCode::Reset {
                if !cur_component.text.is_empty() {
                    flush(&mut components, &cur_component);
                    cur_component.text.clear();
                }
                match color {
                    ColorCode::Bold => cur_component.bold = true,
                    ColorCode::Italic => cur_component.italic = true,
                    ColorCode::Underline => cur_component.underlined = true,
                    ColorCode::Strikethrough => cur_component.strikethrough = true,
                    _ => cur_component.obfuscated = true,
                }
                continue;
            }
            flush(&mut components, &cur_component);
            cur_component = Default::default();
            if color != ColorCode::Reset {
                cur_component.color = Some(TextColor::ColorCode(color));
            }
        }
        flush(&mut components, &cur_component);

        // Find urls and add click action
        let mut new_components = Vec::with_capacity(components.len());
        for component in components {
            let mut last = 0;
            let text = &component.text;

            for match_ in URL_REGEX.find_iter(text) {
                let index = match_.start();
                let matched = match_.as_str();
                if last != index {
                    let mut new = component.clone();
                    new.text = String::from(&text[last..index]);
                    new_components.push(new);
                }
                let mut new = component.clone();
                new.text = matched.to_string();
                new.click_event = Some(ClickEvent {
                    action: ClickEventType::OpenUrl,
                    value: matched.to_string(),
                });
                new_components.push(new);
                last = index + matched.len();
            }
            if last < text.len() {
                let mut new = component.clone();
                new.text = String::from(&text[last..]);
                new_components.push(new);
            }
        }

        new_components
    }

    /// All text of this component and its extras, without styling.
    pub fn plain_text(&self) -> String {
        let mut out = self.text.clone();
        for extra in &self.extra {
            out += &extra.plain_text();
        }
        out
    }
}

fn flush(components: &mut Vec<TextComponent>, component: &TextComponent) {
    if !component.text.is_empty() {
        components.push(component.clone());
    }
}

impl<S> From<S> for TextComponent
where
    S: Into<String>,
{
    fn from(value: S) -> Self {
        TextComponent {
            text: value.into(),
            ..Default::default()
        }
    }
}
