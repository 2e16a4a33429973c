use mcsapi_api::{PlayerStats, PlayerUuid};
use mcsapi_core::{MessageSender, PlayerTranslations, StatsDisplay};
use mcsapi_text::{Message, MessageNode, TextColor, TextComponent};
use owo_colors::{OwoColorize, Style};
use std::fmt::Write;

/// Prints messages meant for a player to the terminal.
pub struct Console {
    translations: PlayerTranslations,
    locale: Option<String>,
}

impl Console {
    pub fn new(translations: PlayerTranslations, locale: Option<String>) -> Console {
        Console {
            translations,
            locale,
        }
    }

    fn render(&self, player: PlayerUuid, message: Message) -> String {
        let node = MessageNode::Message(message);
        let legacy = self
            .translations
            .render_for(player, self.locale.as_deref(), &node);
        to_ansi(&TextComponent::from_legacy_text(&legacy))
    }
}

pub fn to_ansi(components: &[TextComponent]) -> String {
    let mut out = String::new();
    for component in components {
        let mut style = Style::new();
        if let Some((r, g, b)) = component.color.as_ref().and_then(TextColor::rgb) {
            style = style.truecolor(r, g, b);
        }
        if component.bold {
            style = style.bold();
        }
        if component.italic {
            style = style.italic();
        }
        if component.underlined || component.click_event.is_some() {
            style = style.underline();
        }
        if component.strikethrough {
            style = style.strikethrough();
        }
        let _ = write!(out, "{}", component.text.style(style));
    }
    out
}

impl MessageSender for Console {
    fn send(&self, player: PlayerUuid, message: Message) {
        anstream::println!("{}", self.render(player, message));
    }
}

impl StatsDisplay for Console {
    fn open_stats(&self, invoker: PlayerUuid, _target: PlayerUuid, title: Message, stats: PlayerStats) {
        anstream::println!("{}", self.render(invoker, title).bold());
        let locale = self.locale.as_deref();
        for (category, values) in &stats.stats {
            let heading = self.translations.translate_for(
                invoker,
                locale,
                &format!("stat.{}", category),
                &[],
            );
            anstream::println!("{}", heading.yellow());
            for (key, value) in values {
                let name = self.translations.translate_for(
                    invoker,
                    locale,
                    &format!("stat.{}.{}", category, key),
                    &[],
                );
                anstream::println!("  {}: {}", name, value);
            }
        }
    }
}
