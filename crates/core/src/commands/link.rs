use super::{CommandContext, CommandScheme, Invocation};
use async_trait::async_trait;
use mcsapi_api::LinkOutcome;
use mcsapi_text::{MessageColor, Text};

/// `/mclink`: hands out a link that connects the account on the website.
pub struct LinkCommand {
    debug: bool,
}

impl LinkCommand {
    pub fn new(debug: bool) -> LinkCommand {
        LinkCommand { debug }
    }
}

pub fn link_url(host: &str, token: &str) -> String {
    format!("{}/me/mc-link/{}", host, token)
}

#[async_trait]
impl CommandScheme for LinkCommand {
    fn name(&self) -> &'static str {
        "mclink"
    }

    async fn run(&self, ctx: &CommandContext, invocation: Invocation) -> bool {
        let player = invocation.player;
        ctx.reply(player, ctx.prefixed().then_translate("mc-link.requesting", Vec::new()));

        match ctx.client.request_link_token(player).await {
            Ok(LinkOutcome::Token(token)) => {
                let url = link_url(ctx.link_host(), &token);
                ctx.reply(
                    player,
                    ctx.prefixed().then_translate(
                        "mc-link.open",
                        vec![Text::new(url).color(MessageColor::Yellow).into()],
                    )
                    .color(MessageColor::Green),
                );
                true
            }
            Ok(LinkOutcome::AlreadyLinked) => {
                ctx.error(player, "mc-link.already-linked");
                false
            }
            Err(err) => {
                ctx.debug(self.debug, "Could not request a link token", &err);
                ctx.error(player, "mc-link.error");
                false
            }
        }
    }
}
