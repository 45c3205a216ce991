//! Live Telegram adapter.
//!
//! Thin wrapper over the grammers MTProto client: resolve the channel,
//! walk its history newest-first, map raw messages into [`Post`] records.
//! Everything protocol-level stays inside this module; the rest of the
//! crate only sees the [`MessageSource`] contract.
//!
//! The connection lives exactly as long as one [`fetch_window`] call: the
//! client handle is created inside the call and dropped on every exit
//! path, which closes the underlying connection. The session file must
//! already be authorized — creating it is an interactive, one-time step
//! outside this tool's scope.
//!
//! [`fetch_window`]: MessageSource::fetch_window

use grammers_client::{Client, Config, InitParams};
use grammers_session::Session;
use grammers_tl_types as tl;
use tracing::debug;

use crate::config::AppConfig;
use crate::error::{ReportError, Result};
use crate::post::{Post, Reaction};
use crate::source::{ChannelRef, DateWindow, MessageSource};

/// Reactions kept per post, highest counts first.
const TOP_REACTIONS: usize = 3;

/// Symbol recorded for reactions that have no plain emoji form.
const FALLBACK_REACTION: &str = "👍";

/// [`MessageSource`] backed by the Telegram MTProto API.
#[derive(Debug, Clone)]
pub struct TelegramSource {
    config: AppConfig,
}

impl TelegramSource {
    /// Creates a source over the given configuration.
    ///
    /// Cheap: no connection is opened until a fetch runs.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    async fn connect(&self) -> Result<Client> {
        let (api_id, api_hash) = match (self.config.api_id, self.config.api_hash.as_ref()) {
            (Some(id), Some(hash)) if id != 0 && !hash.is_empty() => (id, hash.clone()),
            _ => {
                return Err(ReportError::source_unavailable(
                    "API credentials are not configured",
                ));
            }
        };

        let session = Session::load_file_or_create(&self.config.session_file)
            .map_err(|e| ReportError::source_unavailable(format!("cannot open session file: {e}")))?;

        let client = Client::connect(Config {
            session,
            api_id,
            api_hash,
            params: InitParams::default(),
        })
        .await
        .map_err(|e| {
            ReportError::source_unavailable(format!("could not connect to Telegram: {e}"))
        })?;

        let authorized = client.is_authorized().await.map_err(|e| {
            ReportError::source_unavailable(format!("authorization check failed: {e}"))
        })?;
        if !authorized {
            return Err(ReportError::source_unavailable(
                "the session is not authorized; log in once to create a valid session file",
            ));
        }

        Ok(client)
    }
}

impl MessageSource for TelegramSource {
    async fn fetch_window(&self, channel: &ChannelRef, window: DateWindow) -> Result<Vec<Post>> {
        let client = self.connect().await?;

        let chat = client
            .resolve_username(channel.name())
            .await
            .map_err(|e| {
                ReportError::channel_unavailable(channel.name(), format!("cannot resolve: {e}"))
            })?
            .ok_or_else(|| {
                ReportError::channel_unavailable(channel.name(), "username not found")
            })?;

        let mut posts = Vec::new();
        let mut iter = client.iter_messages(&chat);

        // The source yields messages in non-increasing date order, so the
        // walk stops at the first message older than the window.
        while let Some(message) = iter.next().await.map_err(|e| {
            ReportError::source_unavailable(format!("failed while fetching posts: {e}"))
        })? {
            let occurred_on = message.date().date_naive();
            if occurred_on < window.date_from {
                break;
            }
            if occurred_on > window.date_to {
                continue;
            }

            let text = message.text();
            if text.trim().is_empty() {
                continue;
            }

            let views = message.raw.views.and_then(|v| u32::try_from(v).ok());
            let reactions = message
                .raw
                .reactions
                .as_ref()
                .map(top_reactions)
                .unwrap_or_default();

            let mut post = Post::new(occurred_on, text).with_reactions(reactions);
            if let Some(views) = views {
                post = post.with_views(views);
            }
            posts.push(post);
        }

        debug!(
            channel = channel.name(),
            count = posts.len(),
            "fetched posts"
        );
        // Dropping the client here closes the connection; this is the
        // single release point for every path above as well.
        Ok(posts)
    }
}

/// Reduces a raw reaction set to the top entries by count.
///
/// Ties keep the order the source returned them in.
fn top_reactions(reactions: &tl::enums::MessageReactions) -> Vec<Reaction> {
    let tl::enums::MessageReactions::Reactions(inner) = reactions;

    let mut pairs: Vec<Reaction> = inner
        .results
        .iter()
        .map(|result| {
            let tl::enums::ReactionCount::Count(count) = result;
            let symbol = match &count.reaction {
                tl::enums::Reaction::Emoji(emoji) => emoji.emoticon.clone(),
                // Custom/paid reactions have no portable symbol.
                _ => FALLBACK_REACTION.to_string(),
            };
            Reaction::new(symbol, u32::try_from(count.count).unwrap_or(0))
        })
        .collect();

    pairs.sort_by(|a, b| b.count.cmp(&a.count));
    pairs.truncate(TOP_REACTIONS);
    pairs
}
