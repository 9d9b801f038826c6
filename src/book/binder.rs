//! Fluent builder combining a [`Paginator`] with booklet options.
//!
//! Call sites come in two styles: chained `with_*` setters, or filling the
//! configuration structs directly and handing them over. Both produce the
//! same value types, so the two styles are interchangeable and comparably
//! testable.

use crate::book::buttons::Button;
use crate::book::page::Page;
use crate::book::transport::{ChannelId, ReactionFeed, Transport, UserId};
use crate::book::{Booklet, BookletOptions, BookletState, Numbering};
use crate::errors::Result;
use crate::pagination::{Fragment, PaginationConfig, Paginator};
use std::time::Duration;

/// Accumulates text content and configuration, then binds them into a
/// ready-to-start [`Booklet`].
#[derive(Debug, Clone)]
pub struct BookBinder {
    config: PaginationConfig,
    fragments: Vec<Fragment>,
    options: BookletOptions,
    buttons: Option<Vec<Button>>,
}

impl BookBinder {
    /// Starts a binder with default pagination constraints and booklet
    /// options.
    #[must_use]
    pub fn new(channel: ChannelId, requester: UserId, bot_user: UserId) -> Self {
        Self {
            config: PaginationConfig::default(),
            fragments: Vec::new(),
            options: BookletOptions::new(channel, requester, bot_user),
            buttons: None,
        }
    }

    /// Appends a text fragment. Empty fragments are no-ops.
    #[must_use]
    pub fn add(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        if !text.is_empty() {
            self.fragments.push(Fragment::text(text));
        }
        self
    }

    /// Appends a text fragment with a trailing newline.
    #[must_use]
    pub fn add_line(mut self, text: impl Into<String>) -> Self {
        let mut text = text.into();
        text.push('\n');
        self.fragments.push(Fragment::text(text));
        self
    }

    /// Appends a locked (never word-split) fragment. Empty fragments are
    /// no-ops.
    #[must_use]
    pub fn add_locked(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        if !text.is_empty() {
            self.fragments.push(Fragment::locked(text));
        }
        self
    }

    /// Forces a page break.
    #[must_use]
    pub fn add_break(mut self) -> Self {
        self.fragments.push(Fragment::Break);
        self
    }

    /// Sets the per-page character budget.
    #[must_use]
    pub fn with_max_characters(mut self, max_characters: usize) -> Self {
        self.config.max_characters = max_characters;
        self
    }

    /// Sets or clears the per-page line budget.
    #[must_use]
    pub fn with_max_lines(mut self, max_lines: Option<usize>) -> Self {
        self.config.max_lines = max_lines;
        self
    }

    /// Sets the page prefix decoration.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.prefix = prefix.into();
        self
    }

    /// Sets the page suffix decoration.
    #[must_use]
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.config.suffix = suffix.into();
        self
    }

    /// Sets or clears the inactivity timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.options.timeout = timeout;
        self
    }

    /// Restricts interaction to the requester, or opens it to everyone.
    #[must_use]
    pub fn with_owner_only(mut self, owner_only: bool) -> Self {
        self.options.owner_only = owner_only;
        self
    }

    /// Sets the page index the booklet opens on.
    #[must_use]
    pub fn with_start_index(mut self, start_index: usize) -> Self {
        self.options.start_index = start_index;
        self
    }

    /// Replaces the page-number annotation formatter.
    #[must_use]
    pub fn with_numbering(mut self, numbering: Numbering) -> Self {
        self.options.numbering = numbering;
        self
    }

    /// Replaces the default navigation button set.
    #[must_use]
    pub fn with_buttons(mut self, buttons: Vec<Button>) -> Self {
        self.buttons = Some(buttons);
        self
    }

    /// The pagination constraints as configured so far.
    #[must_use]
    pub fn pagination_config(&self) -> &PaginationConfig {
        &self.config
    }

    /// The booklet options as configured so far.
    #[must_use]
    pub fn options(&self) -> &BookletOptions {
        &self.options
    }

    /// Lays the accumulated content out into pages and binds them into a
    /// configured, unstarted booklet.
    ///
    /// # Errors
    /// Returns [`Error::Config`](crate::errors::Error::Config) when the
    /// pagination constraints leave no room for content.
    pub fn build<T: Transport>(self, transport: T, feed: ReactionFeed) -> Result<Booklet<T>> {
        let mut options = self.options;
        // The annotation room check works against the same budget the
        // paginator laid out under.
        options.char_limit = self.config.max_characters;

        let mut paginator = Paginator::new(self.config);
        for fragment in self.fragments {
            paginator.insert(fragment, false);
        }
        let pages = paginator.into_pages()?.into_iter().map(Page::Text).collect();

        Ok(Booklet::new(pages, options, self.buttons, transport, feed))
    }

    /// Sugar for `build()` followed by [`Booklet::start`].
    ///
    /// # Errors
    /// Same conditions as [`BookBinder::build`] and [`Booklet::start`].
    pub async fn start<T: Transport>(
        self,
        transport: T,
        feed: ReactionFeed,
    ) -> Result<BookletState> {
        let mut booklet = self.build(transport, feed)?;
        booklet.start().await
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::book::reaction_channel;
    use crate::book::{DEFAULT_TIMEOUT_SECS, default_numbering};
    use crate::test_utils::{BOT, CHANNEL, REQUESTER, RecordingTransport, press, test_feed};

    #[test]
    fn test_fluent_and_direct_configuration_are_equal() {
        let binder = BookBinder::new(CHANNEL, REQUESTER, BOT)
            .with_max_characters(500)
            .with_max_lines(Some(10))
            .with_prefix("```")
            .with_suffix("```")
            .with_timeout(Some(Duration::from_secs(60)))
            .with_owner_only(false)
            .with_start_index(2);

        let direct_config = PaginationConfig {
            max_characters: 500,
            max_lines: Some(10),
            prefix: "```".to_owned(),
            suffix: "```".to_owned(),
        };
        let direct_options = BookletOptions {
            channel: CHANNEL,
            requester: REQUESTER,
            bot_user: BOT,
            timeout: Some(Duration::from_secs(60)),
            owner_only: false,
            start_index: 2,
            char_limit: crate::pagination::DEFAULT_MAX_CHARACTERS,
            numbering: default_numbering,
        };

        assert_eq!(binder.pagination_config(), &direct_config);
        assert_eq!(binder.options(), &direct_options);
    }

    #[test]
    fn test_defaults_match_booklet_defaults() {
        let binder = BookBinder::new(CHANNEL, REQUESTER, BOT);
        assert_eq!(
            binder.options().timeout,
            Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
        );
        assert!(binder.options().owner_only);
        assert_eq!(binder.pagination_config(), &PaginationConfig::default());
    }

    #[test]
    fn test_build_paginates_the_accumulated_content() {
        let mut binder = BookBinder::new(CHANNEL, REQUESTER, BOT).with_max_lines(Some(5));
        for i in 0..12 {
            binder = binder.add_line(format!("row {i}"));
        }

        let booklet = binder
            .build(RecordingTransport::new(), test_feed())
            .unwrap();
        assert_eq!(booklet.page_count(), 3);
    }

    #[test]
    fn test_build_propagates_configuration_errors() {
        let result = BookBinder::new(CHANNEL, REQUESTER, BOT)
            .with_max_characters(4)
            .with_prefix("####")
            .add("text")
            .build(RecordingTransport::new(), test_feed());
        assert!(result.is_err());
    }

    #[test]
    fn test_build_char_limit_tracks_max_characters() {
        let booklet = BookBinder::new(CHANNEL, REQUESTER, BOT)
            .with_max_characters(300)
            .add("content")
            .build(RecordingTransport::new(), test_feed())
            .unwrap();
        assert_eq!(booklet.options().char_limit, 300);
    }

    #[tokio::test]
    async fn test_start_is_build_then_start() {
        let (sink, feed) = reaction_channel(8);
        let transport = RecordingTransport::new();

        let binder = BookBinder::new(CHANNEL, REQUESTER, BOT)
            .with_timeout(None)
            .add_line("page one material")
            .add_break()
            .add_line("page two material");

        press(&sink, "⏹");
        let state = binder.start(transport.clone(), feed).await.unwrap();
        assert_eq!(state, BookletState::ClosedByUser);
        assert!(!transport.calls().is_empty());
    }

    #[test]
    fn test_empty_binder_builds_a_placeholder_booklet() {
        let booklet = BookBinder::new(CHANNEL, REQUESTER, BOT)
            .build(RecordingTransport::new(), test_feed())
            .unwrap();
        assert_eq!(booklet.page_count(), 1);
    }
}
