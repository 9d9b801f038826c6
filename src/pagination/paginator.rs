//! The layout algorithm and its caching wrapper.
//!
//! The paginator accumulates [`Fragment`]s and lazily lays them out into page
//! strings on first access. The computed pages are cached; every mutating call
//! invalidates the cache.

use crate::errors::Result;
use crate::pagination::config::PaginationConfig;
use crate::pagination::fragment::Fragment;

/// Deterministically converts an ordered list of fragments into an ordered
/// list of page strings under a [`PaginationConfig`].
#[derive(Debug, Clone, Default)]
pub struct Paginator {
    config: PaginationConfig,
    fragments: Vec<Fragment>,
    cache: Option<Vec<String>>,
}

impl Paginator {
    /// Creates an empty paginator with the given constraints.
    #[must_use]
    pub fn new(config: PaginationConfig) -> Self {
        Self {
            config,
            fragments: Vec::new(),
            cache: None,
        }
    }

    /// The constraints this paginator lays out against.
    #[must_use]
    pub fn config(&self) -> &PaginationConfig {
        &self.config
    }

    /// True when no fragments have been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Inserts a fragment at the end of the input list, or at the start when
    /// `to_start` is set. Invalidates any previously computed pages.
    pub fn insert(&mut self, fragment: Fragment, to_start: bool) {
        self.cache = None;
        if to_start {
            self.fragments.insert(0, fragment);
        } else {
            self.fragments.push(fragment);
        }
    }

    /// Appends an ordinary text fragment. An empty fragment is a no-op.
    pub fn add(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text.is_empty() {
            return;
        }
        self.insert(Fragment::text(text), false);
    }

    /// Appends a text fragment with a trailing newline, for building
    /// multi-line pages out of discrete lines.
    pub fn add_line(&mut self, text: impl Into<String>) {
        let mut text = text.into();
        text.push('\n');
        self.insert(Fragment::text(text), false);
    }

    /// Appends a locked fragment: never split on word boundaries, only
    /// hard-sliced when it cannot fit on any page. An empty fragment is a
    /// no-op.
    pub fn add_locked(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text.is_empty() {
            return;
        }
        self.insert(Fragment::locked(text), false);
    }

    /// Forces a page break at the current position.
    pub fn add_break(&mut self) {
        self.insert(Fragment::Break, false);
    }

    /// Lays the accumulated fragments out into pages.
    ///
    /// The result is cached until the next mutating call. An empty paginator
    /// yields an empty slice, not an error.
    ///
    /// # Errors
    /// Returns [`Error::Config`](crate::errors::Error::Config) when the
    /// configuration leaves no room for page content.
    pub fn pages(&mut self) -> Result<&[String]> {
        if self.cache.is_none() {
            self.cache = Some(layout(&self.config, &self.fragments)?);
        }
        Ok(self.cache.as_deref().unwrap_or_default())
    }

    /// Consumes the paginator and returns the laid-out pages by value.
    ///
    /// # Errors
    /// Same conditions as [`Paginator::pages`].
    pub fn into_pages(mut self) -> Result<Vec<String>> {
        self.pages()?;
        Ok(self.cache.unwrap_or_default())
    }
}

/// Runs the full layout pass: greedy packing, the optional line-budget
/// regrouping, then prefix/suffix wrapping.
fn layout(config: &PaginationConfig, fragments: &[Fragment]) -> Result<Vec<String>> {
    config.validate()?;
    let body_limit = config.body_limit();
    let max_characters = config.max_characters;

    let mut bodies: Vec<String> = vec![String::new()];

    for fragment in fragments {
        let (content, locked) = match fragment {
            Fragment::Break => {
                bodies.push(String::new());
                continue;
            }
            Fragment::Text { content, locked } => (content.as_str(), *locked),
        };

        // A locked append may have left the current page past the body
        // limit; flush it into hard slices before taking new content.
        if char_len(current_body(&bodies)) >= body_limit {
            let overfull = bodies.pop().unwrap_or_default();
            bodies.extend(hard_slice(&overfull, body_limit));
            bodies.push(String::new());
        }

        if !locked && char_len(content) >= body_limit {
            // Too long for a single page: split on word boundaries and pack
            // the resulting chunks greedily.
            for chunk in split_word_chunks(content) {
                pack_chunk(&mut bodies, &chunk, body_limit);
            }
        } else if locked {
            if char_len(current_body(&bodies)) + char_len(content) >= max_characters {
                // Cannot fit even with the decoration margin spent; slicing
                // mid-word is the last resort for locked content.
                bodies.extend(hard_slice(content, body_limit));
            } else if let Some(page) = bodies.last_mut() {
                // Locked content joins the page verbatim, no separator.
                page.push_str(content);
            }
        } else {
            pack_chunk(&mut bodies, content, body_limit);
        }
    }

    if let Some(max_lines) = config.max_lines {
        bodies = regroup_lines(bodies, max_lines);
    }

    Ok(bodies
        .iter()
        .filter(|body| !body.trim().is_empty())
        .map(|body| wrap_body(&config.prefix, body, &config.suffix))
        .collect())
}

/// Places one chunk of splittable text: append to the current page when it
/// fits (with a single separating space where needed), hard-slice when the
/// chunk alone exceeds the budget, otherwise open a new page for it.
fn pack_chunk(bodies: &mut Vec<String>, chunk: &str, body_limit: usize) {
    let chunk_len = char_len(chunk);
    if chunk_len == 0 {
        return;
    }

    let separator = needs_separator(current_body(bodies));
    let fits =
        char_len(current_body(bodies)) + usize::from(separator) + chunk_len <= body_limit;

    if fits {
        match bodies.last_mut() {
            Some(page) => {
                if separator {
                    page.push(' ');
                }
                page.push_str(chunk);
            }
            None => bodies.push(chunk.to_owned()),
        }
    } else if chunk_len >= body_limit {
        bodies.extend(hard_slice(chunk, body_limit));
    } else {
        bodies.push(chunk.to_owned());
    }
}

/// A separating space is inserted unless the page is empty or already ends in
/// whitespace or a hyphen.
fn needs_separator(page: &str) -> bool {
    match page.chars().last() {
        None => false,
        Some(last) => !last.is_whitespace() && last != '-',
    }
}

fn current_body(bodies: &[String]) -> &str {
    bodies.last().map_or("", String::as_str)
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Cuts text into fixed-size chunks, counted and split in characters so no
/// chunk lands inside a multi-byte sequence.
fn hard_slice(text: &str, limit: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut count = 0;
    for ch in text.chars() {
        if count == limit {
            chunks.push(std::mem::take(&mut current));
            count = 0;
        }
        current.push(ch);
        count += 1;
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

/// Splits text wherever a word character is followed by a space, consuming
/// the space. The packer reinstates single separators between chunks, so
/// word-boundary whitespace is redistributed rather than preserved verbatim.
fn split_word_chunks(text: &str) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut prev_is_word = false;
    for ch in text.chars() {
        if ch == ' ' && prev_is_word {
            chunks.push(std::mem::take(&mut current));
            prev_is_word = false;
        } else {
            current.push(ch);
            prev_is_word = ch.is_alphanumeric() || ch == '_';
        }
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

/// Re-splits each page into physical lines and regroups them into pages of at
/// most `max_lines` lines. Pages are re-split independently, so content never
/// migrates across an existing page boundary and the page count only grows.
fn regroup_lines(bodies: Vec<String>, max_lines: usize) -> Vec<String> {
    let mut out = Vec::new();
    for body in bodies {
        let lines: Vec<&str> = body.split('\n').collect();
        if lines.len() <= max_lines {
            out.push(body);
            continue;
        }
        for group in lines.chunks(max_lines) {
            out.push(group.join("\n"));
        }
    }
    out
}

/// Joins the non-empty parts of prefix/body/suffix with newlines. The two
/// joining newlines are what the decoration margin in
/// [`PaginationConfig::body_limit`] reserves room for.
fn wrap_body(prefix: &str, body: &str, suffix: &str) -> String {
    let mut parts = Vec::with_capacity(3);
    if !prefix.is_empty() {
        parts.push(prefix);
    }
    parts.push(body);
    if !suffix.is_empty() {
        parts.push(suffix);
    }
    parts.join("\n")
}
