//! Displayable page payloads.

/// One unit of displayed content: either plain text or an embed-style rich
/// payload. Pages are immutable once handed to a booklet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    /// Plain message text.
    Text(String),
    /// Rich embed content.
    Embed(EmbedPage),
}

/// SDK-agnostic embed payload. The transport layer maps this onto whatever
/// the host chat SDK's embed builder looks like.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EmbedPage {
    /// Embed title.
    pub title: Option<String>,
    /// Embed body.
    pub description: String,
    /// Accent colour, `0xRRGGBB`.
    pub colour: Option<u32>,
    /// Footer line. Booklets use this slot for the page-number annotation.
    pub footer: Option<String>,
}

impl Page {
    /// Builds a plain-text page.
    pub fn text(content: impl Into<String>) -> Self {
        Page::Text(content.into())
    }

    /// Builds an embed page with just a description.
    pub fn embed(description: impl Into<String>) -> Self {
        Page::Embed(EmbedPage {
            description: description.into(),
            ..EmbedPage::default()
        })
    }

    /// Returns a copy of this page carrying a page-number annotation.
    ///
    /// Text pages get the annotation appended on its own line, but only when
    /// the result stays within `char_limit`; a page that is already full is
    /// displayed unnumbered rather than truncated. Embed pages put the
    /// annotation in the footer, which has its own budget.
    #[must_use]
    pub(crate) fn with_annotation(&self, annotation: &str, char_limit: usize) -> Page {
        match self {
            Page::Text(text) => {
                let annotated_len = text.chars().count() + 1 + annotation.chars().count();
                if annotated_len <= char_limit {
                    Page::Text(format!("{text}\n{annotation}"))
                } else {
                    Page::Text(text.clone())
                }
            }
            Page::Embed(embed) => {
                let mut embed = embed.clone();
                embed.footer = Some(annotation.to_owned());
                Page::Embed(embed)
            }
        }
    }
}

impl From<String> for Page {
    fn from(value: String) -> Self {
        Page::Text(value)
    }
}

impl From<&str> for Page {
    fn from(value: &str) -> Self {
        Page::Text(value.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annotation_is_appended_when_it_fits() {
        let page = Page::text("content");
        let annotated = page.with_annotation("Page 1 of 3", 2000);
        assert_eq!(annotated, Page::Text("content\nPage 1 of 3".to_owned()));
    }

    #[test]
    fn test_annotation_is_skipped_when_page_is_full() {
        let page = Page::text("x".repeat(1995));
        let annotated = page.with_annotation("Page 1 of 3", 2000);
        assert_eq!(annotated, page);
    }

    #[test]
    fn test_embed_annotation_goes_into_the_footer() {
        let page = Page::embed("body");
        let Page::Embed(embed) = page.with_annotation("Page 2 of 2", 2000) else {
            panic!("embed page changed variant");
        };
        assert_eq!(embed.footer.as_deref(), Some("Page 2 of 2"));
        assert_eq!(embed.description, "body");
    }
}
