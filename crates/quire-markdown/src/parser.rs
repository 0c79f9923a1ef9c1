//! Guide parsing and HTML rendering.

use std::collections::HashMap;

use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag, TagEnd};

use crate::frontmatter::{extract_frontmatter, Frontmatter, FrontmatterError};

/// A parsed markdown guide.
#[derive(Debug, Clone)]
pub struct Guide {
    /// Parsed frontmatter (if present)
    pub frontmatter: Option<Frontmatter>,

    /// Markdown body (without frontmatter)
    pub content: String,

    /// Table of contents entries
    pub toc: Vec<TocEntry>,
}

/// A table of contents entry.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct TocEntry {
    /// Heading text
    pub title: String,
    /// Anchor ID
    pub id: String,
    /// Heading level (1-6)
    pub level: u8,
}

/// Errors that can occur when parsing a guide.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Frontmatter error: {0}")]
    Frontmatter(#[from] FrontmatterError),
}

fn options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_HEADING_ATTRIBUTES
}

/// Parse a guide: frontmatter plus a table of contents of its headings.
pub fn parse_guide(source: &str) -> Result<Guide, ParseError> {
    let (frontmatter, content) = extract_frontmatter(source)?;
    let (_, toc) = anchored_events(content);

    Ok(Guide {
        frontmatter,
        content: content.to_string(),
        toc,
    })
}

impl Guide {
    /// Title from frontmatter, falling back to the first heading.
    pub fn title(&self) -> Option<&str> {
        self.frontmatter
            .as_ref()
            .map(|f| f.title.as_str())
            .filter(|t| !t.is_empty())
            .or_else(|| self.toc.first().map(|e| e.title.as_str()))
    }

    /// Render the body to HTML. Headings carry the ids listed in `toc`.
    pub fn render_html(&self) -> String {
        let (events, _) = anchored_events(&self.content);

        let mut out = String::with_capacity(self.content.len() * 3 / 2);
        html::push_html(&mut out, events.into_iter());
        out
    }

    /// Plain text of the body, for the search index.
    pub fn plain_text(&self) -> String {
        let mut text = String::new();
        for event in Parser::new_ext(&self.content, options()) {
            match event {
                Event::Text(t) | Event::Code(t) => {
                    if !text.is_empty() && !text.ends_with(' ') {
                        text.push(' ');
                    }
                    text.push_str(t.trim());
                }
                Event::SoftBreak | Event::HardBreak => text.push(' '),
                _ => {}
            }
        }
        text
    }
}

/// Parse the body, giving every heading an id. Returns the events and the
/// matching table of contents.
fn anchored_events(content: &str) -> (Vec<Event<'_>>, Vec<TocEntry>) {
    let mut events = Vec::new();
    let mut toc = Vec::new();
    let mut seen: HashMap<String, usize> = HashMap::new();

    // Heading start tag plus the events inside it, until its end tag.
    let mut pending: Option<(Tag<'_>, Vec<Event<'_>>)> = None;

    for event in Parser::new_ext(content, options()) {
        match event {
            Event::Start(tag @ Tag::Heading { .. }) => {
                pending = Some((tag, Vec::new()));
            }

            Event::End(TagEnd::Heading(_)) => {
                let Some((
                    Tag::Heading {
                        level,
                        id,
                        classes,
                        attrs,
                    },
                    inner,
                )) = pending.take()
                else {
                    continue;
                };

                let title = heading_text(&inner).trim().to_string();
                let id = match id {
                    Some(explicit) => explicit.to_string(),
                    None => unique_anchor(&anchor_id(&title), &mut seen),
                };

                toc.push(TocEntry {
                    title,
                    id: id.clone(),
                    level: level as u8,
                });

                events.push(Event::Start(Tag::Heading {
                    level,
                    id: Some(CowStr::from(id)),
                    classes,
                    attrs,
                }));
                events.extend(inner);
                events.push(Event::End(TagEnd::Heading(level)));
            }

            other => match pending.as_mut() {
                Some((_, inner)) => inner.push(other),
                None => events.push(other),
            },
        }
    }

    (events, toc)
}

fn heading_text(events: &[Event<'_>]) -> String {
    events
        .iter()
        .filter_map(|e| match e {
            Event::Text(t) | Event::Code(t) => Some(t.as_ref()),
            _ => None,
        })
        .collect()
}

fn unique_anchor(base: &str, seen: &mut HashMap<String, usize>) -> String {
    let count = seen.entry(base.to_string()).or_insert(0);
    let id = if *count == 0 {
        base.to_string()
    } else {
        format!("{}-{}", base, count)
    };
    *count += 1;
    id
}

/// Convert heading text to a URL fragment.
fn anchor_id(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c
            } else if c.is_whitespace() || c == '-' || c == '_' {
                '-'
            } else {
                '\0'
            }
        })
        .filter(|c| *c != '\0')
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_complete_guide() {
        let source = r#"---
title: Pagination
description: Walking connections
---

# Pagination

Use `first` and `after`.

## Cursors

```graphql
query { viewer { id } }
```
"#;

        let guide = parse_guide(source).unwrap();

        let fm = guide.frontmatter.as_ref().unwrap();
        assert_eq!(fm.title, "Pagination");
        assert_eq!(fm.description.as_deref(), Some("Walking connections"));

        assert_eq!(guide.toc.len(), 2);
        assert_eq!(guide.toc[0].title, "Pagination");
        assert_eq!(guide.toc[0].level, 1);
        assert_eq!(guide.toc[0].id, "pagination");
        assert_eq!(guide.toc[1].title, "Cursors");
        assert_eq!(guide.toc[1].level, 2);
    }

    #[test]
    fn parses_without_frontmatter() {
        let guide = parse_guide("# Just Markdown\n\nNo frontmatter.").unwrap();

        assert!(guide.frontmatter.is_none());
        assert_eq!(guide.title(), Some("Just Markdown"));
    }

    #[test]
    fn renders_heading_anchors() {
        let guide = parse_guide("# Rate Limits\n\nText.\n\n## The `X-Cost` header").unwrap();

        let html = guide.render_html();

        assert!(html.contains(r#"<h1 id="rate-limits">Rate Limits</h1>"#));
        assert!(html.contains(r#"<h2 id="the-x-cost-header">"#));
        assert_eq!(guide.toc[1].title, "The X-Cost header");
    }

    #[test]
    fn repeated_headings_get_unique_ids() {
        let guide = parse_guide("## Example\n\n## Example\n\n## Example").unwrap();

        let ids: Vec<&str> = guide.toc.iter().map(|e| e.id.as_str()).collect();

        assert_eq!(ids, vec!["example", "example-1", "example-2"]);
        assert!(guide.render_html().contains(r#"id="example-2""#));
    }

    #[test]
    fn keeps_explicit_heading_ids() {
        let guide = parse_guide("## Errors {#error-codes}").unwrap();

        assert_eq!(guide.toc[0].id, "error-codes");
        assert_eq!(guide.toc[0].title, "Errors");
    }

    #[test]
    fn extracts_plain_text() {
        let guide = parse_guide("# Title\n\nSome **bold** text and `code`.").unwrap();

        let text = guide.plain_text();

        assert!(text.contains("Some"));
        assert!(text.contains("bold"));
        assert!(text.contains("code"));
        assert!(!text.contains("**"));
    }

    #[test]
    fn anchor_id_works() {
        assert_eq!(anchor_id("Hello World"), "hello-world");
        assert_eq!(anchor_id("API Reference"), "api-reference");
        assert_eq!(anchor_id("Errors (GraphQL)"), "errors-graphql");
        assert_eq!(anchor_id("  Multiple   Spaces  "), "multiple-spaces");
    }
}
