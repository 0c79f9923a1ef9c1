//! Markdown guide parser with frontmatter and heading extraction.
//!
//! Guides are plain markdown files with optional YAML frontmatter. Parsing
//! yields the frontmatter, the body, and a table of contents whose anchors
//! match the ids written into the rendered HTML.

pub mod frontmatter;
pub mod parser;

pub use frontmatter::{Frontmatter, FrontmatterError};
pub use parser::{parse_guide, Guide, ParseError, TocEntry};
