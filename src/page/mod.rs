//! Content pages: front matter, markdown bodies, and compilation.

mod compile;
mod frontmatter;
mod markdown;

pub use compile::{PageCompiler, SourceKind};
pub use frontmatter::FrontMatter;
