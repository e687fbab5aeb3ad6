//! Assembly of per-locale message trees from root content and chapter fields.
mod chapters;
mod merge;
mod resolver;

pub use chapters::{
    ChapterBundle,
    ChapterField,
};
pub use merge::{
    CONTENT_KEY,
    merge_content,
};
pub use resolver::{
    MergedMessageTree,
    MessageResolver,
    resolve_messages,
};
