//! Domain layer: the outline engine
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod blocks;
pub mod builder;
pub mod classifier;
pub mod error;
pub mod keys;
pub mod navigator;
pub mod reconciler;
pub mod tree_traits;

pub use arena::{Outline, OutlineIter, OutlineNode};
pub use blocks::{format_table_row, group_lines, is_table_row, ContentBlock};
pub use builder::OutlineBuilder;
pub use classifier::{Heading, HeadingPattern, HeadingPatterns};
pub use error::{DomainError, DomainResult};
pub use keys::{KeySeparators, CONTENT_KEY_SEPARATOR, NUMBER_KEY_SEPARATOR};
pub use navigator::DEFAULT_INDENT;
pub use reconciler::{reconcile, Correction, TemplateNumberMap};
pub use tree_traits::OutlineTreeConvert;
