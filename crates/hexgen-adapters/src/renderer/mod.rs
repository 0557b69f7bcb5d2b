mod blocks;
mod simple;
mod templates;

pub use simple::SimpleRenderer;
pub use templates::{TemplateSet, TemplateSetError};
