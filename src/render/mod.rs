pub(crate) mod compositor;
pub(crate) mod glyph;
pub(crate) mod post;
pub(crate) mod stats;
pub(crate) mod vector;
