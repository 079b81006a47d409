pub(crate) mod bundle;
pub(crate) mod color;
pub(crate) mod decode;
pub(crate) mod font;
