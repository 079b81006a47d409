pub(crate) mod aggregate;
pub(crate) mod dates;
pub(crate) mod usage;
