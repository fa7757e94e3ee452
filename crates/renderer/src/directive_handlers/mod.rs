pub(crate) mod attributes;
pub(crate) mod content;
pub(crate) mod include;
pub(crate) mod repeat;
pub(crate) mod unwrap;
