pub(crate) mod condition;
pub(crate) mod observer;
