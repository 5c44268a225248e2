pub(crate) mod ease;
pub(crate) mod props;
pub(crate) mod spec;
pub(crate) mod stagger;
pub(crate) mod timeline;
