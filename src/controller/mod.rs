pub(crate) mod batch;
pub(crate) mod events;
pub(crate) mod interaction;
pub(crate) mod playback;
pub(crate) mod registry;
pub(crate) mod state;
pub(crate) mod tweens;
pub(crate) mod viewport;
