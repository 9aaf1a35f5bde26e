pub(crate) mod blend;
pub(crate) mod clip;
pub(crate) mod compositor;
pub(crate) mod present;
pub(crate) mod session;
pub(crate) mod settings;
pub(crate) mod store;
pub(crate) mod surface;
