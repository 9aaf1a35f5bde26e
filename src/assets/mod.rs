pub(crate) mod decode;
pub(crate) mod image_data;
pub(crate) mod png;
