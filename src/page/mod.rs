pub(crate) mod contact;
pub(crate) mod content;
pub(crate) mod faq;
pub(crate) mod landing;
pub(crate) mod map;
pub(crate) mod nav;
pub(crate) mod sections;
