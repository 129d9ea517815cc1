pub mod extract;
pub mod multipart;
pub mod parse;
pub mod validate;
