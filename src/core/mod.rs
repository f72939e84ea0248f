pub mod decode;
pub mod validate;
