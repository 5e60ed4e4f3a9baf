pub(crate) mod common;
pub mod demo;
pub mod tool;
pub mod trends;
