#![deny(warnings)]

pub mod clipboard;
pub mod error;
pub mod logger;
pub mod node;
pub mod store;
pub mod tree;
