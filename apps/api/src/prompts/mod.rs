//! Prompt templates: the stored document, its typed view, and assembly.

pub mod assembler;
pub mod bundle;
pub mod defaults;
pub mod handlers;
pub mod store;
