//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (chat ids, timestamps)
//! - `session` - Rolling per-chat dialogue memory
//! - `frame` - Structured reply contract and its total parser
//! - `knowledge` - Static presale knowledge bundle
//! - `prompt` - Pure prompt composition for generation calls

pub mod foundation;
pub mod frame;
pub mod knowledge;
pub mod prompt;
pub mod session;
