//! Frame module - Structured reply contract and its total parser.
//!
//! The generation provider is asked for a JSON document in a fixed
//! shape; this module defines that shape and the parse policy that
//! turns arbitrary provider output into a usable frame: strict on the
//! required trio, lenient on everything optional.

mod parser;
mod reply_frame;

pub use parser::parse;
pub use reply_frame::{DialogState, Intent, Offer, PackageKind, ReplyFrame, PRICE_MARKER};
