//! Application layer - dispatch, reply orchestration, command parsing.
//!
//! This layer coordinates domain operations across ports. The
//! controller decides the path for each inbound message; the engine
//! runs the generate/validate/remember sequence for substantive ones.

pub mod command;
pub mod controller;
pub mod engine;

pub use command::Command;
pub use controller::{DialogueController, DispatchOutcome, InboundMessage};
pub use engine::{EngineReply, ReplyEngine};
