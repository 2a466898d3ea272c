//! JurConsult Bot - Telegram Presale Assistant
//!
//! This crate implements a Russian-language presale assistant for a
//! legal consulting practice: a webhook-driven Telegram bot that
//! qualifies leads, answers from a fixed service catalog and hands
//! hot dialogues over to a human manager.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
