//! Bub - claim shared servers and coordinate deploys from chat
//!
//! Chat messages such as `bub take sassy 3 days` arrive over a webhook, are
//! dispatched to a command handler, and every reply line is posted back to
//! the originating channel.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]

pub mod app;
pub mod cli;
pub mod commands;
pub mod error;
pub mod reply;
pub mod server;

pub use app::App;
pub use error::{Error, Result};
