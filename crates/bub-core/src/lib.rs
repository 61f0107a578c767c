//! Bub-core - leases, deploy locks and `take` argument resolution
//!
//! This crate provides:
//! - The resource registry (fixed, ordered set of claimable servers)
//! - The claim store (time-bounded leases with lazy expiry)
//! - The deploy lock (compare-and-set markers, explicitly released)
//! - Duration parsing and `take` argument resolution
//! - Configuration, clock and last-activity collaborators

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod activity;
pub mod claims;
pub mod clock;
pub mod config;
pub mod deploys;
pub mod duration;
pub mod error;
pub mod humanize;
pub mod registry;
pub mod resolver;

pub use activity::{ActivitySource, HerokuActivity, NoActivity};
pub use claims::{Claims, Lease};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::Config;
pub use deploys::{DeployMarker, Deploys};
pub use error::{Error, Result};
pub use registry::Registry;
pub use resolver::{resolve_take, TakeArgs, TakeTarget};
