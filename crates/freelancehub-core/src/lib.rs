//! Client core for the FreelanceHub marketplace.
//!
//! The two stores are the heart of this crate: [`store::SessionStore`] owns
//! "who is logged in" (with durable persistence through a
//! [`vault::SessionVault`]) and [`store::ProjectStore`] caches the server's
//! project list alongside an independently addressable current-project
//! slot, applying client-visible mutations without a re-fetch after every
//! write. Both talk to the REST API through the [`gateway::Gateway`] seam.

pub mod config;
pub mod error;
pub mod gateway;
pub mod model;
pub mod store;
pub mod vault;

pub use error::{HubError, Result};
