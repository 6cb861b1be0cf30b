//! Presentation layer for the identity crate

pub mod dto;
pub mod handlers;
pub mod router;

pub use router::{identity_router, identity_router_generic};
