//! Domain layer for the identity crate

pub mod collaborator;
pub mod entity;
pub mod repository;
pub mod value_object;
