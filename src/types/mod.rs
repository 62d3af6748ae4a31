//! Core Types
//!
//! Cities, directions and aliens. Pure data; all graph bookkeeping lives in
//! the world.

pub mod alien;
pub mod city;

pub use alien::{Alien, AlienId};
pub use city::{City, CityId, Direction};
