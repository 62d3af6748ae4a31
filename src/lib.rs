//! Alien Invasion Simulator
//!
//! A turn-based simulation of randomly-wandering aliens invading a directed
//! city graph. Aliens spawn in random cities; each step every active alien
//! walks to a random reachable neighbor; two aliens meeting in one city
//! destroy it and are trapped in the rubble. The run ends when no move is
//! possible or the move budget is spent.

pub mod config;
pub mod engine;
pub mod error;
pub mod map;
pub mod rng;
pub mod types;
pub mod world;

pub use config::Config;
pub use engine::{Engine, EngineState};
pub use error::SimError;
pub use rng::{RandomSource, ScriptedRng, SimRng};
pub use types::{Alien, AlienId, City, CityId, Direction};
pub use world::{InMemoryWorld, World};
