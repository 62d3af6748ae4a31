//! Error Types
//!
//! Every failure the world, the map loader and the engine can produce.
//! None of these are recoverable: the simulation either runs to completion
//! or aborts with one of them.

use thiserror::Error;

/// Errors produced by the invasion simulation.
#[derive(Debug, Error)]
pub enum SimError {
    /// A city was registered with an empty name
    #[error("city name is empty")]
    EmptyCityName,

    /// A city with this name is already registered
    #[error("duplicate city name exists")]
    DuplicateCity,

    /// An agent that should have a current city has none
    #[error("city is missing")]
    MissingCity,

    /// The city handle does not refer to an alive city
    #[error("city is unknown")]
    UnknownCity,

    /// A city cannot link to itself
    #[error("no possible link between same city")]
    SameCityLink,

    /// An alien with this id is already registered
    #[error("duplicate alien not allowed")]
    DuplicateAlien,

    /// The alien is not registered
    #[error("alien is missing")]
    MissingAlien,

    /// The alien handle does not refer to a registered alien
    #[error("alien is unknown")]
    UnknownAlien,

    /// The direction token is not one of north/east/south/west
    #[error("unknown direction provided")]
    UnknownDirection,

    /// The direction slot already holds a link to a different city
    #[error("a link already exists between the two cities")]
    LinkConflict,

    /// A random value was requested from an empty range
    #[error("random input out of bounds")]
    RandomOutOfBounds,

    /// A city definition line could not be parsed
    #[error("error parsing the city definition")]
    MapParse,

    /// The run was cancelled before finishing
    #[error("the simulation was cancelled")]
    Cancelled,

    /// The output sink or map reader failed
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
