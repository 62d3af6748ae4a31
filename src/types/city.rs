//! City Model
//!
//! Cities are nodes in the invasion graph, addressed by stable handles and
//! holding up to four directed outgoing links, one per compass direction.
//! Links are not required to be symmetric.

use std::fmt;
use std::str::FromStr;

use crate::error::SimError;

/// Compass direction of an outgoing city link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// All directions in the fixed north/east/south/west order used for
    /// rendering and for random link selection.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// The map-format token for this direction.
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::East => "east",
            Direction::South => "south",
            Direction::West => "west",
        }
    }

    fn index(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::East => 1,
            Direction::South => 2,
            Direction::West => 3,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "north" => Ok(Direction::North),
            "east" => Ok(Direction::East),
            "south" => Ok(Direction::South),
            "west" => Ok(Direction::West),
            _ => Err(SimError::UnknownDirection),
        }
    }
}

/// Stable handle to a city in the world arena.
///
/// Handles stay valid as identifiers after the city is destroyed; lookups on
/// a destroyed handle simply miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CityId(pub u32);

/// A named node in the invasion graph.
#[derive(Debug, Clone)]
pub struct City {
    name: String,
    links: [Option<CityId>; 4],
}

impl City {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            links: [None; 4],
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The outgoing link in the given direction, if any.
    pub fn link(&self, direction: Direction) -> Option<CityId> {
        self.links[direction.index()]
    }

    /// Sets the outgoing link in the given direction, overwriting any
    /// previous value. Conflict detection is the world's job.
    pub fn set_link(&mut self, direction: Direction, city: CityId) {
        self.links[direction.index()] = Some(city);
    }

    /// Clears the first link pointing at `city`, matched by handle rather
    /// than by re-derived direction. Fails if no link points there.
    pub fn remove_link_to(&mut self, city: CityId) -> Result<Direction, SimError> {
        for direction in Direction::ALL {
            if self.links[direction.index()] == Some(city) {
                self.links[direction.index()] = None;
                return Ok(direction);
            }
        }
        Err(SimError::UnknownCity)
    }

    /// Outgoing links in fixed direction order. A destination reachable via
    /// two directions appears twice, giving it double selection weight.
    pub fn available_links(&self) -> Vec<(Direction, CityId)> {
        Direction::ALL
            .into_iter()
            .filter_map(|d| self.links[d.index()].map(|c| (d, c)))
            .collect()
    }
}
