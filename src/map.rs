//! Map Loader
//!
//! Parses the line-oriented map format into any [`World`] implementation:
//!
//! ```text
//! CityName north=Other east=Another
//! ```
//!
//! Blank lines are skipped and whitespace is trimmed. Any malformed token
//! fails the whole load; cities committed before the bad line stay
//! registered.

use std::io::BufRead;

use crate::error::SimError;
use crate::types::{CityId, Direction};
use crate::world::World;

/// Loads a map definition into the world, registering cities on first
/// reference and wiring their directed links.
pub fn load_map<W: World>(world: &mut W, reader: impl BufRead) -> Result<(), SimError> {
    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let mut tokens = line.split_whitespace();
        let name = tokens.next().ok_or(SimError::MapParse)?;
        let from = register_city(world, name)?;

        for token in tokens {
            let chunks: Vec<&str> = token.split('=').collect();
            let &[direction, target] = chunks.as_slice() else {
                return Err(SimError::MapParse);
            };
            // Direction tokens are exactly north/east/south/west.
            let direction: Direction =
                direction.parse().map_err(|_| SimError::MapParse)?;
            let to = register_city(world, target)?;
            world.add_link(from, to, direction)?;
        }
    }

    Ok(())
}

/// Returns the city's handle, creating the city the first time its name is
/// seen.
fn register_city<W: World>(world: &mut W, name: &str) -> Result<CityId, SimError> {
    match world.city_by_name(name) {
        Some(id) => Ok(id),
        None => world.add_city(name),
    }
}
