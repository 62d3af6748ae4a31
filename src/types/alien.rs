//! Alien Model
//!
//! An alien is a mobile occupant with an identity, a current city and a
//! monotonic trapped flag.

use std::fmt;

use super::city::CityId;

/// Alien identity, assigned sequentially from 1 at spawn time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AlienId(pub u32);

impl fmt::Display for AlienId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Alien #{}", self.0)
    }
}

/// A wandering invader.
#[derive(Debug, Clone)]
pub struct Alien {
    id: AlienId,
    /// Current city, None until placed. Kept intact after trapping so the
    /// final state still records where the alien ended up.
    city: Option<CityId>,
    trapped: bool,
}

impl Alien {
    pub fn new(id: AlienId) -> Self {
        Self {
            id,
            city: None,
            trapped: false,
        }
    }

    pub fn id(&self) -> AlienId {
        self.id
    }

    pub fn city(&self) -> Option<CityId> {
        self.city
    }

    pub fn is_trapped(&self) -> bool {
        self.trapped
    }

    pub(crate) fn set_city(&mut self, city: CityId) {
        self.city = Some(city);
    }

    /// Trapping is terminal; the flag never resets.
    pub(crate) fn trap(&mut self) {
        self.trapped = true;
    }
}
