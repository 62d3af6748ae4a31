//! World State
//!
//! The world owns the city graph and the alien population, plus the two
//! derived indices the engine relies on: city occupancy (at most one alien
//! per alive city) and the reverse-link index used to sever dangling links
//! when a city is destroyed.
//!
//! The engine only sees the [`World`] trait, so tests can substitute a fake
//! and assert on resulting state instead of recording calls.

use std::collections::{BTreeMap, HashMap};

use crate::error::SimError;
use crate::types::{Alien, AlienId, City, CityId, Direction};

/// Capability interface between the engine and the world state.
pub trait World {
    /// Looks up an alive city by name. Never errors.
    fn city_by_name(&self, name: &str) -> Option<CityId>;

    /// Resolves a handle to its city, alive cities only.
    fn city(&self, id: CityId) -> Option<&City>;

    /// Snapshot of all alive cities, in deterministic (creation) order.
    fn alive_cities(&self) -> Vec<CityId>;

    /// Registers a new city with no links.
    fn add_city(&mut self, name: &str) -> Result<CityId, SimError>;

    /// Removes a city: severs every link pointing into it, then drops it
    /// from the alive registry, the occupant index and the reverse index.
    /// Never cascades.
    fn destroy_city(&mut self, city: CityId) -> Result<(), SimError>;

    /// Adds a directed link. Re-adding the identical link is a no-op
    /// success; a different destination in the same slot is a conflict.
    fn add_link(&mut self, from: CityId, to: CityId, direction: Direction)
        -> Result<(), SimError>;

    /// Resolves a handle to its alien.
    fn alien(&self, id: AlienId) -> Option<&Alien>;

    /// Registers a new unplaced, untrapped alien.
    fn add_alien(&mut self, id: AlienId) -> Result<(), SimError>;

    /// Relocates an alien, keeping the occupant index consistent. Collision
    /// handling is engine policy; the world does not reject an occupied
    /// destination.
    fn move_alien(&mut self, alien: AlienId, city: CityId) -> Result<(), SimError>;

    /// Marks an alien trapped and clears its occupancy entry. The alien's
    /// city reference is left intact for reporting.
    fn trap_alien(&mut self, alien: AlienId) -> Result<(), SimError>;

    /// Whether the alien is trapped. Unregistered aliens report false.
    fn is_trapped(&self, alien: AlienId) -> Result<bool, SimError>;

    /// The occupant of a city, if any.
    fn alien_at(&self, city: CityId) -> Result<Option<AlienId>, SimError>;

    /// All aliens not yet trapped, in deterministic (id) order.
    fn untrapped_aliens(&self) -> Vec<AlienId>;
}

/// The production world: an arena of cities addressed by handle.
#[derive(Debug, Default)]
pub struct InMemoryWorld {
    /// Alive cities. BTreeMap keeps iteration order stable so a seeded run
    /// is reproducible.
    cities: BTreeMap<CityId, City>,
    /// Name registry, alive cities only.
    names: HashMap<String, CityId>,
    aliens: BTreeMap<AlienId, Alien>,
    /// City occupancy, at most one alien per alive city.
    occupants: HashMap<CityId, AlienId>,
    /// Reverse-link index: destination city to the sources linking into it,
    /// one entry per distinct link.
    inbound: HashMap<CityId, Vec<CityId>>,
    next_city: u32,
}

impl InMemoryWorld {
    pub fn new() -> Self {
        Self::default()
    }
}

impl World for InMemoryWorld {
    fn city_by_name(&self, name: &str) -> Option<CityId> {
        self.names.get(name).copied()
    }

    fn city(&self, id: CityId) -> Option<&City> {
        self.cities.get(&id)
    }

    fn alive_cities(&self) -> Vec<CityId> {
        self.cities.keys().copied().collect()
    }

    fn add_city(&mut self, name: &str) -> Result<CityId, SimError> {
        if name.is_empty() {
            return Err(SimError::EmptyCityName);
        }
        if self.names.contains_key(name) {
            return Err(SimError::DuplicateCity);
        }

        let id = CityId(self.next_city);
        self.next_city += 1;
        self.cities.insert(id, City::new(name));
        self.names.insert(name.to_string(), id);
        Ok(id)
    }

    fn destroy_city(&mut self, city: CityId) -> Result<(), SimError> {
        let doomed = self.cities.get(&city).ok_or(SimError::UnknownCity)?;
        let name = doomed.name().to_string();

        if let Some(sources) = self.inbound.remove(&city) {
            for source in sources {
                // Sources destroyed earlier keep stale reverse entries;
                // their links were never severed, so just skip them.
                if let Some(source_city) = self.cities.get_mut(&source) {
                    source_city.remove_link_to(city)?;
                }
            }
        }

        self.cities.remove(&city);
        self.names.remove(&name);
        self.occupants.remove(&city);
        Ok(())
    }

    fn add_link(
        &mut self,
        from: CityId,
        to: CityId,
        direction: Direction,
    ) -> Result<(), SimError> {
        if from == to {
            return Err(SimError::SameCityLink);
        }
        if !self.cities.contains_key(&to) {
            return Err(SimError::UnknownCity);
        }
        let from_city = self.cities.get_mut(&from).ok_or(SimError::UnknownCity)?;

        match from_city.link(direction) {
            // Re-adding the identical link succeeds without duplicating the
            // reverse-index entry.
            Some(existing) if existing == to => return Ok(()),
            Some(_) => return Err(SimError::LinkConflict),
            None => {}
        }

        from_city.set_link(direction, to);
        self.inbound.entry(to).or_default().push(from);
        Ok(())
    }

    fn alien(&self, id: AlienId) -> Option<&Alien> {
        self.aliens.get(&id)
    }

    fn add_alien(&mut self, id: AlienId) -> Result<(), SimError> {
        if self.aliens.contains_key(&id) {
            return Err(SimError::DuplicateAlien);
        }
        self.aliens.insert(id, Alien::new(id));
        Ok(())
    }

    fn move_alien(&mut self, alien: AlienId, city: CityId) -> Result<(), SimError> {
        if !self.cities.contains_key(&city) {
            return Err(SimError::UnknownCity);
        }
        let mover = self.aliens.get_mut(&alien).ok_or(SimError::UnknownAlien)?;

        // Vacate the previous city before occupying the new one so the
        // occupant index never points at two cities for one alien.
        if let Some(previous) = mover.city() {
            self.occupants.remove(&previous);
        }
        mover.set_city(city);
        self.occupants.insert(city, alien);
        Ok(())
    }

    fn trap_alien(&mut self, alien: AlienId) -> Result<(), SimError> {
        let trapped = self.aliens.get_mut(&alien).ok_or(SimError::MissingAlien)?;
        trapped.trap();
        if let Some(city) = trapped.city() {
            self.occupants.remove(&city);
        }
        Ok(())
    }

    fn is_trapped(&self, alien: AlienId) -> Result<bool, SimError> {
        Ok(self.aliens.get(&alien).is_some_and(Alien::is_trapped))
    }

    fn alien_at(&self, city: CityId) -> Result<Option<AlienId>, SimError> {
        if !self.cities.contains_key(&city) {
            return Err(SimError::UnknownCity);
        }
        Ok(self.occupants.get(&city).copied())
    }

    fn untrapped_aliens(&self) -> Vec<AlienId> {
        self.aliens
            .values()
            .filter(|a| !a.is_trapped())
            .map(Alien::id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_linked_cities() -> (InMemoryWorld, CityId, CityId) {
        let mut world = InMemoryWorld::new();
        let a = world.add_city("A").unwrap();
        let b = world.add_city("B").unwrap();
        world.add_link(a, b, Direction::North).unwrap();
        (world, a, b)
    }

    #[test]
    fn test_add_city_registers_once() {
        let mut world = InMemoryWorld::new();
        let id = world.add_city("Foo").unwrap();
        assert_eq!(world.city_by_name("Foo"), Some(id));
        assert_eq!(world.city(id).unwrap().name(), "Foo");

        assert!(matches!(world.add_city("Foo"), Err(SimError::DuplicateCity)));
        assert!(matches!(world.add_city(""), Err(SimError::EmptyCityName)));
    }

    #[test]
    fn test_city_names_are_case_sensitive() {
        let mut world = InMemoryWorld::new();
        world.add_city("Foo").unwrap();
        world.add_city("foo").unwrap();
        assert_ne!(world.city_by_name("Foo"), world.city_by_name("foo"));
    }

    #[test]
    fn test_add_link_sets_directed_edge() {
        let (world, a, b) = two_linked_cities();
        assert_eq!(world.city(a).unwrap().link(Direction::North), Some(b));
        // Directed only: B gained no return edge.
        assert_eq!(world.city(b).unwrap().link(Direction::South), None);
    }

    #[test]
    fn test_add_link_rejects_self_and_unknown() {
        let mut world = InMemoryWorld::new();
        let a = world.add_city("A").unwrap();
        assert!(matches!(
            world.add_link(a, a, Direction::North),
            Err(SimError::SameCityLink)
        ));
        assert!(matches!(
            world.add_link(a, CityId(99), Direction::North),
            Err(SimError::UnknownCity)
        ));
        assert!(matches!(
            world.add_link(CityId(99), a, Direction::North),
            Err(SimError::UnknownCity)
        ));
    }

    #[test]
    fn test_add_link_identical_is_idempotent_conflict_is_not() {
        let (mut world, a, b) = two_linked_cities();
        // Identical re-add succeeds.
        world.add_link(a, b, Direction::North).unwrap();
        // A different destination in the occupied slot is a conflict.
        let c = world.add_city("C").unwrap();
        assert!(matches!(
            world.add_link(a, c, Direction::North),
            Err(SimError::LinkConflict)
        ));
    }

    #[test]
    fn test_idempotent_readd_then_destroy_severs_once() {
        let (mut world, a, b) = two_linked_cities();
        world.add_link(a, b, Direction::North).unwrap();
        world.destroy_city(b).unwrap();
        assert_eq!(world.city(a).unwrap().link(Direction::North), None);
    }

    #[test]
    fn test_destroy_city_severs_inbound_links() {
        let mut world = InMemoryWorld::new();
        let a = world.add_city("A").unwrap();
        let b = world.add_city("B").unwrap();
        let c = world.add_city("C").unwrap();
        world.add_link(a, c, Direction::East).unwrap();
        world.add_link(b, c, Direction::West).unwrap();

        world.destroy_city(c).unwrap();
        assert_eq!(world.city_by_name("C"), None);
        assert!(world.city(c).is_none());
        assert_eq!(world.city(a).unwrap().link(Direction::East), None);
        assert_eq!(world.city(b).unwrap().link(Direction::West), None);
        assert_eq!(world.alive_cities(), vec![a, b]);
    }

    #[test]
    fn test_destroy_city_severs_both_directions_from_one_source() {
        let mut world = InMemoryWorld::new();
        let a = world.add_city("A").unwrap();
        let b = world.add_city("B").unwrap();
        world.add_link(a, b, Direction::North).unwrap();
        world.add_link(a, b, Direction::West).unwrap();

        world.destroy_city(b).unwrap();
        assert!(world.city(a).unwrap().available_links().is_empty());
    }

    #[test]
    fn test_destroy_does_not_clear_outgoing_of_destroyed_source() {
        // A -> B and B -> A; destroying A severs B's link into A, then
        // destroying B must not trip over A's stale reverse entry.
        let mut world = InMemoryWorld::new();
        let a = world.add_city("A").unwrap();
        let b = world.add_city("B").unwrap();
        world.add_link(a, b, Direction::North).unwrap();
        world.add_link(b, a, Direction::South).unwrap();

        world.destroy_city(a).unwrap();
        world.destroy_city(b).unwrap();
        assert!(world.alive_cities().is_empty());
    }

    #[test]
    fn test_destroy_unknown_city_fails() {
        let mut world = InMemoryWorld::new();
        assert!(matches!(
            world.destroy_city(CityId(0)),
            Err(SimError::UnknownCity)
        ));
    }

    #[test]
    fn test_add_alien_rejects_duplicates() {
        let mut world = InMemoryWorld::new();
        world.add_alien(AlienId(1)).unwrap();
        assert!(matches!(
            world.add_alien(AlienId(1)),
            Err(SimError::DuplicateAlien)
        ));
    }

    #[test]
    fn test_move_alien_updates_occupancy() {
        let (mut world, a, b) = two_linked_cities();
        world.add_alien(AlienId(1)).unwrap();

        world.move_alien(AlienId(1), a).unwrap();
        assert_eq!(world.alien_at(a).unwrap(), Some(AlienId(1)));

        world.move_alien(AlienId(1), b).unwrap();
        // The previous occupancy entry is gone, never duplicated.
        assert_eq!(world.alien_at(a).unwrap(), None);
        assert_eq!(world.alien_at(b).unwrap(), Some(AlienId(1)));
        assert_eq!(world.alien(AlienId(1)).unwrap().city(), Some(b));
    }

    #[test]
    fn test_move_alien_rejects_unknown_parties() {
        let (mut world, a, _) = two_linked_cities();
        assert!(matches!(
            world.move_alien(AlienId(1), a),
            Err(SimError::UnknownAlien)
        ));
        world.add_alien(AlienId(1)).unwrap();
        assert!(matches!(
            world.move_alien(AlienId(1), CityId(99)),
            Err(SimError::UnknownCity)
        ));
    }

    #[test]
    fn test_trap_alien_clears_occupancy_keeps_city() {
        let (mut world, a, _) = two_linked_cities();
        world.add_alien(AlienId(1)).unwrap();
        world.move_alien(AlienId(1), a).unwrap();

        world.trap_alien(AlienId(1)).unwrap();
        assert!(world.is_trapped(AlienId(1)).unwrap());
        assert_eq!(world.alien_at(a).unwrap(), None);
        assert_eq!(world.alien(AlienId(1)).unwrap().city(), Some(a));
        assert!(world.untrapped_aliens().is_empty());
    }

    #[test]
    fn test_trap_unregistered_alien_is_missing() {
        let mut world = InMemoryWorld::new();
        assert!(matches!(
            world.trap_alien(AlienId(5)),
            Err(SimError::MissingAlien)
        ));
    }

    #[test]
    fn test_is_trapped_unregistered_reports_false() {
        let world = InMemoryWorld::new();
        assert!(!world.is_trapped(AlienId(5)).unwrap());
    }

    #[test]
    fn test_alien_at_dead_city_is_unknown() {
        let (mut world, a, _) = two_linked_cities();
        world.destroy_city(a).unwrap();
        assert!(matches!(world.alien_at(a), Err(SimError::UnknownCity)));
    }

    #[test]
    fn test_untrapped_aliens_in_id_order() {
        let mut world = InMemoryWorld::new();
        for id in [3, 1, 2] {
            world.add_alien(AlienId(id)).unwrap();
        }
        world.trap_alien(AlienId(2)).unwrap();
        assert_eq!(world.untrapped_aliens(), vec![AlienId(1), AlienId(3)]);
    }
}
