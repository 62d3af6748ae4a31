//! Invasion Engine
//!
//! Drives the simulation: loads the map, spawns aliens into random cities,
//! runs the turn loop and prints the final report. The engine owns the
//! collision policy; the world only keeps its indices consistent.
//!
//! Everything random goes through the injected [`RandomSource`], so a
//! seeded run is fully reproducible and tests can script every decision.

use std::io::{BufRead, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::SimError;
use crate::map;
use crate::rng::RandomSource;
use crate::types::{AlienId, CityId, Direction};
use crate::world::World;

/// Engine lifecycle. Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Unloaded,
    Loaded,
    Running,
    Finished,
}

/// The simulation driver.
pub struct Engine<W, R, O> {
    world: W,
    rng: R,
    out: O,
    num_aliens: u32,
    max_moves: u64,
    total_moves: u64,
    state: EngineState,
    cancel: Arc<AtomicBool>,
}

impl<W: World, R: RandomSource, O: Write> Engine<W, R, O> {
    pub fn new(num_aliens: u32, max_moves: u64, world: W, rng: R, out: O) -> Self {
        Self {
            world,
            rng,
            out,
            num_aliens,
            max_moves,
            total_moves: 0,
            state: EngineState::Unloaded,
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Shared flag for courtesy cancellation, checked once per loop
    /// iteration. An in-flight step is never interrupted.
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn total_moves(&self) -> u64 {
        self.total_moves
    }

    pub fn world(&self) -> &W {
        &self.world
    }

    pub fn output(&self) -> &O {
        &self.out
    }

    /// Parses the map into the world, then spawns the configured number of
    /// aliens into uniformly random alive cities, applying the normal
    /// collision rule to each placement. If spawn collisions wipe out every
    /// city, the remaining aliens are simply never placed.
    pub fn load(&mut self, reader: impl BufRead) -> Result<(), SimError> {
        map::load_map(&mut self.world, reader)?;

        for number in 1..=self.num_aliens {
            let alien = AlienId(number);
            self.world.add_alien(alien)?;

            let alive = self.world.alive_cities();
            if alive.is_empty() {
                break;
            }

            let city = alive[self.rng.pick(alive.len())?];
            self.move_alien_to_city(alien, city)?;
        }

        self.state = EngineState::Loaded;
        Ok(())
    }

    /// Whether another step is possible: the move budget has room, at least
    /// one alien is untrapped and at least one city is alive.
    pub fn has_next_move(&self) -> Result<bool, SimError> {
        if self.total_moves >= self.max_moves {
            return Ok(false);
        }
        if self.world.untrapped_aliens().is_empty() {
            return Ok(false);
        }
        if self.world.alive_cities().is_empty() {
            return Ok(false);
        }
        Ok(true)
    }

    /// Performs one step: every untrapped alien gets one chance to wander.
    /// The move counter increments once per step, not once per alien.
    pub fn do_next_move(&mut self) -> Result<(), SimError> {
        self.total_moves += 1;

        for alien in self.world.untrapped_aliens() {
            // An earlier move this step may have trapped this alien.
            if self.world.is_trapped(alien)? {
                continue;
            }

            let current = self
                .world
                .alien(alien)
                .ok_or(SimError::UnknownAlien)?
                .city()
                .ok_or(SimError::MissingCity)?;
            let links = self
                .world
                .city(current)
                .ok_or(SimError::UnknownCity)?
                .available_links();

            // No outgoing links: the alien is stuck in place, never moved
            // and never trapped.
            if links.is_empty() {
                continue;
            }

            let (direction, destination) = links[self.rng.pick(links.len())?];
            tracing::debug!(alien = alien.0, direction = %direction, "alien wanders");
            self.move_alien_to_city(alien, destination)?;
        }

        Ok(())
    }

    /// Runs the whole simulation: load, then step until exhaustion, then
    /// report. Cancellation aborts without a final report.
    pub fn run(&mut self, reader: impl BufRead) -> Result<(), SimError> {
        self.load(reader)?;
        self.state = EngineState::Running;

        loop {
            if self.cancel.load(Ordering::Relaxed) {
                tracing::warn!("simulation cancelled");
                return Err(SimError::Cancelled);
            }

            if !self.has_next_move()? {
                break;
            }
            self.do_next_move()?;
        }

        self.finalize()
    }

    /// Prints the end-of-run report: banner, surviving city count and each
    /// surviving city with its remaining links.
    pub fn finalize(&mut self) -> Result<(), SimError> {
        writeln!(self.out)?;
        writeln!(self.out, "===================")?;
        writeln!(self.out, "Simulation Finished")?;
        writeln!(self.out, "===================")?;

        let cities = self.world.alive_cities();
        writeln!(self.out, "Remain Cities: {}", cities.len())?;
        writeln!(self.out)?;

        for city in cities {
            let line = self.render_city(city)?;
            writeln!(self.out, "{}", line)?;
        }

        self.state = EngineState::Finished;
        Ok(())
    }

    /// Attempts to place an alien in a city, applying the collision rule:
    /// an empty city is occupied, the alien's own city is a no-op, and any
    /// other occupant means both aliens are trapped and the city destroyed.
    fn move_alien_to_city(&mut self, alien: AlienId, city: CityId) -> Result<bool, SimError> {
        match self.world.alien_at(city)? {
            Some(occupant) if occupant == alien => Ok(false),
            None => {
                self.world.move_alien(alien, city)?;
                Ok(false)
            }
            Some(occupant) => {
                let name = self
                    .world
                    .city(city)
                    .ok_or(SimError::UnknownCity)?
                    .name()
                    .to_string();

                self.world.trap_alien(alien)?;
                self.world.trap_alien(occupant)?;
                self.world.destroy_city(city)?;

                tracing::debug!(city = %name, "city destroyed");
                writeln!(
                    self.out,
                    "{} has been destroyed by {} and {}",
                    name, alien, occupant
                )?;
                Ok(true)
            }
        }
    }

    /// Renders a city as `Name[ north=N][ east=E][ south=S][ west=W]`.
    fn render_city(&self, city: CityId) -> Result<String, SimError> {
        let city = self.world.city(city).ok_or(SimError::UnknownCity)?;
        let mut line = city.name().to_string();
        for direction in Direction::ALL {
            if let Some(target) = city.link(direction) {
                let target = self.world.city(target).ok_or(SimError::UnknownCity)?;
                line.push_str(&format!(" {}={}", direction, target.name()));
            }
        }
        Ok(line)
    }
}
