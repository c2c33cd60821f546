//! d100 rolls
//!
//! Resolution draws through [`Roller`] so tests can script exact rolls.

use std::collections::VecDeque;

use rand::Rng;

/// Source of d100 rolls
pub trait Roller {
    /// A uniform roll in 1..=100
    fn roll_d100(&mut self) -> i32;
}

/// Rolls from a `rand` generator
#[derive(Debug, Clone)]
pub struct RngRoller<R> {
    rng: R,
}

impl<R: Rng> RngRoller<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngRoller<rand::rngs::ThreadRng> {
    /// Roller backed by the thread-local generator
    pub fn thread() -> Self {
        Self::new(rand::rng())
    }
}

impl<R: Rng> Roller for RngRoller<R> {
    fn roll_d100(&mut self) -> i32 {
        self.rng.random_range(1..=100)
    }
}

/// Plays back a fixed sequence of rolls, then repeats the last one
#[derive(Debug, Clone, Default)]
pub struct ScriptedRoller {
    rolls: VecDeque<i32>,
    last: i32,
}

impl ScriptedRoller {
    pub fn new(rolls: impl IntoIterator<Item = i32>) -> Self {
        Self {
            rolls: rolls.into_iter().collect(),
            last: 50,
        }
    }

    /// Rolls not yet consumed
    pub fn remaining(&self) -> usize {
        self.rolls.len()
    }
}

impl Roller for ScriptedRoller {
    fn roll_d100(&mut self) -> i32 {
        if let Some(roll) = self.rolls.pop_front() {
            self.last = roll;
        }
        self.last
    }
}
