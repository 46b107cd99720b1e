use std::ops::AddAssign;

use strum::IntoEnumIterator;

use super::speed::Speed;

/// Games played per speed category. Counts saturate at `u64::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpeedCounts {
    pub ultrabullet: u64,
    pub bullet: u64,
    pub blitz: u64,
    pub rapid: u64
}

impl SpeedCounts {
    pub fn get(&self, speed: Speed) -> u64 {
        match speed {
            Speed::UltraBullet => self.ultrabullet,
            Speed::Bullet => self.bullet,
            Speed::Blitz => self.blitz,
            Speed::Rapid => self.rapid
        }
    }

    fn slot(&mut self, speed: Speed) -> &mut u64 {
        match speed {
            Speed::UltraBullet => &mut self.ultrabullet,
            Speed::Bullet => &mut self.bullet,
            Speed::Blitz => &mut self.blitz,
            Speed::Rapid => &mut self.rapid
        }
    }

    pub fn add(&mut self, speed: Speed, games: u64) {
        let slot = self.slot(speed);
        *slot = slot.saturating_add(games);
    }

    /// Games in the fast formats (ultrabullet, bullet and blitz)
    pub fn fast_games(&self) -> u64 {
        Speed::iter()
            .filter(Speed::is_fast)
            .fold(0, |acc, speed| acc.saturating_add(self.get(speed)))
    }

    pub fn total(&self) -> u64 {
        Speed::iter().fold(0, |acc, speed| acc.saturating_add(self.get(speed)))
    }
}

impl AddAssign for SpeedCounts {
    fn add_assign(&mut self, other: SpeedCounts) {
        for speed in Speed::iter() {
            self.add(speed, other.get(speed));
        }
    }
}

/// One activity interval from the platform feed, bucketed by its UTC start.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivitySession {
    pub user: String,
    pub year: i32,
    pub month: u32,
    pub counts: SpeedCounts
}
