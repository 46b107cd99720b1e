use crate::model::structures::{
    activity::{ActivitySession, SpeedCounts},
    delta_record::{DeltaRecord, ZeroDeltaReason},
    month::Month,
    observation::{PlatformRatingPoint, RatingObservation},
    rating_level::RatingBrackets
};
use crate::model::constants::STANDARD_GAME_TYPE;
use chrono::NaiveDate;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub fn generate_observation(user_id: &str, month: Month, raw_rating: i64, games: u32) -> RatingObservation {
    RatingObservation {
        user_id: user_id.to_string(),
        month,
        raw_rating,
        games
    }
}

/// A random walk of federation observations spanning `n_months` months from `start`.
///
/// Interior months are dropped at random to leave gaps; the first and last
/// months are always present.
pub fn generate_observations(user_id: &str, start: Month, n_months: usize, seed: u64) -> Vec<RatingObservation> {
    if n_months < 1 {
        panic!("Number of months must be at least 1");
    }

    // Initialize seeded RNG for reproducible results
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut rating: i64 = rng.random_range(1200..=2400);

    Month::range_inclusive(start, Month::new(9999, 12).unwrap())
        .take(n_months)
        .enumerate()
        .filter_map(|(i, month)| {
            rating = (rating + rng.random_range(-40..=40)).max(0);
            let keep = i == 0 || i == n_months - 1 || rng.random_bool(0.7);
            let games = if rng.random_bool(0.3) { 0 } else { rng.random_range(1..=12) };

            keep.then(|| generate_observation(user_id, month, rating, games))
        })
        .collect()
}

pub fn generate_platform_point(user_id: &str, game_type: &str, date: NaiveDate, rating: i64) -> PlatformRatingPoint {
    PlatformRatingPoint {
        user_id: user_id.to_string(),
        game_type: game_type.to_string(),
        date,
        rating
    }
}

pub fn generate_session(user: &str, year: i32, month: u32, counts: SpeedCounts) -> ActivitySession {
    ActivitySession {
        user: user.to_string(),
        year,
        month,
        counts
    }
}

/// A standard time-control delta whose level comes from the federation table.
pub fn generate_delta_record(user_id: &str, month: Month, start: i64, end: i64, games: u32) -> DeltaRecord {
    let delta_elo = end - start;

    DeltaRecord {
        user_id: user_id.to_string(),
        game_type: STANDARD_GAME_TYPE.to_string(),
        month,
        start_rating: start,
        end_rating: end,
        delta_elo,
        rating_level: RatingBrackets::fide().level(start).to_string(),
        games_played: games,
        month_effective: true,
        month_active: games > 0,
        zero_delta_reason: ZeroDeltaReason::classify(delta_elo, games)
    }
}

/// `n` delta records spread over 50 users and a few years, for benchmarks.
pub fn generate_delta_records(n: usize, seed: u64) -> Vec<DeltaRecord> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    (0..n)
        .map(|i| {
            let month = Month::new(rng.random_range(2019..=2024), rng.random_range(1..=12)).unwrap();
            let start = rng.random_range(800..=2600);
            let end = start + rng.random_range(-60..=60);
            let games = if rng.random_bool(0.25) { 0 } else { rng.random_range(1..=10) };

            generate_delta_record(&format!("user{}", i % 50), month, start, end, games)
        })
        .collect()
}
