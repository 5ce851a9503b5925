//! Daily challenge generation and streak bookkeeping for the challenges tab.
//!
//! Each day gets one challenge per difficulty, drawn randomly from the pools
//! in `seeds`, with points/XP/streak-bonus fixed per difficulty. Challenges
//! expire at the next midnight (UTC).

use chrono::{DateTime, Duration, TimeZone, Utc};
use rand::Rng;

use crate::domain::{ChallengeType, DailyChallenge, Difficulty};
use crate::seeds::{ChallengePoolEntry, GRAMMAR_POOL, SPEAKING_POOL, VOCABULARY_POOL};
use crate::util::Clock;

fn points_for(difficulty: Difficulty) -> u32 {
    match difficulty {
        Difficulty::Easy => 10,
        Difficulty::Medium => 15,
        Difficulty::Hard => 20,
    }
}

fn xp_for(difficulty: Difficulty) -> u32 {
    match difficulty {
        Difficulty::Easy => 50,
        Difficulty::Medium => 75,
        Difficulty::Hard => 100,
    }
}

fn streak_bonus_for(difficulty: Difficulty) -> u32 {
    match difficulty {
        Difficulty::Easy => 5,
        Difficulty::Medium => 10,
        Difficulty::Hard => 15,
    }
}

/// Midnight at the start of the next day, in UTC.
fn next_midnight(now: DateTime<Utc>) -> DateTime<Utc> {
    let tomorrow = now.date_naive() + Duration::days(1);
    Utc.from_utc_datetime(&tomorrow.and_hms_opt(0, 0, 0).expect("midnight is valid"))
}

fn pick(
    pool: &[ChallengePoolEntry],
    id: &str,
    challenge_type: ChallengeType,
    difficulty: Difficulty,
    deadline: DateTime<Utc>,
) -> DailyChallenge {
    let entry = &pool[rand::thread_rng().gen_range(0..pool.len())];
    DailyChallenge {
        id: id.into(),
        title: entry.title.into(),
        description: entry.description.into(),
        challenge_type,
        difficulty,
        requirements: entry.requirements,
        points: points_for(difficulty),
        xp_reward: xp_for(difficulty),
        streak_bonus: streak_bonus_for(difficulty),
        completed: false,
        deadline,
    }
}

/// One challenge of each difficulty: easy vocabulary, medium grammar,
/// hard speaking. Ids are fixed so completion records can refer to them.
pub fn generate_daily(clock: &dyn Clock) -> Vec<DailyChallenge> {
    let deadline = next_midnight(clock.now());
    vec![
        pick(VOCABULARY_POOL, "1", ChallengeType::Vocabulary, Difficulty::Easy, deadline),
        pick(GRAMMAR_POOL, "2", ChallengeType::Grammar, Difficulty::Medium, deadline),
        pick(SPEAKING_POOL, "3", ChallengeType::Speaking, Difficulty::Hard, deadline),
    ]
}

/// True when the stored set predates today's midnight and must be regenerated.
pub fn should_reset(last_update: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    let last_midnight =
        Utc.from_utc_datetime(&now.date_naive().and_hms_opt(0, 0, 0).expect("midnight is valid"));
    last_update < last_midnight
}

/// Day-streak transition: completing today's set increments; a completion
/// yesterday preserves; anything older resets to zero.
pub fn next_streak(
    current: u32,
    completed_today: bool,
    last_completion: DateTime<Utc>,
    now: DateTime<Utc>,
) -> u32 {
    if completed_today {
        return current + 1;
    }
    let yesterday = (now - Duration::days(1)).date_naive();
    if last_completion.date_naive() == yesterday {
        return current;
    }
    0
}

/// Extra 10 points for every 5 days of streak.
pub fn streak_bonus(streak: u32) -> u32 {
    streak / 5 * 10
}

pub fn all_completed(challenges: &[DailyChallenge]) -> bool {
    challenges.iter().all(|c| c.completed)
}

pub fn total_possible_points(challenges: &[DailyChallenge]) -> u32 {
    challenges.iter().map(|c| c.points + c.streak_bonus).sum()
}
