//! Small utility helpers used across modules: clock abstraction and clamping.

use std::sync::Mutex;

use chrono::{DateTime, Utc};

/// Time source used by the session manager, trackers, and engines.
/// Injectable so expiry boundaries can be tested without sleeping.
pub trait Clock: Send + Sync {
  fn now(&self) -> DateTime<Utc>;

  /// Epoch milliseconds, the unit used for the persisted `session_expiry` key.
  fn now_ms(&self) -> i64 {
    self.now().timestamp_millis()
  }
}

/// Wall clock. The default everywhere outside tests.
pub struct SystemClock;

impl Clock for SystemClock {
  fn now(&self) -> DateTime<Utc> {
    Utc::now()
  }
}

/// A clock that reports whatever it was last set to.
/// Useful for tests and demos that need to cross the 24h session boundary.
pub struct ManualClock {
  now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
  pub fn new(now: DateTime<Utc>) -> Self {
    Self { now: Mutex::new(now) }
  }

  pub fn set(&self, now: DateTime<Utc>) {
    *self.now.lock().unwrap() = now;
  }

  pub fn advance(&self, delta: chrono::Duration) {
    let mut now = self.now.lock().unwrap();
    *now = *now + delta;
  }
}

impl Clock for ManualClock {
  fn now(&self) -> DateTime<Utc> {
    *self.now.lock().unwrap()
  }
}

/// Clamp a raw progress value into the `[0, 100]` range used by trackers.
pub fn clamp_progress(value: i64) -> u8 {
  value.clamp(0, 100) as u8
}

/// Log-safe truncation for large strings.
/// Avoids spamming logs with huge request/response payloads. The cut is moved
/// back to a char boundary so multibyte input never panics the slice.
pub fn trunc_for_log(s: &str, max: usize) -> String {
  if s.len() <= max {
    return s.to_string();
  }
  let mut cut = max;
  while !s.is_char_boundary(cut) {
    cut -= 1;
  }
  format!("{}… ({} bytes total)", &s[..cut], s.len())
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::Duration;

  #[test]
  fn clamp_covers_both_ends() {
    assert_eq!(clamp_progress(-5), 0);
    assert_eq!(clamp_progress(0), 0);
    assert_eq!(clamp_progress(42), 42);
    assert_eq!(clamp_progress(100), 100);
    assert_eq!(clamp_progress(150), 100);
  }

  #[test]
  fn truncation_respects_char_boundaries() {
    let short = "plain ascii";
    assert_eq!(trunc_for_log(short, 120), short);

    // Byte 120 lands inside the two-byte 'é'; the cut must back off to 119.
    let mut body = "a".repeat(119);
    body.push('é');
    body.push_str(" and more");
    let out = trunc_for_log(&body, 120);
    assert!(out.starts_with(&"a".repeat(119)));
    assert!(!out.contains('é'));
    assert!(out.ends_with(&format!("({} bytes total)", body.len())));
  }

  #[test]
  fn manual_clock_advances() {
    let clock = ManualClock::new(Utc::now());
    let before = clock.now_ms();
    clock.advance(Duration::hours(25));
    assert!(clock.now_ms() - before >= 25 * 3600 * 1000);
  }
}
