//! # Push Identifiers
//!
//! Record keys in the realtime database are 20-character "push ids": eight
//! characters encoding the creation time in milliseconds followed by twelve
//! random characters. Keys from one generator sort in creation order, even
//! when several are produced within the same millisecond.

use chrono::Utc;
use rand::Rng;
use std::sync::Mutex;

/// The 64-character alphabet, in ASCII order so that keys sort lexicographically.
const PUSH_CHARS: &[u8; 64] = b"-0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ_abcdefghijklmnopqrstuvwxyz";

const TIMESTAMP_LEN: usize = 8;
const RANDOM_LEN: usize = 12;

#[derive(Debug, Default)]
struct PushState {
    last_ms: i64,
    last_random: [u8; RANDOM_LEN],
}

/// Generates unique, time-ordered record keys.
#[derive(Debug, Default)]
pub struct PushIdGenerator {
    state: Mutex<PushState>,
}

impl PushIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generates a key for the current wall-clock time.
    pub fn next_id(&self) -> String {
        self.next_id_at(Utc::now().timestamp_millis())
    }

    /// Generates a key as if the current time were `now_ms`.
    ///
    /// A clock that moves backwards is clamped to the last seen time, so keys
    /// from one generator never go backwards.
    pub fn next_id_at(&self, now_ms: i64) -> String {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        let now_ms = now_ms.max(state.last_ms);
        state.generate(now_ms)
    }

    /// Generates a key together with a write timestamp that is strictly greater
    /// than every timestamp this generator handed out before.
    pub fn next_stamped(&self) -> (String, i64) {
        self.next_stamped_at(Utc::now().timestamp_millis())
    }

    pub fn next_stamped_at(&self, now_ms: i64) -> (String, i64) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        let stamp = if now_ms <= state.last_ms {
            state.last_ms + 1
        } else {
            now_ms
        };
        (state.generate(stamp), stamp)
    }
}

impl PushState {
    fn generate(&mut self, now_ms: i64) -> String {
        if now_ms == self.last_ms {
            increment(&mut self.last_random);
        } else {
            let mut rng = rand::thread_rng();
            for slot in self.last_random.iter_mut() {
                *slot = rng.gen_range(0..64);
            }
        }
        self.last_ms = now_ms;

        let mut id = String::with_capacity(TIMESTAMP_LEN + RANDOM_LEN);
        id.push_str(&encode_timestamp(now_ms));
        id.extend(
            self.last_random
                .iter()
                .map(|&digit| PUSH_CHARS[digit as usize] as char),
        );
        id
    }
}

fn encode_timestamp(ms: i64) -> String {
    let mut remaining = ms.max(0) as u64;
    let mut chars = [b'-'; TIMESTAMP_LEN];
    for slot in chars.iter_mut().rev() {
        *slot = PUSH_CHARS[(remaining % 64) as usize];
        remaining /= 64;
    }
    chars.iter().map(|&c| c as char).collect()
}

// Adds one to the base-64 random suffix, carrying from the right.
fn increment(digits: &mut [u8; RANDOM_LEN]) {
    for digit in digits.iter_mut().rev() {
        if *digit == 63 {
            *digit = 0;
        } else {
            *digit += 1;
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_have_expected_shape() {
        let generator = PushIdGenerator::new();
        let id = generator.next_id();
        assert_eq!(id.len(), 20);
        assert!(id.bytes().all(|b| PUSH_CHARS.contains(&b)));
    }

    #[test]
    fn ids_within_the_same_millisecond_are_increasing() {
        let generator = PushIdGenerator::new();
        let ids: Vec<String> = (0..50).map(|_| generator.next_id_at(1_700_000_000_000)).collect();
        for pair in ids.windows(2) {
            assert!(pair[0] < pair[1], "{} should sort before {}", pair[0], pair[1]);
            assert_eq!(pair[0][..8], pair[1][..8]);
        }
    }

    #[test]
    fn later_timestamps_sort_later_even_if_clock_goes_back() {
        let generator = PushIdGenerator::new();
        let first = generator.next_id_at(1_700_000_000_000);
        let second = generator.next_id_at(1_700_000_000_500);
        let third = generator.next_id_at(1_600_000_000_000);
        assert!(first < second);
        assert!(second < third);
    }

    #[test]
    fn stamps_are_strictly_increasing() {
        let generator = PushIdGenerator::new();
        let (first_id, first) = generator.next_stamped_at(1_000);
        let (second_id, second) = generator.next_stamped_at(1_000);
        let (_, third) = generator.next_stamped_at(900);
        assert_eq!(first, 1_000);
        assert_eq!(second, 1_001);
        assert_eq!(third, 1_002);
        assert!(first_id < second_id);
    }

    #[test]
    fn timestamp_prefix_is_base64_encoded() {
        assert_eq!(encode_timestamp(0), "--------");
        assert_eq!(encode_timestamp(63), "-------z");
        assert_eq!(encode_timestamp(64), "------0-");
    }
}
