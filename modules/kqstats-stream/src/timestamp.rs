//! Resolves the optional epoch prefix into an absolute time.

use chrono::{DateTime, Utc};

const NANOS_PER_SECOND: i64 = 1_000_000_000;

/// Source of "now". Production reads the wall clock; tests pin it.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

/// Resolve an epoch field against `now`.
///
/// The value is read as seconds unless scaling it to nanoseconds overflows
/// `i64`, in which case it is read as milliseconds. 10-digit cabinet stamps are
/// seconds, 13-digit ones milliseconds. Anything past `now` is clamped to `now`.
pub fn resolve(epoch: Option<&str>, now: DateTime<Utc>) -> DateTime<Utc> {
    let Some(raw) = epoch else {
        return now;
    };
    let Ok(value) = raw.parse::<i64>() else {
        return now;
    };

    let resolved = match value.checked_mul(NANOS_PER_SECOND) {
        Some(nanos) => Some(DateTime::from_timestamp_nanos(nanos)),
        None => DateTime::from_timestamp_millis(value),
    };

    match resolved {
        Some(ts) if ts <= now => ts,
        // Out of chrono's range is necessarily far in the future here.
        _ => now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn absent_epoch_is_now() {
        assert_eq!(resolve(None, now()), now());
    }

    #[test]
    fn unparseable_epoch_is_now() {
        assert_eq!(resolve(Some("99999999999999999999999"), now()), now());
        assert_eq!(resolve(Some(""), now()), now());
    }

    #[test]
    fn ten_digits_are_seconds() {
        let ts = resolve(Some("1540058877"), now());
        assert_eq!(ts, Utc.timestamp_opt(1_540_058_877, 0).unwrap());
    }

    #[test]
    fn thirteen_digits_are_millis() {
        let ts = resolve(Some("1540058877411"), now());
        assert_eq!(ts, DateTime::from_timestamp_millis(1_540_058_877_411).unwrap());
    }

    #[test]
    fn future_is_clamped_to_now() {
        // 2100-01-01 in seconds
        assert_eq!(resolve(Some("4102444800"), now()), now());
        // 2100-01-01 in millis
        assert_eq!(resolve(Some("4102444800000"), now()), now());
    }

    #[test]
    fn exactly_now_is_kept() {
        let secs = now().timestamp().to_string();
        assert_eq!(resolve(Some(&secs), now()), now());
    }

    #[test]
    fn fixed_clock_is_stable() {
        let clock = FixedClock(now());
        assert_eq!(clock.now(), clock.now());
        assert_eq!((&clock).now(), now());
    }
}
