use std::sync::Arc;

use chrono::{DateTime, Utc};
use mockable::Clock;

/// A point in time paired with the identifier derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Stamp {
    pub millis: i64,
    pub at: DateTime<Utc>,
}

/// Issues strictly increasing millisecond stamps from an injected clock.
///
/// Two events in the same millisecond, or a clock that steps backwards, still
/// get distinct, ordered identifiers: the next stamp is never below the last
/// one plus one.
pub(crate) struct IdSource {
    clock: Arc<dyn Clock>,
    last: Option<i64>,
}

impl IdSource {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock, last: None }
    }

    /// Returns the next stamp, strictly above `floor` when given.
    pub fn next(&mut self, floor: Option<i64>) -> Stamp {
        let at = self.clock.utc();
        let lower = self.last.max(floor).map_or(i64::MIN, |last| last.saturating_add(1));
        let millis = at.timestamp_millis().max(lower);
        self.last = Some(millis);
        Stamp { millis, at }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};

    struct FrozenClock(DateTime<Utc>);

    impl Clock for FrozenClock {
        fn local(&self) -> DateTime<Local> {
            self.0.with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            self.0
        }
    }

    fn frozen() -> IdSource {
        let at = Utc
            .with_ymd_and_hms(2026, 10, 19, 9, 0, 0)
            .single()
            .expect("valid fixture timestamp");
        IdSource::new(Arc::new(FrozenClock(at)))
    }

    #[test]
    fn stamps_increase_under_a_frozen_clock() {
        let mut ids = frozen();
        let first = ids.next(None);
        let second = ids.next(None);
        assert_eq!(first.millis, first.at.timestamp_millis());
        assert_eq!(second.millis, first.millis + 1);
        assert_eq!(second.at, first.at);
    }

    #[test]
    fn floor_wins_over_an_earlier_clock() {
        let mut ids = frozen();
        let floor = ids.next(None).millis + 1_000;
        assert_eq!(ids.next(Some(floor)).millis, floor + 1);
    }
}
