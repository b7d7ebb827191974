use chrono::{DateTime, Utc};

/// Whole minutes elapsed between `since` and `now`, never negative.
#[inline]
pub fn minutes_between(since: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - since).num_minutes().max(0)
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    #[test]
    fn counts_whole_minutes() {
        let now = Utc::now();
        assert_eq!(minutes_between(now - Duration::seconds(150), now), 2);
        assert_eq!(minutes_between(now - Duration::minutes(12), now), 12);
    }

    #[test]
    fn future_timestamps_clamp_to_zero() {
        let now = Utc::now();
        assert_eq!(minutes_between(now + Duration::minutes(5), now), 0);
    }
}
