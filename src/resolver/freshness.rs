use chrono::{DateTime, Utc};
use std::time::Duration;

use crate::db::WeatherRow;

/// A cached weather set is stale once its oldest row is older than `ttl`.
///
/// Rows stamped in the future (clock skew) never count as stale.
pub(crate) fn is_stale(rows: &[WeatherRow], ttl: Duration, now: DateTime<Utc>) -> bool {
    rows.iter()
        .map(|row| row.created_at)
        .min()
        .and_then(|oldest| (now - oldest).to_std().ok())
        .is_some_and(|age| age > ttl)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    fn row(id: i64, created_at: DateTime<Utc>) -> WeatherRow {
        WeatherRow {
            id,
            location_id: 1,
            forecast: "Clear.".to_string(),
            time: "Mon Mar 04 2019".to_string(),
            created_at,
        }
    }

    #[test]
    fn oldest_row_decides() {
        let now = Utc::now();
        let ttl = Duration::from_secs(60);
        let rows = vec![
            row(1, now - TimeDelta::seconds(10)),
            row(2, now - TimeDelta::seconds(61)),
        ];
        assert!(is_stale(&rows, ttl, now));
        assert!(!is_stale(&rows[..1], ttl, now));
    }

    #[test]
    fn empty_and_future_sets_are_fresh() {
        let now = Utc::now();
        assert!(!is_stale(&[], Duration::ZERO, now));
        assert!(!is_stale(
            &[row(1, now + TimeDelta::seconds(30))],
            Duration::ZERO,
            now
        ));
    }
}
