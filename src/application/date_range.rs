// Date-range selection for dashboard rollups.
//
// Presets are wall-clock offsets from now; a custom range is normalized to
// whole UTC days ([startDay 00:00:00, endDay 23:59:59.999]) with reversed
// endpoints swapped. Filtering is on job creation time, inclusive.

use chrono::{DateTime, Datelike, Duration, TimeZone, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateRange {
    Last7Days,
    Last30Days,
    Last90Days,
    ThisMonth,
    AllTime,
    Custom { start_ms: i64, end_ms: i64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeBounds {
    pub start_ms: i64,
    pub end_ms: i64,
}

impl RangeBounds {
    pub fn contains(&self, timestamp_ms: i64) -> bool {
        timestamp_ms >= self.start_ms && timestamp_ms <= self.end_ms
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown date range: {0}")]
pub struct UnknownRange(pub String);

impl std::str::FromStr for DateRange {
    type Err = UnknownRange;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "7d" => Ok(DateRange::Last7Days),
            "30d" => Ok(DateRange::Last30Days),
            "90d" => Ok(DateRange::Last90Days),
            "thisMonth" => Ok(DateRange::ThisMonth),
            "all" => Ok(DateRange::AllTime),
            other => Err(UnknownRange(other.to_string())),
        }
    }
}

fn start_of_day_ms(ms: i64) -> i64 {
    let day = Utc.timestamp_millis_opt(ms).single().unwrap_or_default().date_naive();
    Utc.from_utc_datetime(&day.and_hms_opt(0, 0, 0).unwrap_or_default())
        .timestamp_millis()
}

fn end_of_day_ms(ms: i64) -> i64 {
    let day = Utc.timestamp_millis_opt(ms).single().unwrap_or_default().date_naive();
    Utc.from_utc_datetime(&day.and_hms_milli_opt(23, 59, 59, 999).unwrap_or_default())
        .timestamp_millis()
}

impl DateRange {
    pub fn bounds_at(&self, now: DateTime<Utc>) -> RangeBounds {
        let now_ms = now.timestamp_millis();
        match *self {
            DateRange::Custom { start_ms, end_ms } => {
                let (lo, hi) = if start_ms <= end_ms {
                    (start_ms, end_ms)
                } else {
                    (end_ms, start_ms)
                };
                RangeBounds {
                    start_ms: start_of_day_ms(lo),
                    end_ms: end_of_day_ms(hi),
                }
            }
            DateRange::AllTime => RangeBounds { start_ms: 0, end_ms: now_ms },
            DateRange::Last7Days => RangeBounds {
                start_ms: now_ms - Duration::days(7).num_milliseconds(),
                end_ms: end_of_day_ms(now_ms),
            },
            DateRange::Last30Days => RangeBounds {
                start_ms: now_ms - Duration::days(30).num_milliseconds(),
                end_ms: end_of_day_ms(now_ms),
            },
            DateRange::Last90Days => RangeBounds {
                start_ms: now_ms - Duration::days(90).num_milliseconds(),
                end_ms: end_of_day_ms(now_ms),
            },
            DateRange::ThisMonth => {
                let first = now
                    .date_naive()
                    .with_day(1)
                    .unwrap_or_else(|| now.date_naive());
                RangeBounds {
                    start_ms: Utc
                        .from_utc_datetime(&first.and_hms_opt(0, 0, 0).unwrap_or_default())
                        .timestamp_millis(),
                    end_ms: end_of_day_ms(now_ms),
                }
            }
        }
    }

    pub fn bounds(&self) -> RangeBounds {
        self.bounds_at(Utc::now())
    }
}
