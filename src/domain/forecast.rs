// Forecast domain models
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

pub const HOURS_PER_DAY: usize = 24;

/// Hour range of a day shown on the chart, start inclusive and end exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayWindow {
    start_hour: usize,
    end_hour: usize,
}

#[derive(Debug, Error, PartialEq)]
pub enum WindowError {
    #[error("display window start hour {start} must be before end hour {end}")]
    Empty { start: usize, end: usize },
    #[error("display window end hour {0} is past the end of the day")]
    PastEndOfDay(usize),
}

impl DisplayWindow {
    pub fn new(start_hour: usize, end_hour: usize) -> Result<Self, WindowError> {
        if start_hour >= end_hour {
            return Err(WindowError::Empty {
                start: start_hour,
                end: end_hour,
            });
        }
        if end_hour > HOURS_PER_DAY {
            return Err(WindowError::PastEndOfDay(end_hour));
        }
        Ok(Self {
            start_hour,
            end_hour,
        })
    }

    pub fn start_hour(&self) -> usize {
        self.start_hour
    }

    pub fn end_hour(&self) -> usize {
        self.end_hour
    }

    pub fn hours(&self) -> usize {
        self.end_hour - self.start_hour
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum SnapshotError {
    #[error("yesterday has {yesterday} samples but today has {today}")]
    MisalignedSeries { yesterday: usize, today: usize },
    #[error("today has {samples} samples but {times} timestamps")]
    MisalignedTimes { samples: usize, times: usize },
    #[error("timestamp at index {0} does not follow the previous one")]
    TimesNotIncreasing(usize),
    #[error("sample at index {0} is not a finite number")]
    NonFiniteSample(usize),
}

/// One successful fetch: yesterday's and today's samples over the display
/// window, index-aligned by hour of day, plus the instants of today's samples.
///
/// Never mutated after construction; a newer fetch replaces the whole value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastSnapshot {
    yesterday: Vec<f64>,
    today: Vec<f64>,
    times: Vec<DateTime<Utc>>,
    fetched_at: DateTime<Utc>,
}

impl ForecastSnapshot {
    pub fn new(
        yesterday: Vec<f64>,
        today: Vec<f64>,
        times: Vec<DateTime<Utc>>,
        fetched_at: DateTime<Utc>,
    ) -> Result<Self, SnapshotError> {
        if yesterday.len() != today.len() {
            return Err(SnapshotError::MisalignedSeries {
                yesterday: yesterday.len(),
                today: today.len(),
            });
        }
        if times.len() != today.len() {
            return Err(SnapshotError::MisalignedTimes {
                samples: today.len(),
                times: times.len(),
            });
        }
        if let Some(i) = (1..times.len()).find(|&i| times[i] <= times[i - 1]) {
            return Err(SnapshotError::TimesNotIncreasing(i));
        }
        if let Some(i) = yesterday
            .iter()
            .zip(&today)
            .position(|(y, t)| !y.is_finite() || !t.is_finite())
        {
            return Err(SnapshotError::NonFiniteSample(i));
        }

        Ok(Self {
            yesterday,
            today,
            times,
            fetched_at,
        })
    }

    pub fn yesterday(&self) -> &[f64] {
        &self.yesterday
    }

    pub fn today(&self) -> &[f64] {
        &self.today
    }

    pub fn times(&self) -> &[DateTime<Utc>] {
        &self.times
    }

    pub fn len(&self) -> usize {
        self.today.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Strict: an unchanged temperature counts as cooler.
    pub fn is_warmer(&self, index: usize) -> bool {
        self.today[index] > self.yesterday[index]
    }

    pub fn extremes(&self) -> Option<Extremes> {
        Extremes::of(&self.today)
    }
}

/// Indices of the highest and lowest sample. The first occurrence wins ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extremes {
    pub max_index: usize,
    pub min_index: usize,
}

impl Extremes {
    pub fn of(samples: &[f64]) -> Option<Self> {
        let first = *samples.first()?;
        let (mut max_index, mut max) = (0, first);
        let (mut min_index, mut min) = (0, first);

        for (i, &value) in samples.iter().enumerate().skip(1) {
            if value > max {
                max_index = i;
                max = value;
            }
            if value < min {
                min_index = i;
                min = value;
            }
        }

        Some(Self {
            max_index,
            min_index,
        })
    }
}
