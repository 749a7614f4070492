use crate::errors::{AppError, AppResult};
use crate::utils::time::{MINUTES_PER_DAY, format_minute_of_day, parse_minute_of_day};
use serde::Serialize;

/// Break inside a working day, `[start, end)` in minutes of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BreakWindow {
    pub start: u16,
    pub end: u16,
}

impl BreakWindow {
    pub fn contains(&self, minute: u16) -> bool {
        minute >= self.start && minute < self.end
    }
}

/// Daily operating window of a charger or a service.
///
/// Fields are private so every value goes through [`WorkingHours::new`]:
/// `start < end`, all minutes below 1440 and, when a break exists,
/// `start <= break.start < break.end <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WorkingHours {
    start: u16,
    end: u16,
    #[serde(rename = "break")]
    pause: Option<BreakWindow>,
}

impl WorkingHours {
    pub fn new(start: u16, end: u16, pause: Option<(u16, u16)>) -> AppResult<Self> {
        for m in [Some(start), Some(end), pause.map(|p| p.0), pause.map(|p| p.1)]
            .into_iter()
            .flatten()
        {
            if m >= MINUTES_PER_DAY {
                return Err(AppError::InvalidWorkingHours(format!(
                    "minute {m} is outside the day"
                )));
            }
        }

        if start >= end {
            return Err(AppError::InvalidWorkingHours(format!(
                "opening {} must be before closing {}",
                format_minute_of_day(start),
                format_minute_of_day(end)
            )));
        }

        let pause = match pause {
            Some((bs, be)) => {
                if !(start <= bs && bs < be && be <= end) {
                    return Err(AppError::InvalidWorkingHours(format!(
                        "break {}-{} must lie inside {}-{}",
                        format_minute_of_day(bs),
                        format_minute_of_day(be),
                        format_minute_of_day(start),
                        format_minute_of_day(end)
                    )));
                }
                Some(BreakWindow { start: bs, end: be })
            }
            None => None,
        };

        Ok(Self { start, end, pause })
    }

    /// Build from `HH:MM` strings. Break bounds must be given together.
    pub fn parse(
        start: &str,
        end: &str,
        break_start: Option<&str>,
        break_end: Option<&str>,
    ) -> AppResult<Self> {
        let pause = match (break_start, break_end) {
            (Some(bs), Some(be)) => Some((parse_minute_of_day(bs)?, parse_minute_of_day(be)?)),
            (None, None) => None,
            _ => {
                return Err(AppError::InvalidWorkingHours(
                    "break start and break end must be given together".into(),
                ));
            }
        };
        Self::new(parse_minute_of_day(start)?, parse_minute_of_day(end)?, pause)
    }

    pub fn start(&self) -> u16 {
        self.start
    }

    pub fn end(&self) -> u16 {
        self.end
    }

    pub fn pause(&self) -> Option<BreakWindow> {
        self.pause
    }

    pub fn in_break(&self, minute: u16) -> bool {
        self.pause.is_some_and(|p| p.contains(minute))
    }
}

impl std::fmt::Display for WorkingHours {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}-{}",
            format_minute_of_day(self.start),
            format_minute_of_day(self.end)
        )?;
        if let Some(p) = self.pause {
            write!(
                f,
                " (break {}-{})",
                format_minute_of_day(p.start),
                format_minute_of_day(p.end)
            )?;
        }
        Ok(())
    }
}
