use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid holiday date: month {month}, day {day}")]
    InvalidHolidayDate { month: u32, day: u32 },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
