use chrono::{Local, NaiveDate};

/// Source of the calendar day that daily records are keyed by.
pub trait DateProvider: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// The server's local calendar date.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalDate;

impl DateProvider for LocalDate {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Always reports the same day.
#[derive(Debug, Clone, Copy)]
pub struct FixedDate(pub NaiveDate);

impl DateProvider for FixedDate {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
