//! Clock port - the current time, injectable for tests

use chrono::{DateTime, NaiveDate, Utc};

pub trait Clock: Send + Sync {
    /// Current instant
    fn now(&self) -> DateTime<Utc>;

    /// Today's calendar date, used for age checks
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}
