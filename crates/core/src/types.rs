/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Calendar dates (e.g. a user's moving date) carry no time zone.
pub type CalendarDate = chrono::NaiveDate;
