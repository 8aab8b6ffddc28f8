use chrono::{DateTime, Datelike, NaiveDate, Utc};
use shared::Species;

/// An animal registered under exactly one owner
#[derive(Debug, Clone, PartialEq)]
pub struct Pet {
    pub id: i64,
    pub name: String,
    pub species: Species,
    pub breed: String,
    pub birth_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    /// Fixed at creation
    pub owner_id: i64,
    pub owner_name: String,
}

impl Pet {
    /// Completed years of life as of `today`
    pub fn age_in_years(&self, today: NaiveDate) -> u32 {
        age_in_years(self.birth_date, today)
    }
}

/// Editable pet fields after validation. The owner is not part of it.
#[derive(Debug, Clone, PartialEq)]
pub struct PetRecord {
    pub name: String,
    pub species: Species,
    pub breed: String,
    pub birth_date: NaiveDate,
}

pub fn age_in_years(birth_date: NaiveDate, today: NaiveDate) -> u32 {
    let mut years = today.year() - birth_date.year();
    if (today.month(), today.day()) < (birth_date.month(), birth_date.day()) {
        years -= 1;
    }
    years.max(0) as u32
}
