//! Holiday calendar trait

use crate::model::Holiday;

/// Generates the public holidays of one country.
pub trait HolidayCalendar: Send + Sync {
    /// ISO 3166 alpha-2 country code.
    fn country_code(&self) -> &str;

    /// Holidays falling in any of `years`, ordered by date.
    fn holidays(&self, years: &[i32]) -> Vec<Holiday>;
}
