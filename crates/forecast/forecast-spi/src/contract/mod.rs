//! Contract module containing trait definitions for forecast operations

mod forecaster;
mod holiday_calendar;

pub use forecaster::{FittedModel, Forecaster};
pub use holiday_calendar::HolidayCalendar;
