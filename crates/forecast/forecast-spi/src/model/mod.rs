//! Model module containing data structures

mod forecast;
mod frequency;
mod holiday;
mod model_spec;
mod observation;

pub use forecast::{Forecast, ForecastPoint};
pub use frequency::Frequency;
pub use holiday::Holiday;
pub use model_spec::ModelSpec;
pub use observation::Observation;
