pub mod cli;
pub mod config;
pub mod dataset;
pub mod error;
pub mod food_record;
pub mod search;

pub use error::DatasetError;
pub use food_record::FoodRecord;
pub use search::FoodLookup;
