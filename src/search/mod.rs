pub mod lookup_engine;
pub mod ranking;

pub use lookup_engine::{FoodLookup, MAX_RESULTS};
pub use ranking::NameQuery;
