pub mod models;
pub mod store;

pub use models::{Drink, DrinkSummary, Ingredient};
pub use store::{DrinkStore, StoreError};
