pub mod catalog;
pub mod cost;
pub mod error;
pub mod filter;
pub mod sort;
pub mod view;

pub use catalog::{Catalog, ModelRecord, PricingSpec};
pub use cost::{calculate_cost, Rates, Usage};
pub use error::PriceError;
pub use sort::{Direction, SortKey, SortState};
pub use view::{Row, TableView};
