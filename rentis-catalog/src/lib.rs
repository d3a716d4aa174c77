pub mod category;
pub mod pricing;

pub use category::{Catalog, CatalogError, Category, RateCard};
pub use pricing::{quote, PricingError, Quote, RentalSelection};
