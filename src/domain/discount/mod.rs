//! Discount aggregate

mod model;
mod repository;

pub use model::{Discount, DiscountRejection, DiscountType};
pub use repository::DiscountRepository;
