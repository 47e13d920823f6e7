//! Route aggregate

mod model;
mod repository;

pub use model::Route;
pub use repository::RouteRepository;
