//! Employee aggregate

mod model;
mod repository;

pub use model::{Employee, EmployeeRole, EmployeeStatus};
pub use repository::EmployeeRepository;
