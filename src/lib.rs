//! # Fleetline
//!
//! Multi-tenant bus fleet and ticketing back office. Companies manage
//! buses, routes, trips and ticket sales through a REST API; every
//! entity is tenant-scoped and access is role-based.
//!
//! ## Architecture
//!
//! - **domain**: entities, state machines, repository traits
//! - **application**: services orchestrating the use cases
//! - **infrastructure**: SeaORM persistence, JWT verification,
//!   in-memory storage for tests
//! - **interfaces**: REST API with Swagger documentation

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};

// Re-export API router
pub use interfaces::http::{create_api_router, AppState, AuthState};
