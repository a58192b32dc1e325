//! Database layer: connection pool, migrations, repositories
//!
//! - Connection pool, no Arc<Mutex<Connection>>
//! - Job reads JOIN company and category, no N+1 queries
//! - Multi-step writes run in a transaction

pub mod migrations;
pub mod pool;
pub mod repos;
mod store;

pub use pool::{create_pool, create_pool_with_options, DEFAULT_MAX_CONNECTIONS};
pub use store::PgStore;
