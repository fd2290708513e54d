mod in_memory_config_store;
mod in_memory_session_repository;
mod pg_config_store;
mod pg_pool;
mod pg_session_repository;

pub use in_memory_config_store::InMemoryConfigStore;
pub use in_memory_session_repository::InMemorySessionRepository;
pub use pg_config_store::PgConfigStore;
pub use pg_pool::{create_pool, run_migrations};
pub use pg_session_repository::PgSessionRepository;
