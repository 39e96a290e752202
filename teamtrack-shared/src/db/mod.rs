/// Database utilities
///
/// - `pool`: PostgreSQL connection pool construction and health checks
/// - `migrations`: embedded schema migrations

pub mod migrations;
pub mod pool;
