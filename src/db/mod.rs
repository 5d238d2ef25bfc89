//! Database layer (Postgres).

pub mod postgres;
pub mod seed;

pub use postgres::Database;
pub use seed::seed_demo_data;
