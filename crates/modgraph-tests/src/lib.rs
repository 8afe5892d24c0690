pub mod fixtures;
pub mod test_env;

// Re-export key testing utilities
pub use fixtures::{MockRepository, moko_fixture};
pub use test_env::TestEnvironment;
