//! Unified configuration layer.
//!
//! Every environment variable read happens here; the other crates go through the
//! typed structs instead of calling `std::env::var` directly.
//!
//! - `loader`: env_or, env_optional, env_bool, `.env` loading, set_env_var
//! - `schema`: PipConfig, VenvConfig, ObservabilityConfig
//! - `env_keys`: key constants (with aliases)

pub mod env_keys;
pub mod loader;
pub mod schema;

pub use loader::{env_bool, env_optional, env_or, load_dotenv, load_dotenv_from_dir, set_env_var};
pub use schema::{ObservabilityConfig, PipConfig, VenvConfig};
