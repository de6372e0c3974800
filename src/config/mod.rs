//! Configuration: TOML sections declared with `config_struct!`, loaded once at
//! startup and handed to the components that need them.

#[macro_use]
mod macros;
mod schemas;
mod utils;

pub use schemas::{AggregationConfig, ApiConfig, CacheSettings, Config, LogoConfig};
pub use utils::{
    apply_env_overrides, load_config_from_path, load_config_with_env, parse_config, save_config,
    validate_config, CONFIG_FILE_PATH, ENV_API_KEY, ENV_API_SECRET, ENV_BASE_URL,
    MAX_TTL_OVERRIDE_MS,
};
