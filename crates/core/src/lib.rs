pub mod analysis;
pub mod config;
pub mod filter;
pub mod nlq;
pub mod store;

pub use analysis::{analyze, content_hash, StringProperties, StringRecord};
pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, DatabaseConfig,
    ServerConfig,
};
pub use filter::{evaluate, CriteriaError, FilterCriteria};
pub use nlq::{translate, Translation};
pub use store::{SqliteStringStore, StoreError, StringStore};
