mod filesystem;
mod loader;
mod model;
mod validation;

pub use filesystem::{FileSystem, RealFileSystem};
pub use loader::{ConfigLoader, FileConfigLoader, LOCAL_CONFIG_NAME, LoadResult};
pub use model::{
    AccessibilityConfig, BrandConfig, CONFIG_VERSION, Config, LegalConfig, QualityConfig,
    RuleOverride,
};
pub use validation::validate_config_semantics;
