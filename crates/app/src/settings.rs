use config::{Config, ConfigError, Environment, File};
use intraday_core::config::AppConfig;

/// 默认配置文件 (不含扩展名，支持 toml/json/yaml)
pub const DEFAULT_CONFIG_PATH: &str = "config/default";

/// 环境变量前缀，例如 `INTRADAY__PROVIDER__API_KEY`
pub const ENV_PREFIX: &str = "INTRADAY";

/// # Summary
/// 加载应用配置。
///
/// # Logic
/// 1. 以 `AppConfig::default()` 作为最底层。
/// 2. 叠加可选的配置文件。
/// 3. 叠加 `INTRADAY__` 前缀的环境变量。
///
/// # Arguments
/// * `path`: 配置文件路径 (不含扩展名)，文件不存在时忽略。
///
/// # Returns
/// 合并后的配置或 `ConfigError`。
pub fn load(path: &str) -> Result<AppConfig, ConfigError> {
    Config::builder()
        .add_source(Config::try_from(&AppConfig::default())?)
        .add_source(File::with_name(path).required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()
}
