use crate::Result;
use crate::error::RestpadError;
use crate::http::client::DEFAULT_TIMEOUT_SECS;
use crate::storage::DATA_DIR;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// restpad.toml 配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 变量和历史记录的存储目录
    pub data_dir: Option<PathBuf>,

    /// 请求超时（秒）
    pub timeout_secs: u64,

    /// 历史记录每页条数
    pub page_size: usize,

    /// 默认变量值，变量库中找不到时才使用，不会写入存储
    pub variables: HashMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            page_size: DEFAULT_PAGE_SIZE,
            variables: HashMap::new(),
        }
    }
}

impl Config {
    /// 存储目录：RESTPAD_DATA_DIR > data_dir > .restpad
    pub fn resolve_data_dir(&self) -> PathBuf {
        if let Ok(dir) = std::env::var("RESTPAD_DATA_DIR") {
            return PathBuf::from(dir);
        }
        self.data_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DATA_DIR))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// 配置文件加载器
pub struct ConfigLoader;

impl ConfigLoader {
    /// 配置文件名
    const CONFIG_FILE: &'static str = "restpad.toml";

    /// 从指定路径加载配置文件
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Config> {
        let content = fs::read_to_string(path.as_ref()).map_err(RestpadError::IoError)?;
        let config: Config = toml::from_str(&content)?;

        if config.page_size == 0 {
            return Err(RestpadError::MalformedInput(
                "page_size must be greater than 0".to_string(),
            ));
        }
        Ok(config)
    }

    /// 查找并加载配置文件，找不到时使用默认配置
    ///
    /// 查找顺序：
    /// 1. 当前目录及其父目录
    /// 2. 用户配置目录 ~/.config/restpad/
    pub fn find_and_load() -> Config {
        let found = Self::find_in_current_dir().or_else(Self::find_in_user_dir);

        let Some(path) = found else {
            debug!("No config file found, using defaults");
            return Config::default();
        };

        match Self::load_from_path(&path) {
            Ok(config) => {
                debug!(path = %path.display(), "Config loaded");
                config
            }
            Err(e) => {
                warn!("Ignoring invalid config file {}: {}", path.display(), e);
                Config::default()
            }
        }
    }

    fn find_in_current_dir() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;

        loop {
            let config_path = current.join(Self::CONFIG_FILE);
            if config_path.exists() {
                return Some(config_path);
            }

            // 尝试父目录
            if !current.pop() {
                break;
            }
        }

        None
    }

    fn find_in_user_dir() -> Option<PathBuf> {
        let home = dirs::home_dir()?;
        let config_path = home.join(".config").join("restpad").join(Self::CONFIG_FILE);
        config_path.exists().then_some(config_path)
    }
}
