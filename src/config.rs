use crate::error::{AppError, AppResult, FileError};
use serde::Deserialize;
use std::path::Path;

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 后端 API 基础地址
    pub api_base_url: String,
    /// 上传文件大小上限（字节），恰好等于上限的文件允许上传
    pub max_upload_bytes: u64,
    /// 允许上传的文件扩展名
    pub allowed_upload_exts: Vec<String>,
    /// 批量 AI 批改的并发数量
    pub max_concurrent_gradings: usize,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000".to_string(),
            max_upload_bytes: 20 * 1024 * 1024,
            allowed_upload_exts: ["zip", "pdf", "doc", "docx", "txt", "ipynb"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            max_concurrent_gradings: 4,
            verbose_logging: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            api_base_url: std::env::var("API_BASE_URL").unwrap_or(default.api_base_url),
            max_upload_bytes: std::env::var("MAX_UPLOAD_BYTES").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_upload_bytes),
            allowed_upload_exts: std::env::var("ALLOWED_UPLOAD_EXTS").ok()
                .map(|v| v.split(',').map(|s| s.trim().to_string()).filter(|s| !s.is_empty()).collect())
                .unwrap_or(default.allowed_upload_exts),
            max_concurrent_gradings: std::env::var("MAX_CONCURRENT_GRADINGS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_concurrent_gradings),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
        }
    }

    /// 从 TOML 配置文件加载
    pub fn from_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(AppError::File(FileError::NotFound {
                path: path.display().to_string(),
            }));
        }
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;
        Self::from_toml_str(&content, &path.display().to_string())
    }

    fn from_toml_str(content: &str, path: &str) -> AppResult<Self> {
        toml::from_str(content).map_err(|e| {
            AppError::File(FileError::TomlParseFailed {
                path: path.to_string(),
                source: e,
            })
        })
    }
}
