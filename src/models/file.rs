//! 文件传输相关模型

use crate::error::{AppError, AppResult, FileError};
use serde::Deserialize;
use std::path::Path;

/// 上传目标
///
/// 后端返回的存储键 + 一次性上传地址
#[derive(Debug, Clone, Deserialize)]
pub struct UploadTarget {
    /// 存储键（后续下载与 AI 批改都用它引用文件）
    #[serde(rename = "file_name")]
    pub storage_key: String,
    /// 一次性上传地址
    #[serde(rename = "file_upload_url")]
    pub upload_url: String,
}

/// 下载目标
#[derive(Debug, Clone, Deserialize)]
pub struct DownloadTarget {
    /// 限时下载地址
    #[serde(rename = "file_download_url")]
    pub download_url: String,
}

/// 待上传的本地文件
#[derive(Debug, Clone)]
pub struct UploadFile {
    /// 展示用文件名
    pub name: String,
    /// 文件内容
    pub bytes: Vec<u8>,
}

impl UploadFile {
    /// 用内存中的内容创建
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// 从磁盘读取
    pub fn from_path(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(AppError::File(FileError::NotFound {
                path: path.display().to_string(),
            }));
        }
        let bytes = std::fs::read(path)
            .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self { name, bytes })
    }

    /// 文件大小（字节）
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}
