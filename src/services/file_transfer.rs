//! 文件传输服务 - 业务能力层
//!
//! 上传地址申请、直传、下载地址申请；所有校验都发生在任何网络调用之前

use crate::config::Config;
use crate::context::RequestContext;
use crate::error::{AppError, AppResult, ValidationError};
use crate::infrastructure::ApiExecutor;
use crate::models::file::{DownloadTarget, UploadFile, UploadTarget};
use anyhow::Result;
use regex::Regex;
use serde_json::json;
use tracing::{debug, info};

/// 文件传输服务
///
/// 职责：
/// - 校验待上传文件（大小上限、扩展名），后端不做大小校验
/// - 申请上传目标（存储键 + 一次性上传地址）
/// - 向一次性地址直传字节
/// - 申请限时下载地址
///
/// 顺序约束：必须先申请上传目标并成功，才能直传；
/// 直传成功后要把存储键记录到提交上才算真正关联。
pub struct FileTransferAgent {
    max_upload_bytes: u64,
    allowed_extension: Regex,
}

impl FileTransferAgent {
    /// 创建新的文件传输服务
    pub fn new(config: &Config) -> Self {
        let pattern = format!(r"(?i)\.({})$", config.allowed_upload_exts.join("|"));
        Self {
            max_upload_bytes: config.max_upload_bytes,
            // 扩展名列表来自配置，均为字母数字，拼出的模式必然合法
            allowed_extension: Regex::new(&pattern)
                .unwrap_or_else(|_| Regex::new(r"(?i)\.(zip|pdf)$").unwrap()),
        }
    }

    /// 校验待上传文件
    ///
    /// 大小恰好等于上限允许上传，超出第一个字节即拒绝
    pub fn validate(&self, file: &UploadFile) -> AppResult<()> {
        if file.name.trim().is_empty() || file.bytes.is_empty() {
            return Err(ValidationError::NoFileChosen.into());
        }
        if !self.allowed_extension.is_match(&file.name) {
            return Err(ValidationError::UnsupportedFileType {
                file_name: file.name.clone(),
            }
            .into());
        }
        if file.size() > self.max_upload_bytes {
            return Err(ValidationError::FileTooLarge {
                size: file.size(),
                limit: self.max_upload_bytes,
            }
            .into());
        }
        Ok(())
    }

    /// 申请上传目标
    ///
    /// # 参数
    /// - `file`: 待上传文件（先在本地完成校验）
    /// - `owner`: 归属上下文（课程/班级 ID）
    /// - `description`: 文件用途说明
    ///
    /// # 返回
    /// 返回存储键与一次性上传地址
    pub async fn request_upload_target(
        &self,
        executor: &ApiExecutor,
        ctx: &RequestContext,
        file: &UploadFile,
        owner: &str,
        description: &str,
    ) -> Result<UploadTarget> {
        self.validate(file)?;

        let payload = json!({
            "file_name": file.name,
            "class_id": owner,
            "user_id": ctx.user_id,
            "description": description,
        });

        let target: UploadTarget = executor.post_json_as("file_upload", ctx, &payload).await?;

        debug!("文件 {} 分配存储键 {}", file.name, target.storage_key);

        Ok(target)
    }

    /// 向一次性地址直传文件内容
    pub async fn upload(
        &self,
        executor: &ApiExecutor,
        target: &UploadTarget,
        file: &UploadFile,
    ) -> Result<()> {
        executor.put_bytes(&target.upload_url, file.bytes.clone()).await?;
        info!("✓ 文件上传成功: {} ({} 字节)", file.name, file.size());
        Ok(())
    }

    /// 申请限时下载地址
    pub async fn request_download_target(
        &self,
        executor: &ApiExecutor,
        ctx: &RequestContext,
        storage_key: &str,
    ) -> Result<DownloadTarget> {
        let payload = json!({ "file_name": storage_key });
        let target: DownloadTarget = executor.post_json_as("file_download", ctx, &payload).await?;
        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIMIT: u64 = 20 * 1024 * 1024;

    fn agent() -> FileTransferAgent {
        FileTransferAgent::new(&Config::default())
    }

    fn file_of_size(name: &str, size: usize) -> UploadFile {
        UploadFile::new(name, vec![0u8; size])
    }

    #[test]
    fn ordinary_pdf_passes() {
        let err = agent().validate(&file_of_size("report.pdf", 5 * 1024 * 1024));
        assert!(err.is_ok());
    }

    #[test]
    fn exactly_at_limit_is_accepted() {
        assert!(agent().validate(&file_of_size("big.zip", LIMIT as usize)).is_ok());
    }

    #[test]
    fn one_byte_over_limit_is_rejected() {
        let err = agent()
            .validate(&file_of_size("big.zip", LIMIT as usize + 1))
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Validation(ValidationError::FileTooLarge { size, limit })
                if size == LIMIT + 1 && limit == LIMIT
        ));
    }

    #[test]
    fn missing_file_is_rejected() {
        let err = agent().validate(&UploadFile::new("", vec![])).unwrap_err();
        assert!(matches!(
            err,
            AppError::Validation(ValidationError::NoFileChosen)
        ));
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let err = agent().validate(&file_of_size("virus.exe", 100)).unwrap_err();
        assert!(matches!(
            err,
            AppError::Validation(ValidationError::UnsupportedFileType { .. })
        ));
    }

    #[test]
    fn extension_check_is_case_insensitive() {
        assert!(agent().validate(&file_of_size("作业.ZIP", 100)).is_ok());
        assert!(agent().validate(&file_of_size("讲义.Docx", 100)).is_ok());
    }
}
