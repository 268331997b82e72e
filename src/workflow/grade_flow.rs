//! 教师批改流程 - 流程层
//!
//! 核心职责：定义"一份提交的一个批改周期"的完整流程
//!
//! 流程顺序：
//! 1. （可选）上传教师参考文件
//! 2. 请求 AI 批改建议 → 建议只进入瞬态周期，不落库
//! 3. 教师自由修改建议
//! 4. 确认 → 按提交唯一标识落库 → 重新拉取快照

use anyhow::Result;
use tracing::info;

use crate::config::Config;
use crate::context::RequestContext;
use crate::infrastructure::ApiExecutor;
use crate::models::file::UploadFile;
use crate::models::proposal::{GradeCycle, GradingProposal};
use crate::models::submission::Submission;
use crate::services::{FileTransferAgent, GradingCoordinator, SubmissionStore};

/// 教师批改流程
pub struct GradeFlow {
    file_transfer: FileTransferAgent,
    grading: GradingCoordinator,
    submission_store: SubmissionStore,
}

impl GradeFlow {
    /// 创建新的批改流程
    pub fn new(config: &Config) -> Self {
        Self {
            file_transfer: FileTransferAgent::new(config),
            grading: GradingCoordinator::new(),
            submission_store: SubmissionStore::new(),
        }
    }

    /// 上传教师参考文件，返回其存储键
    ///
    /// 参考文件与学生作业走同一套上传校验和两步上传
    pub async fn upload_reference(
        &self,
        executor: &ApiExecutor,
        ctx: &RequestContext,
        course_id: &str,
        file: &UploadFile,
    ) -> Result<String> {
        let target = self
            .file_transfer
            .request_upload_target(executor, ctx, file, course_id, "批改参考文件")
            .await?;
        self.file_transfer.upload(executor, &target, file).await?;
        Ok(target.storage_key)
    }

    /// 请求 AI 批改建议并推进批改周期
    ///
    /// 建议只写入瞬态周期；调用失败时周期与提交都保持原状。
    /// 可重复调用（重新批改），新建议覆盖旧建议。
    pub async fn propose(
        &self,
        executor: &ApiExecutor,
        ctx: &RequestContext,
        submission: &Submission,
        grader_file_ref: Option<&str>,
        cycle: &mut GradeCycle,
    ) -> Result<GradingProposal> {
        let proposal = self
            .grading
            .request_ai_grade(executor, ctx, submission, grader_file_ref)
            .await?;

        cycle.propose(proposal.clone());

        Ok(proposal)
    }

    /// 为人工复核取回文件的限时下载地址
    ///
    /// 学生作业与（可选的）教师参考文件并发申请
    pub async fn review_links(
        &self,
        executor: &ApiExecutor,
        ctx: &RequestContext,
        submission: &Submission,
        grader_file_ref: Option<&str>,
    ) -> Result<(String, Option<String>)> {
        match grader_file_ref {
            Some(reference) => {
                let (submitted, grader) = futures::future::try_join(
                    self.file_transfer
                        .request_download_target(executor, ctx, &submission.storage_key),
                    self.file_transfer
                        .request_download_target(executor, ctx, reference),
                )
                .await?;
                Ok((submitted.download_url, Some(grader.download_url)))
            }
            None => {
                let submitted = self
                    .file_transfer
                    .request_download_target(executor, ctx, &submission.storage_key)
                    .await?;
                Ok((submitted.download_url, None))
            }
        }
    }

    /// 确认成绩
    ///
    /// 落库成功后推进周期并重新拉取快照；
    /// 落库失败时周期与先前持久化的成绩都保持不变
    pub async fn confirm(
        &self,
        executor: &ApiExecutor,
        ctx: &RequestContext,
        assignment_id: &str,
        submission_uuid: &str,
        score: &str,
        feedback: &str,
        cycle: &mut GradeCycle,
    ) -> Result<Vec<Submission>> {
        self.grading
            .confirm_grade(executor, ctx, submission_uuid, score, feedback)
            .await?;

        cycle.confirmed();

        info!("批改周期结束: 提交 {}", submission_uuid);

        let snapshot = self
            .submission_store
            .load_for_assignment(executor, ctx, assignment_id)
            .await?;

        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AppError, BusinessError};
    use crate::models::submission::GradeState;

    fn submission_without_file() -> Submission {
        Submission {
            uuid: "sub-1".to_string(),
            assignment_id: "hw-1".to_string(),
            submitter_id: "stu-1".to_string(),
            file_name: String::new(),
            storage_key: String::new(),
            date: "2024-03-20 10:00".to_string(),
            description: "final report".to_string(),
            grade: GradeState::Ungraded,
        }
    }

    #[test]
    fn propose_requires_stored_file_and_leaves_cycle_untouched() {
        let config = Config {
            api_base_url: "http://192.0.2.1".to_string(),
            ..Config::default()
        };
        let executor = ApiExecutor::new(&config);
        let flow = GradeFlow::new(&config);
        let ctx = RequestContext::new("token", "teacher-1");
        let mut cycle = GradeCycle::Ungraded;

        let err = tokio_test::block_on(flow.propose(
            &executor,
            &ctx,
            &submission_without_file(),
            None,
            &mut cycle,
        ))
        .unwrap_err();
        let err = err.downcast::<AppError>().unwrap();
        assert!(matches!(
            err,
            AppError::Business(BusinessError::MissingSubmissionFile { .. })
        ));
        // 失败的批改调用不改变周期
        assert_eq!(cycle, GradeCycle::Ungraded);
    }
}
