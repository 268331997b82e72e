//! 批量批改处理器 - 编排层
//!
//! ## 职责
//!
//! 对一个作业的全部未批改提交批量发起 AI 批改，汇总建议供教师复核。
//!
//! ## 核心功能
//!
//! 1. **快照加载**：拉取作业的全部提交，筛出未批改的
//! 2. **并发控制**：使用 Semaphore 限制同时进行的 AI 批改数量
//! 3. **建议汇总**：收集 {提交, 建议} 列表与成功/失败统计
//!
//! ## 设计特点
//!
//! - **只产出建议**：确认成绩始终是教师的动作，本模块绝不落库
//! - **向下委托**：单份提交的批改委托给 services::GradingCoordinator

use crate::config::Config;
use crate::context::RequestContext;
use crate::infrastructure::ApiExecutor;
use crate::models::proposal::GradingProposal;
use crate::models::submission::Submission;
use crate::services::{GradingCoordinator, SubmissionStore};
use anyhow::Result;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{error, info};

/// 一条待复核的批改建议
#[derive(Debug, Clone)]
pub struct ProposalEntry {
    /// 提交唯一标识
    pub uuid: String,
    /// 提交者
    pub submitter_id: String,
    /// 展示用文件名
    pub file_name: String,
    /// AI 建议
    pub proposal: GradingProposal,
}

/// 批量批改统计
#[derive(Debug, Default)]
pub struct GradingStats {
    /// 拿到建议的提交数
    pub proposed: usize,
    /// 批改调用失败的提交数
    pub failed: usize,
    /// 已批改而跳过的提交数
    pub skipped: usize,
    /// 提交总数
    pub total: usize,
}

/// 批量批改处理器
pub struct BatchGrader {
    config: Config,
}

impl BatchGrader {
    /// 创建新的批量批改处理器
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// 对一个作业的全部未批改提交发起 AI 批改
    ///
    /// # 参数
    /// - `executor`: API 执行器（内部是连接池，可安全 clone）
    /// - `ctx`: 请求上下文（教师身份）
    /// - `assignment_id`: 作业 ID
    /// - `grader_file_ref`: 教师参考文件的存储键（可选，所有提交共用）
    ///
    /// # 返回
    /// 返回建议列表与统计；建议不落库，等待教师逐条确认
    pub async fn run(
        &self,
        executor: &ApiExecutor,
        ctx: &RequestContext,
        assignment_id: &str,
        grader_file_ref: Option<&str>,
    ) -> Result<(Vec<ProposalEntry>, GradingStats)> {
        let submissions = SubmissionStore::new()
            .load_for_assignment(executor, ctx, assignment_id)
            .await?;

        let mut stats = GradingStats {
            total: submissions.len(),
            ..Default::default()
        };

        let ungraded: Vec<Submission> = submissions
            .into_iter()
            .filter(|s| s.grade.is_ungraded())
            .collect();
        stats.skipped = stats.total - ungraded.len();

        log_batch_start(assignment_id, &stats, ungraded.len(), self.config.max_concurrent_gradings);

        if ungraded.is_empty() {
            return Ok((Vec::new(), stats));
        }

        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrent_gradings));
        let mut handles = Vec::with_capacity(ungraded.len());

        for submission in ungraded {
            let permit = semaphore.clone().acquire_owned().await?;

            // reqwest::Client 内部是 Arc，clone 执行器开销很小
            let executor = executor.clone();
            let ctx = ctx.clone();
            let grader_file_ref = grader_file_ref.map(|s| s.to_string());

            let handle = tokio::spawn(async move {
                let _permit = permit;
                let coordinator = GradingCoordinator::new();
                let result = coordinator
                    .request_ai_grade(&executor, &ctx, &submission, grader_file_ref.as_deref())
                    .await;
                (submission, result)
            });
            handles.push(handle);
        }

        let mut entries = Vec::new();

        for handle in handles {
            match handle.await {
                Ok((submission, Ok(proposal))) => {
                    entries.push(ProposalEntry {
                        uuid: submission.uuid,
                        submitter_id: submission.submitter_id,
                        file_name: submission.file_name,
                        proposal,
                    });
                    stats.proposed += 1;
                }
                Ok((submission, Err(e))) => {
                    error!("❌ 提交 {} 批改失败: {}", submission.uuid, e);
                    stats.failed += 1;
                }
                Err(e) => {
                    error!("❌ 批改任务执行失败: {}", e);
                    stats.failed += 1;
                }
            }
        }

        log_batch_complete(assignment_id, &stats);

        Ok((entries, stats))
    }
}

// ========== 日志辅助函数 ==========

fn log_batch_start(assignment_id: &str, stats: &GradingStats, ungraded: usize, max_concurrent: usize) {
    info!("{}", "=".repeat(60));
    info!("📦 作业 {} 批量批改", assignment_id);
    info!(
        "📄 共 {} 份提交，其中 {} 份已批改跳过，{} 份待批改",
        stats.total, stats.skipped, ungraded
    );
    info!("📊 最大并发数: {}", max_concurrent);
    info!("{}", "=".repeat(60));
}

fn log_batch_complete(assignment_id: &str, stats: &GradingStats) {
    info!("{}", "─".repeat(60));
    info!(
        "✓ 作业 {} 批改完成: 建议 {}，失败 {}，跳过 {}",
        assignment_id, stats.proposed, stats.failed, stats.skipped
    );
    info!("{}", "─".repeat(60));
}
