//! 应用入口 - 编排层
//!
//! 命令行工具的生命周期：读配置 → 建执行器 → 批量批改 → 打印建议

use crate::config::Config;
use crate::context::RequestContext;
use crate::error::{AppError, BusinessError};
use crate::infrastructure::ApiExecutor;
use crate::orchestrator::batch_grader::BatchGrader;
use crate::services::AssignmentStore;
use crate::utils::logging::truncate_text;
use anyhow::Result;
use chrono::Local;
use tracing::{info, warn};

/// 应用主结构
pub struct App {
    config: Config,
    executor: ApiExecutor,
    ctx: RequestContext,
}

impl App {
    /// 初始化应用
    ///
    /// 凭证从环境变量读取（BLACKBOARD_TOKEN / BLACKBOARD_USER_ID）
    pub fn initialize(config: Config) -> Result<Self> {
        let ctx = RequestContext::from_env()?;
        let executor = ApiExecutor::new(&config);

        log_startup(&config);

        Ok(Self {
            config,
            executor,
            ctx,
        })
    }

    /// 对指定作业运行批量 AI 批改并打印建议
    ///
    /// 只产出建议；确认成绩由教师在界面（或后续调用）里逐条完成
    pub async fn run(&self, assignment_id: &str) -> Result<()> {
        let assignments = AssignmentStore::new()
            .load_all(&self.executor, &self.ctx)
            .await?;
        let assignment = AssignmentStore::find(&assignments, assignment_id).ok_or_else(|| {
            AppError::Business(BusinessError::AssignmentNotFound {
                id: assignment_id.to_string(),
            })
        })?;

        info!("作业: {} (满分 {})", assignment.name, assignment.max_score);

        let grader = BatchGrader::new(self.config.clone());
        let (entries, stats) = grader
            .run(&self.executor, &self.ctx, &assignment.id, None)
            .await?;

        if entries.is_empty() {
            warn!("⚠️ 没有产出任何批改建议");
        }

        for entry in &entries {
            info!(
                "提交 {} | 学生 {} | 文件 {} | 建议得分 {} | {}",
                entry.uuid,
                entry.submitter_id,
                entry.file_name,
                entry.proposal.score,
                truncate_text(&entry.proposal.feedback, 60)
            );
        }

        print_final_stats(&stats);

        Ok(())
    }
}

// ========== 日志辅助函数 ==========

fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 批量 AI 批改模式");
    info!("🌐 后端地址: {}", config.api_base_url);
    info!("{}", "=".repeat(60));
}

fn print_final_stats(stats: &crate::orchestrator::batch_grader::GradingStats) {
    info!("{}", "=".repeat(60));
    info!("📊 批改建议汇总");
    info!("完成时间: {}", Local::now().format("%Y-%m-%d %H:%M:%S"));
    info!("✅ 建议: {}/{}", stats.proposed, stats.total);
    info!("❌ 失败: {}", stats.failed);
    info!("⏭️ 跳过(已批改): {}", stats.skipped);
    info!("{}", "=".repeat(60));
}
