//! # Blackboard Client
//!
//! AI BlackBoard 在线教学平台的客户端核心：作业提交、文件传输、
//! AI 辅助批改与作业编辑。界面壳层（或随附的批量批改命令行工具）
//! 驱动这里的异步调用；后端始终是数据的唯一权威。
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有稀缺资源（HTTP 连接池），只暴露能力
//! - `ApiExecutor` - 唯一的连接池 owner，提供 post_json / put_bytes 能力
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单个记录
//! - `SubmissionStore` / `AssignmentStore` - 快照拉取能力
//! - `FileTransferAgent` - 两步上传 / 下载地址能力
//! - `GradingCoordinator` - AI 建议与成绩落库能力
//! - `AssignmentEditor` - 草稿编辑与整体保存能力
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一次提交 / 一个批改周期"的完整流程
//! - `SubmitCtx` - 上下文封装（assignment_id + course_id）
//! - `SubmitFlow` - 提交编排（校验 → 上传 → 记录 → 重查）
//! - `GradeFlow` - 批改编排（建议 → 复核 → 确认 → 重查）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/batch_grader` - 批量批改处理器，管理并发和统计
//! - `orchestrator/app` - 命令行工具的应用生命周期
//!
//! ## 模块结构

pub mod config;
pub mod context;
pub mod error;
pub mod infrastructure;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use context::RequestContext;
pub use error::{AppError, AppResult};
pub use infrastructure::ApiExecutor;
pub use models::{
    Assignment, AssignmentDraft, GradeCycle, GradeState, GradingProposal, Submission, UploadFile,
};
pub use orchestrator::{App, BatchGrader};
pub use services::{
    AssignmentEditor, AssignmentStore, FileTransferAgent, GradingCoordinator, SubmissionStore,
};
pub use workflow::{GradeFlow, SubmitCtx, SubmitFlow};
