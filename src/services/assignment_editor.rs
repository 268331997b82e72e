//! 作业编辑服务 - 业务能力层
//!
//! 作业元数据的草稿编辑与整体保存

use crate::context::RequestContext;
use crate::error::{ApiError, AppError};
use crate::infrastructure::ApiExecutor;
use crate::models::{Assignment, AssignmentDraft};
use anyhow::Result;
use serde_json::json;
use tracing::info;

/// 作业编辑服务
///
/// 职责：
/// - 把当前作业字段复制成可编辑草稿
/// - 把草稿作为一次原子调用整体保存
/// - 保存失败时不动草稿，调用方可直接重试
pub struct AssignmentEditor;

impl AssignmentEditor {
    /// 创建新的作业编辑服务
    pub fn new() -> Self {
        Self
    }

    /// 从当前作业生成草稿
    pub fn load_draft(assignment: &Assignment) -> AssignmentDraft {
        AssignmentDraft {
            name: assignment.name.clone(),
            description: assignment.description.clone(),
            deadline: assignment.deadline.clone(),
            publish_date: assignment.publish_date.clone(),
            max_score: assignment.max_score,
            requirements: assignment.requirements.clone(),
        }
    }

    /// 保存草稿
    ///
    /// 所有字段作为一次后端调用整体持久化；
    /// 成功后返回用草稿内容重建的作业记录，调用方用它替换显示中的旧记录
    pub async fn save(
        &self,
        executor: &ApiExecutor,
        ctx: &RequestContext,
        assignment: &Assignment,
        draft: &AssignmentDraft,
    ) -> Result<Assignment> {
        let updated = assignment.with_draft(draft);

        let record = serde_json::to_value(&updated).map_err(|e| {
            AppError::Api(ApiError::JsonParseFailed {
                endpoint: "updateassignment".to_string(),
                source: e,
            })
        })?;

        let payload = json!({
            "course_week_id": assignment.id,
            "assignments": [record],
        });

        executor.post_json("updateassignment", ctx, &payload).await?;

        info!("✓ 作业 {} 信息已更新", assignment.id);

        Ok(updated)
    }
}

impl Default for AssignmentEditor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn draft_copies_all_editable_fields() {
        let assignment: Assignment = serde_json::from_value(json!({
            "id": "hw-1",
            "name": "第一周作业",
            "description": "AI概念理解",
            "deadline": "2024-03-08",
            "fabu_time": "2024-03-01",
            "max_score": 100,
            "yaoqiu": ["请按时完成作业"],
            "course_name": "人工智能基础",
            "teacher_name": "王老师"
        }))
        .unwrap();

        let draft = AssignmentEditor::load_draft(&assignment);
        assert_eq!(draft.name, assignment.name);
        assert_eq!(draft.deadline, assignment.deadline);
        assert_eq!(draft.requirements, assignment.requirements);
        // 草稿是独立副本，改草稿不影响原记录
        let mut draft = draft;
        draft.add_requirement("新增要求");
        assert_eq!(assignment.requirements.len(), 1);
        assert_eq!(draft.requirements.len(), 2);
    }
}
