//! 提交模型
//!
//! 后端用哨兵字符串（"待批改"，旧数据为"未完成"）表示"尚未批改"；
//! 客户端用带标签的 `GradeState` 表达，杜绝"分数已写、反馈未写"的半批改状态

use crate::error::{AppResult, BusinessError};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// 未批改哨兵
pub const UNGRADED_SENTINEL: &str = "待批改";
/// 旧版未完成哨兵
pub const LEGACY_UNGRADED_SENTINEL: &str = "未完成";

/// 批改状态
///
/// 分数与反馈要么都未设置，要么都已设置
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GradeState {
    /// 待批改
    Ungraded,
    /// 已批改（反馈允许为空字符串）
    Graded { score: u32, feedback: String },
}

impl GradeState {
    /// 从后端传输值解析批改状态
    ///
    /// # 参数
    /// - `uuid`: 所属提交的唯一标识（用于错误信息）
    /// - `score`: 分数字段（数字或字符串）
    /// - `feedback`: 反馈字段
    ///
    /// # 返回
    /// 一半哨兵、一半具体值视为数据不一致，返回错误
    pub fn from_wire(uuid: &str, score: &JsonValue, feedback: &JsonValue) -> AppResult<Self> {
        let score_text = wire_text(score);
        let feedback_text = wire_text(feedback);

        let score_pending = is_sentinel(&score_text);
        let feedback_pending = is_sentinel(&feedback_text);

        match (score_pending, feedback_pending) {
            (true, true) => Ok(GradeState::Ungraded),
            (false, false) => {
                let score = parse_wire_score(score).ok_or(BusinessError::InconsistentGrade {
                    uuid: uuid.to_string(),
                })?;
                Ok(GradeState::Graded {
                    score,
                    feedback: feedback_text,
                })
            }
            _ => Err(BusinessError::InconsistentGrade {
                uuid: uuid.to_string(),
            }
            .into()),
        }
    }

    /// 是否未批改
    pub fn is_ungraded(&self) -> bool {
        matches!(self, GradeState::Ungraded)
    }

    /// 分数的传输形式
    pub fn wire_score(&self) -> String {
        match self {
            GradeState::Ungraded => UNGRADED_SENTINEL.to_string(),
            GradeState::Graded { score, .. } => score.to_string(),
        }
    }

    /// 反馈的传输形式
    pub fn wire_feedback(&self) -> String {
        match self {
            GradeState::Ungraded => UNGRADED_SENTINEL.to_string(),
            GradeState::Graded { feedback, .. } => feedback.clone(),
        }
    }
}

/// 判断传输值是否为"尚未设置"哨兵
fn is_sentinel(text: &str) -> bool {
    text == UNGRADED_SENTINEL || text == LEGACY_UNGRADED_SENTINEL
}

/// 把传输值还原为文本（数字与字符串都可能出现）
fn wire_text(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        JsonValue::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

/// 解析传输分数（数字或数字字符串）
pub fn parse_wire_score(value: &JsonValue) -> Option<u32> {
    match value {
        JsonValue::Number(n) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
        JsonValue::String(s) => s.trim().parse::<u32>().ok(),
        _ => None,
    }
}

/// 提交记录的传输形式
///
/// 字段名与 `get_homework_submissions` 返回的记录保持一致
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SubmissionWire {
    pub uuid: String,
    pub user_id: String,
    /// 展示用文件名
    #[serde(rename = "file")]
    pub file_name: String,
    /// 存储键（后端分配的不透明引用）
    #[serde(rename = "file_url", default)]
    pub storage_key: String,
    pub date: String,
    #[serde(default)]
    pub description: String,
    pub score: JsonValue,
    pub feedback: JsonValue,
}

/// 一份提交
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    /// 后端分配的唯一标识
    pub uuid: String,
    /// 所属作业
    pub assignment_id: String,
    /// 提交者
    pub submitter_id: String,
    /// 展示用文件名
    pub file_name: String,
    /// 存储键
    pub storage_key: String,
    /// 提交时间
    pub date: String,
    /// 提交说明
    pub description: String,
    /// 批改状态
    pub grade: GradeState,
}

impl Submission {
    /// 从传输记录构建提交
    pub fn from_wire(assignment_id: &str, wire: SubmissionWire) -> AppResult<Self> {
        let grade = GradeState::from_wire(&wire.uuid, &wire.score, &wire.feedback)?;
        Ok(Self {
            uuid: wire.uuid,
            assignment_id: assignment_id.to_string(),
            submitter_id: wire.user_id,
            file_name: wire.file_name,
            storage_key: wire.storage_key,
            date: wire.date,
            description: wire.description,
            grade,
        })
    }
}
