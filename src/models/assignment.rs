//! 作业模型
//!
//! 后端是作业记录的唯一权威；客户端只持有用于显示和编辑的瞬态副本

use crate::error::{AppResult, BusinessError};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

fn default_max_score() -> u32 {
    100
}

/// 作业记录
///
/// 字段名与后端 `getallhomework` 返回的记录保持一致
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assignment {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// 截止时间，后端以字符串传输，按需解析
    pub deadline: String,
    /// 发布时间
    #[serde(rename = "fabu_time", default)]
    pub publish_date: String,
    /// 满分
    #[serde(rename = "max_score", default = "default_max_score")]
    pub max_score: u32,
    /// 作业要求列表
    #[serde(rename = "yaoqiu", default)]
    pub requirements: Vec<String>,
    /// 所属课程名
    #[serde(rename = "course_name", default)]
    pub course: String,
    /// 授课教师名
    #[serde(rename = "teacher_name", default)]
    pub instructor: String,
    /// 学生视角的完成状态
    #[serde(default)]
    pub status: String,
    /// 学生视角的得分（未完成时为哨兵字符串）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<String>,
    /// 学生视角的提交时间
    #[serde(rename = "submit_date", default, skip_serializing_if = "Option::is_none")]
    pub submit_date: Option<String>,
}

impl Assignment {
    /// 解析截止时间
    ///
    /// 支持 `2024-03-08 23:59:59`、`2024-03-08 23:59` 与纯日期 `2024-03-08`（按零点计）
    pub fn deadline_instant(&self) -> Option<NaiveDateTime> {
        parse_instant(&self.deadline)
    }

    /// 是否已逾期
    ///
    /// 截止时刻严格早于评估时刻才算逾期；恰好等于截止时刻不算。
    /// 每次调用重新计算，不缓存。
    pub fn is_overdue(&self, at: NaiveDateTime) -> bool {
        match self.deadline_instant() {
            Some(deadline) => deadline < at,
            None => false,
        }
    }

    /// 剩余天数（按天向上取整）
    ///
    /// 截止时间无法解析时返回 `None`
    pub fn days_remaining(&self, at: NaiveDateTime) -> Option<i64> {
        let deadline = self.deadline_instant()?;
        let seconds = (deadline - at).num_seconds();
        Some((seconds as f64 / 86_400.0).ceil() as i64)
    }

    /// 用草稿内容生成保存后的作业记录
    pub fn with_draft(&self, draft: &AssignmentDraft) -> Assignment {
        Assignment {
            name: draft.name.clone(),
            description: draft.description.clone(),
            deadline: draft.deadline.clone(),
            publish_date: draft.publish_date.clone(),
            max_score: draft.max_score,
            requirements: draft.requirements.clone(),
            ..self.clone()
        }
    }
}

/// 解析时间字符串
fn parse_instant(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M") {
        return Some(dt);
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// 作业编辑草稿
///
/// 保存失败时草稿保留在调用方手里，可反复重试
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentDraft {
    pub name: String,
    pub description: String,
    pub deadline: String,
    pub publish_date: String,
    pub max_score: u32,
    pub requirements: Vec<String>,
}

impl AssignmentDraft {
    /// 追加一条作业要求
    pub fn add_requirement(&mut self, value: impl Into<String>) {
        self.requirements.push(value.into());
    }

    /// 更新指定位置的作业要求
    pub fn update_requirement(&mut self, index: usize, value: impl Into<String>) -> AppResult<()> {
        let max_index = self.requirements.len().saturating_sub(1);
        let slot = self
            .requirements
            .get_mut(index)
            .ok_or(BusinessError::IndexOutOfRange { index, max_index })?;
        *slot = value.into();
        Ok(())
    }

    /// 删除指定位置的作业要求
    pub fn remove_requirement(&mut self, index: usize) -> AppResult<()> {
        if index >= self.requirements.len() {
            let max_index = self.requirements.len().saturating_sub(1);
            return Err(BusinessError::IndexOutOfRange { index, max_index }.into());
        }
        self.requirements.remove(index);
        Ok(())
    }
}
