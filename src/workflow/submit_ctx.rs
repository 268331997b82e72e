//! 提交上下文
//!
//! 封装"我正在给哪门课的哪个作业提交"这一信息

use std::fmt::Display;

/// 提交上下文
///
/// 包含一次提交流程所需的全部定位信息
#[derive(Debug, Clone)]
pub struct SubmitCtx {
    /// 作业 ID
    pub assignment_id: String,

    /// 所属课程/班级 ID（文件归属上下文）
    pub course_id: String,

    /// 作业序号（仅用于日志显示）
    pub assignment_index: usize,
}

impl SubmitCtx {
    /// 创建新的提交上下文
    pub fn new(
        assignment_id: impl Into<String>,
        course_id: impl Into<String>,
        assignment_index: usize,
    ) -> Self {
        Self {
            assignment_id: assignment_id.into(),
            course_id: course_id.into(),
            assignment_index,
        }
    }
}

impl Display for SubmitCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[作业 ID#{} 课程#{}]",
            self.assignment_id, self.course_id
        )
    }
}
