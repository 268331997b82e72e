//! 批改建议与批改周期
//!
//! AI 返回的建议只存在于内存里，教师确认之前不落库

use crate::error::{AppResult, BusinessError};
use crate::models::submission::Submission;
use serde::{Deserialize, Serialize};

/// AI 批改建议
///
/// 瞬态值：持有在批改周期中，确认后写入所属提交的分数/反馈字段
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradingProposal {
    pub score: u32,
    pub feedback: String,
}

/// 单份提交的批改周期
///
/// 状态转移：
/// - 待批改 → (发起 AI 批改) → 建议待确认 → (教师确认) → 已批改
/// - 待批改 / 已批改 → (教师直接给分并确认) → 已批改
///
/// 周期本身不落库；只有确认操作会改动持久化的提交记录。
/// 没有"锁定"状态，已批改的提交可以再次进入周期修订。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GradeCycle {
    /// 待批改
    Ungraded,
    /// AI 建议等待教师确认
    ProposalPending(GradingProposal),
    /// 已批改
    Graded,
}

impl GradeCycle {
    /// 根据提交的持久化状态建立周期
    pub fn from_submission(submission: &Submission) -> Self {
        if submission.grade.is_ungraded() {
            GradeCycle::Ungraded
        } else {
            GradeCycle::Graded
        }
    }

    /// 记录一条新的 AI 建议
    ///
    /// 可重复调用（重新批改），新建议覆盖旧建议
    pub fn propose(&mut self, proposal: GradingProposal) {
        *self = GradeCycle::ProposalPending(proposal);
    }

    /// 当前待确认的建议
    pub fn proposal(&self) -> Option<&GradingProposal> {
        match self {
            GradeCycle::ProposalPending(p) => Some(p),
            _ => None,
        }
    }

    /// 教师自由修改待确认建议的分数/反馈
    pub fn edit_proposal(&mut self, score: u32, feedback: impl Into<String>) -> AppResult<()> {
        match self {
            GradeCycle::ProposalPending(p) => {
                p.score = score;
                p.feedback = feedback.into();
                Ok(())
            }
            _ => Err(BusinessError::NoPendingProposal.into()),
        }
    }

    /// 确认完成：进入已批改状态，丢弃瞬态建议
    ///
    /// 调用方需先完成持久化，再推进周期
    pub fn confirmed(&mut self) {
        *self = GradeCycle::Graded;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::submission::GradeState;

    fn proposal(score: u32, feedback: &str) -> GradingProposal {
        GradingProposal {
            score,
            feedback: feedback.to_string(),
        }
    }

    fn submission(grade: GradeState) -> Submission {
        Submission {
            uuid: "sub-1".to_string(),
            assignment_id: "hw-1".to_string(),
            submitter_id: "stu-1".to_string(),
            file_name: "report.pdf".to_string(),
            storage_key: "2024/03/key.pdf".to_string(),
            date: "2024-03-20 10:00".to_string(),
            description: "final report".to_string(),
            grade,
        }
    }

    #[test]
    fn cycle_starts_from_persisted_state() {
        let cycle = GradeCycle::from_submission(&submission(GradeState::Ungraded));
        assert_eq!(cycle, GradeCycle::Ungraded);

        let cycle = GradeCycle::from_submission(&submission(GradeState::Graded {
            score: 90,
            feedback: "好".to_string(),
        }));
        assert_eq!(cycle, GradeCycle::Graded);
    }

    #[test]
    fn repropose_overwrites_pending_proposal() {
        let mut cycle = GradeCycle::Ungraded;
        cycle.propose(proposal(70, "还行"));
        cycle.propose(proposal(85, "更好"));

        // 重新批改只覆盖瞬态建议，周期仍在待确认
        assert_eq!(cycle.proposal(), Some(&proposal(85, "更好")));
        assert!(matches!(cycle, GradeCycle::ProposalPending(_)));
    }

    #[test]
    fn edit_requires_pending_proposal() {
        let mut cycle = GradeCycle::Ungraded;
        let err = cycle.edit_proposal(88, "well done").unwrap_err();
        assert!(matches!(
            err,
            AppError::Business(BusinessError::NoPendingProposal)
        ));

        cycle.propose(proposal(80, "初稿"));
        cycle.edit_proposal(88, "well done").unwrap();
        assert_eq!(cycle.proposal(), Some(&proposal(88, "well done")));
    }

    #[test]
    fn confirm_ends_the_cycle() {
        let mut cycle = GradeCycle::Ungraded;
        cycle.propose(proposal(88, "well done"));
        cycle.confirmed();
        assert_eq!(cycle, GradeCycle::Graded);
        assert_eq!(cycle.proposal(), None);
    }

    #[test]
    fn manual_grading_skips_proposal() {
        // 教师不经 AI，直接给分确认
        let mut cycle = GradeCycle::Ungraded;
        cycle.confirmed();
        assert_eq!(cycle, GradeCycle::Graded);
    }
}
