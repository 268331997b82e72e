use blackboard_client::models::GradeState;
use blackboard_client::services::{AssignmentEditor, SubmissionStore};
use blackboard_client::utils::logging;
use blackboard_client::{
    ApiExecutor, Config, GradeCycle, GradeFlow, RequestContext, SubmitCtx, SubmitFlow, UploadFile,
};

fn live_setup() -> (Config, ApiExecutor, RequestContext) {
    logging::init();
    let config = Config::from_env();
    let executor = ApiExecutor::new(&config);
    let ctx = RequestContext::from_env().expect("需要 BLACKBOARD_TOKEN / BLACKBOARD_USER_ID");
    (config, executor, ctx)
}

fn live_assignment_id() -> String {
    std::env::var("ASSIGNMENT_ID").expect("需要 ASSIGNMENT_ID")
}

fn live_course_id() -> String {
    std::env::var("COURSE_ID").unwrap_or_default()
}

#[tokio::test]
#[ignore] // 默认忽略，需要手动运行：cargo test -- --ignored
async fn test_submit_then_grade_end_to_end() {
    let (config, executor, ctx) = live_setup();
    let assignment_id = live_assignment_id();
    let submit_ctx = SubmitCtx::new(assignment_id.clone(), live_course_id(), 1);

    // 学生提交一份 5 MB 的 report.pdf
    let file = UploadFile::new("report.pdf", vec![0x25u8; 5 * 1024 * 1024]);
    let submit_flow = SubmitFlow::new(&config);
    let snapshot = submit_flow
        .run(&executor, &ctx, &submit_ctx, &file, "final report")
        .await
        .expect("提交失败");

    // 新提交必须出现在快照里，且处于待批改状态
    let submission = snapshot
        .iter()
        .find(|s| s.submitter_id == ctx.user_id && s.file_name == "report.pdf")
        .expect("快照里找不到刚才的提交")
        .clone();
    assert!(submission.grade.is_ungraded());
    assert_eq!(submission.grade.wire_score(), "待批改");

    // 教师请求 AI 建议（不带参考文件）：建议不落库
    let grade_flow = GradeFlow::new(&config);
    let mut cycle = GradeCycle::from_submission(&submission);
    let proposal = grade_flow
        .propose(&executor, &ctx, &submission, None, &mut cycle)
        .await
        .expect("AI 批改失败");
    assert!(!proposal.feedback.is_empty());

    let before_confirm = SubmissionStore::new()
        .load_for_assignment(&executor, &ctx, &assignment_id)
        .await
        .expect("拉取快照失败");
    let unchanged = SubmissionStore::find(&before_confirm, &submission.uuid).unwrap();
    assert!(
        unchanged.grade.is_ungraded(),
        "确认之前建议不应出现在列表里"
    );

    // 确认 88 / "well done" 后，重查的快照必须立刻可见（写后读）
    let snapshot = grade_flow
        .confirm(
            &executor,
            &ctx,
            &assignment_id,
            &submission.uuid,
            "88",
            "well done",
            &mut cycle,
        )
        .await
        .expect("确认成绩失败");

    let graded = SubmissionStore::find(&snapshot, &submission.uuid).unwrap();
    assert_eq!(
        graded.grade,
        GradeState::Graded {
            score: 88,
            feedback: "well done".to_string()
        }
    );
}

#[tokio::test]
#[ignore]
async fn test_double_propose_does_not_mutate_submission() {
    let (config, executor, ctx) = live_setup();
    let assignment_id = live_assignment_id();

    let store = SubmissionStore::new();
    let snapshot = store
        .load_for_assignment(&executor, &ctx, &assignment_id)
        .await
        .expect("拉取快照失败");
    let submission = snapshot
        .iter()
        .find(|s| s.grade.is_ungraded())
        .expect("需要至少一份待批改的提交")
        .clone();

    let grade_flow = GradeFlow::new(&config);
    let mut cycle = GradeCycle::from_submission(&submission);

    // 连续两次请求建议，均不确认
    grade_flow
        .propose(&executor, &ctx, &submission, None, &mut cycle)
        .await
        .expect("第一次批改失败");
    grade_flow
        .propose(&executor, &ctx, &submission, None, &mut cycle)
        .await
        .expect("第二次批改失败");

    // 持久化状态必须原样未动
    let snapshot = store
        .load_for_assignment(&executor, &ctx, &assignment_id)
        .await
        .expect("拉取快照失败");
    let unchanged = SubmissionStore::find(&snapshot, &submission.uuid).unwrap();
    assert!(unchanged.grade.is_ungraded());
}

#[tokio::test]
#[ignore]
async fn test_assignment_edit_roundtrip() {
    let (_config, executor, ctx) = live_setup();
    let assignment_id = live_assignment_id();

    let assignments = blackboard_client::AssignmentStore::new()
        .load_all(&executor, &ctx)
        .await
        .expect("加载作业失败");
    let assignment = blackboard_client::AssignmentStore::find(&assignments, &assignment_id)
        .expect("找不到作业")
        .clone();

    let mut draft = AssignmentEditor::load_draft(&assignment);
    draft.add_requirement("联调测试追加的要求");

    let editor = AssignmentEditor::new();
    let updated = editor
        .save(&executor, &ctx, &assignment, &draft)
        .await
        .expect("保存作业失败");

    assert_eq!(updated.requirements.last().unwrap(), "联调测试追加的要求");

    // 恢复原状，避免污染数据
    let restore = AssignmentEditor::load_draft(&assignment);
    editor
        .save(&executor, &ctx, &updated, &restore)
        .await
        .expect("恢复作业失败");
}

#[tokio::test]
#[ignore]
async fn test_review_links_for_graded_file() {
    let (config, executor, ctx) = live_setup();
    let assignment_id = live_assignment_id();

    let snapshot = SubmissionStore::new()
        .load_for_assignment(&executor, &ctx, &assignment_id)
        .await
        .expect("拉取快照失败");
    let submission = snapshot
        .iter()
        .find(|s| !s.storage_key.is_empty())
        .expect("需要至少一份带文件的提交");

    let grade_flow = GradeFlow::new(&config);
    let (submitted_url, grader_url) = grade_flow
        .review_links(&executor, &ctx, submission, None)
        .await
        .expect("获取下载地址失败");

    assert!(submitted_url.starts_with("http"));
    assert!(grader_url.is_none());
}
