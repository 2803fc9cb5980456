// ==========================================
// 甘特图 / 冲突分析 / API 层集成测试
// ==========================================

mod test_helpers;

use chrono::NaiveTime;
use production_scheduling::api::{
    ApiError, AutoScheduleRequest, ConflictFilter, ManualScheduleRequest, RescheduleRequest,
    ScheduleApi,
};
use production_scheduling::app::AppState;
use production_scheduling::domain::report::{ConflictSeverity, TimelineFilter};
use production_scheduling::domain::schedule::ResourceAssignment;
use production_scheduling::domain::types::{PlanPriority, PlanStatus};
use production_scheduling::engine::SchedulingStrategy;
use test_helpers::*;

fn api(ctx: &TestContext) -> ScheduleApi {
    ScheduleApi::new(ctx.engine.clone(), ctx.reporter.clone())
}

// ==========================================
// 甘特图
// ==========================================

#[test]
fn test_timeline_lists_committed_plans_in_order() {
    let ctx = setup();
    let late = plan_on("PP-2", jan(8), jan(12), PlanStatus::Confirmed, "一车间", "A线");
    let early = plan_on("PP-1", jan(2), jan(4), PlanStatus::InProgress, "二车间", "B线");
    let done = plan_on("PP-0", jan(1), jan(3), PlanStatus::Completed, "一车间", "B线");
    let draft = plan_on("PP-9", jan(1), jan(2), PlanStatus::Draft, "一车间", "A线");
    seed(&ctx, &[late, early, done, draft]);

    let view = ctx.reporter.build_timeline(&TimelineFilter::default()).unwrap();

    let numbers: Vec<&str> = view.tasks.iter().map(|t| t.plan_number.as_str()).collect();
    assert_eq!(numbers, vec!["PP-0", "PP-1", "PP-2"]);
    assert_eq!(view.resources.workshops, vec!["一车间", "二车间"]);
    assert_eq!(view.resources.production_lines, vec!["A线", "B线"]);
}

#[test]
fn test_timeline_keeps_undated_committed_plan_last() {
    let ctx = setup();
    let mut undated = plan_on("PP-0", jan(1), jan(1), PlanStatus::Confirmed, "一车间", "A线");
    undated.planned_start_date = None;
    undated.planned_end_date = None;
    let dated = plan_on("PP-5", jan(6), jan(7), PlanStatus::Confirmed, "一车间", "A线");
    seed(&ctx, &[undated.clone(), dated]);

    let view = ctx.reporter.build_timeline(&TimelineFilter::default()).unwrap();

    assert_eq!(view.tasks.len(), 2);
    assert_eq!(view.tasks[0].plan_number, "PP-5");
    assert_eq!(view.tasks[0].planned_start, Some(jan(6)));
    let last = &view.tasks[1];
    assert_eq!(last.plan_id, undated.plan_id);
    assert_eq!(last.planned_start, None);
    assert_eq!(last.planned_end, None);

    // 指定日期范围时无法判定重叠，不出现在结果中
    let ranged = ctx
        .reporter
        .build_timeline(&TimelineFilter {
            date_range: Some((jan(1), jan(31))),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(ranged.tasks.len(), 1);
}

#[test]
fn test_timeline_filters_by_range_and_resource() {
    let ctx = setup();
    seed(
        &ctx,
        &[
            plan_on("PP-1", jan(1), jan(3), PlanStatus::Confirmed, "一车间", "A线"),
            plan_on("PP-2", jan(10), jan(12), PlanStatus::Confirmed, "一车间", "A线"),
            plan_on("PP-3", jan(2), jan(4), PlanStatus::Confirmed, "二车间", "A线"),
        ],
    );

    let view = ctx
        .reporter
        .build_timeline(&TimelineFilter {
            date_range: Some((jan(3), jan(9))),
            workshop: Some("一车间".to_string()),
            production_line: None,
        })
        .unwrap();

    assert_eq!(view.tasks.len(), 1);
    assert_eq!(view.tasks[0].plan_number, "PP-1");
}

// ==========================================
// 冲突分析
// ==========================================

#[test]
fn test_conflict_report_pairs_and_severity() {
    let ctx = setup();
    let a = with_priority(
        plan_on("PP-A", jan(1), jan(5), PlanStatus::Confirmed, "一车间", "A线"),
        PlanPriority::High,
    );
    let b = plan_on("PP-B", jan(4), jan(8), PlanStatus::InProgress, "一车间", "A线");
    let c = plan_on("PP-C", jan(8), jan(9), PlanStatus::Confirmed, "一车间", "A线");
    // 不同产线，不与以上冲突
    let d = plan_on("PP-D", jan(1), jan(9), PlanStatus::Confirmed, "一车间", "B线");
    // 已完成计划不参与
    let e = plan_on("PP-E", jan(1), jan(9), PlanStatus::Completed, "一车间", "A线");
    seed(&ctx, &[a, b, c, d, e]);

    let report = ctx.reporter.analyze_conflicts(None).unwrap();

    assert_eq!(report.summary.total_conflicts, 2);
    assert_eq!(report.summary.affected_plans, 3);
    assert_eq!(report.summary.high_severity, 1);

    let ab = report
        .resource_conflicts
        .iter()
        .find(|c| {
            let pair = [c.first_plan_number.as_str(), c.second_plan_number.as_str()];
            pair.contains(&"PP-A") && pair.contains(&"PP-B")
        })
        .unwrap();
    assert_eq!(ab.severity, ConflictSeverity::High);
    assert_eq!(ab.overlap_start, jan(4));
    assert_eq!(ab.overlap_end, jan(5));
}

#[test]
fn test_conflict_report_respects_date_range() {
    let ctx = setup();
    seed(
        &ctx,
        &[
            plan_on("PP-A", jan(1), jan(5), PlanStatus::Confirmed, "一车间", "A线"),
            plan_on("PP-B", jan(4), jan(8), PlanStatus::Confirmed, "一车间", "A线"),
        ],
    );

    let report = ctx.reporter.analyze_conflicts(Some((jan(20), jan(25)))).unwrap();
    assert_eq!(report.summary.total_conflicts, 0);
    assert!(report.resource_conflicts.is_empty());
}

// ==========================================
// ScheduleApi
// ==========================================

#[tokio::test]
async fn test_api_auto_schedule_counts() {
    let ctx = setup();
    let busy = plan_on("WIP-1", jan(1), jan(10), PlanStatus::InProgress, "一车间", "A线");
    let blocked = plan_on("PP-X", jan(2), jan(3), PlanStatus::Draft, "一车间", "A线");
    let free = plan_on("PP-Y", jan(2), jan(3), PlanStatus::Draft, "二车间", "B线");
    let mut undated = plan("PP-Z", jan(1), jan(1));
    undated.planned_start_date = None;
    seed(&ctx, &[busy, blocked, free, undated]);

    let response = api(&ctx)
        .auto_schedule(AutoScheduleRequest {
            strategy: Some("EDD".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(response.strategy, SchedulingStrategy::EarliestDueDate);
    assert_eq!(response.total, 3);
    assert_eq!(response.failed, 1);
    assert_eq!(response.with_conflicts, 1);
    assert_eq!(response.confirmed, 1);
}

#[tokio::test]
async fn test_api_rejects_unknown_strategy_and_priority() {
    let ctx = setup();
    let api = api(&ctx);

    let err = api
        .auto_schedule(AutoScheduleRequest {
            strategy: Some("random".to_string()),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput(_)));

    let p = plan("PP-1", jan(1), jan(2));
    seed(&ctx, &[p.clone()]);
    let err = api
        .reschedule(RescheduleRequest {
            plan_id: p.plan_id.clone(),
            priority: Some("CRITICAL".to_string()),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput(_)));
    assert_eq!(reload(&ctx, &p.plan_id).priority, None);

    let err = api
        .reschedule(RescheduleRequest {
            plan_id: p.plan_id.clone(),
            due_date: Some(date(2024, 12, 31)),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput(_)));
    assert_eq!(reload(&ctx, &p.plan_id).planned_end_date, Some(jan(2)));
}

#[tokio::test]
async fn test_api_error_taxonomy() {
    let ctx = setup();
    let api = api(&ctx);

    let t = jan(1).and_time(NaiveTime::MIN);
    let err = api
        .manual_schedule(ManualScheduleRequest {
            plan_id: "PP-1".to_string(),
            start: t,
            end: t,
            resources: ResourceAssignment::default(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidWindow(_)));

    let err = api
        .reschedule(RescheduleRequest {
            plan_id: "no-such-plan".to_string(),
            priority: Some("HIGH".to_string()),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));

    let err = api
        .reschedule(RescheduleRequest {
            plan_id: "  ".to_string(),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput(_)));

    let err = api
        .analyze_conflicts(ConflictFilter {
            date_range: Some((jan(9), jan(1))),
        })
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput(_)));
}

#[tokio::test]
async fn test_api_reschedule_with_strategy_override() {
    let ctx = setup();
    let p = plan("PP-1", jan(3), jan(6));
    seed(&ctx, &[p.clone()]);

    let result = api(&ctx)
        .reschedule(RescheduleRequest {
            plan_id: p.plan_id.clone(),
            priority: Some("urgent".to_string()),
            due_date: None,
            strategy: Some("priority-first".to_string()),
        })
        .await
        .unwrap();

    assert_eq!(result.feasibility_score, 1.0);
    let stored = reload(&ctx, &p.plan_id);
    assert_eq!(stored.priority, Some(PlanPriority::Urgent));
    assert_eq!(stored.status, PlanStatus::Confirmed);
}

// ==========================================
// AppState 装配
// ==========================================

#[tokio::test]
async fn test_app_state_end_to_end() {
    let (_temp, db_path) = create_test_db().unwrap();
    let state = AppState::new(db_path).unwrap();

    let p = plan("PP-APP", jan(1), jan(5));
    state.plan_repo.save(&p).unwrap();

    let response = state
        .schedule_api
        .auto_schedule(AutoScheduleRequest::default())
        .await
        .unwrap();
    assert_eq!(response.confirmed, 1);

    let view = state
        .schedule_api
        .get_timeline(TimelineFilter::default())
        .unwrap();
    assert_eq!(view.tasks.len(), 1);
    assert_eq!(view.tasks[0].plan_id, p.plan_id);
}
