// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 临时数据库、仓储与引擎装配、测试计划构造
// ==========================================

#![allow(dead_code)]

use chrono::NaiveDate;
use production_scheduling::config::ConfigManager;
use production_scheduling::{db, logging};
use production_scheduling::domain::plan::ProductionPlan;
use production_scheduling::domain::types::{PlanPriority, PlanStatus};
use production_scheduling::engine::{EmptyConstraintProvider, GanttReporter, SchedulingEngine};
use production_scheduling::repository::ProductionPlanRepository;
use rusqlite::Connection;
use std::error::Error;
use std::sync::{Arc, Mutex};
use tempfile::NamedTempFile;

/// 创建临时测试数据库并初始化 schema
///
/// # 返回
/// - NamedTempFile: 临时数据库文件（需要保持存活）
/// - String: 数据库文件路径
pub fn create_test_db() -> Result<(NamedTempFile, String), Box<dyn Error>> {
    let temp_file = NamedTempFile::new()?;
    let db_path = temp_file.path().to_string_lossy().to_string();

    db::open_and_init(&db_path)?;

    Ok((temp_file, db_path))
}

/// 测试上下文: 共享连接上的仓储、配置与引擎
pub struct TestContext {
    pub _temp_file: NamedTempFile,
    pub db_path: String,
    pub repo: Arc<ProductionPlanRepository>,
    pub config: Arc<ConfigManager>,
    pub engine: Arc<SchedulingEngine>,
    pub reporter: Arc<GanttReporter>,
}

pub fn setup() -> TestContext {
    logging::init_test();

    let (temp_file, db_path) = create_test_db().expect("创建测试数据库失败");
    let conn: Connection = db::open_sqlite_connection(&db_path).expect("打开测试数据库失败");
    let conn = Arc::new(Mutex::new(conn));

    let repo = Arc::new(ProductionPlanRepository::new(conn.clone()));
    let config = Arc::new(ConfigManager::from_connection(conn));
    let engine = Arc::new(SchedulingEngine::new(
        repo.clone(),
        config.clone(),
        Arc::new(EmptyConstraintProvider),
    ));
    let reporter = Arc::new(GanttReporter::new(repo.clone()));

    TestContext {
        _temp_file: temp_file,
        db_path,
        repo,
        config,
        engine,
        reporter,
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("非法测试日期")
}

/// 2025 年 1 月的某一天
pub fn jan(day: u32) -> NaiveDate {
    date(2025, 1, day)
}

/// 构造带计划窗口的计划
pub fn plan(number: &str, start: NaiveDate, end: NaiveDate) -> ProductionPlan {
    let mut p = ProductionPlan::new_draft(number, "齿轮箱壳体", 100.0, "件");
    p.planned_start_date = Some(start);
    p.planned_end_date = Some(end);
    p
}

/// 构造指定状态与资源的计划
pub fn plan_on(
    number: &str,
    start: NaiveDate,
    end: NaiveDate,
    status: PlanStatus,
    workshop: &str,
    line: &str,
) -> ProductionPlan {
    let mut p = plan(number, start, end);
    p.status = status;
    p.workshop = Some(workshop.to_string());
    p.production_line = Some(line.to_string());
    p
}

pub fn with_priority(mut p: ProductionPlan, priority: PlanPriority) -> ProductionPlan {
    p.priority = Some(priority);
    p
}

/// 批量写入计划
pub fn seed(ctx: &TestContext, plans: &[ProductionPlan]) {
    ctx.repo.save_batch(plans).expect("写入测试计划失败");
}

/// 重新读取计划
pub fn reload(ctx: &TestContext, plan_id: &str) -> ProductionPlan {
    ctx.repo
        .find_by_id(plan_id)
        .expect("读取计划失败")
        .expect("计划不存在")
}
