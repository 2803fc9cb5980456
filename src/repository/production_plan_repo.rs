// ==========================================
// 生产计划排程系统 - 生产计划数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 约束: 所有查询使用参数化,防止 SQL 注入
// ==========================================

use crate::db::{DATETIME_FORMAT, DATE_FORMAT};
use crate::domain::plan::ProductionPlan;
use crate::domain::types::{PlanPriority, PlanStatus};
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{params, params_from_iter, Connection, Row};
use std::sync::{Arc, Mutex};

const SELECT_COLUMNS: &str = r#"plan_id, plan_number, plan_name, product_name, quantity, unit,
       planned_start_date, planned_end_date, actual_start_date, actual_end_date,
       priority, status, workshop, production_line, responsible_person, progress,
       created_at, updated_at"#;

const UPSERT_SQL: &str = r#"INSERT INTO production_plan (
        plan_id, plan_number, plan_name, product_name, quantity, unit,
        planned_start_date, planned_end_date, actual_start_date, actual_end_date,
        priority, status, workshop, production_line, responsible_person, progress,
        created_at, updated_at
    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18)
    ON CONFLICT(plan_id) DO UPDATE SET
        plan_number = excluded.plan_number,
        plan_name = excluded.plan_name,
        product_name = excluded.product_name,
        quantity = excluded.quantity,
        unit = excluded.unit,
        planned_start_date = excluded.planned_start_date,
        planned_end_date = excluded.planned_end_date,
        actual_start_date = excluded.actual_start_date,
        actual_end_date = excluded.actual_end_date,
        priority = excluded.priority,
        status = excluded.status,
        workshop = excluded.workshop,
        production_line = excluded.production_line,
        responsible_person = excluded.responsible_person,
        progress = excluded.progress,
        updated_at = excluded.updated_at"#;

// ==========================================
// ProductionPlanRepository - 生产计划仓储
// ==========================================
pub struct ProductionPlanRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ProductionPlanRepository {
    /// 创建新的 ProductionPlanRepository 实例
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 按 plan_id 查询计划
    ///
    /// # 返回
    /// - `Ok(Some(plan))`: 找到计划
    /// - `Ok(None)`: 未找到
    /// - `Err`: 数据库错误
    pub fn find_by_id(&self, plan_id: &str) -> RepositoryResult<Option<ProductionPlan>> {
        let conn = self.get_conn()?;

        let sql = format!("SELECT {} FROM production_plan WHERE plan_id = ?1", SELECT_COLUMNS);
        match conn.query_row(&sql, params![plan_id], map_row) {
            Ok(plan) => Ok(Some(plan)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// 按 plan_id 列表查询（未知 id 忽略）
    ///
    /// 结果按 created_at, plan_id 升序，保证排序输入稳定
    pub fn list_by_ids(&self, plan_ids: &[String]) -> RepositoryResult<Vec<ProductionPlan>> {
        if plan_ids.is_empty() {
            return Ok(Vec::new());
        }

        let conn = self.get_conn()?;
        let placeholders = vec!["?"; plan_ids.len()].join(", ");
        let sql = format!(
            "SELECT {} FROM production_plan WHERE plan_id IN ({}) ORDER BY created_at, plan_id",
            SELECT_COLUMNS, placeholders
        );

        let mut stmt = conn.prepare(&sql)?;
        let plans = stmt
            .query_map(params_from_iter(plan_ids.iter()), map_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(plans)
    }

    /// 按状态集合查询
    pub fn list_by_statuses(&self, statuses: &[PlanStatus]) -> RepositoryResult<Vec<ProductionPlan>> {
        if statuses.is_empty() {
            return Ok(Vec::new());
        }

        let conn = self.get_conn()?;
        let placeholders = vec!["?"; statuses.len()].join(", ");
        let sql = format!(
            "SELECT {} FROM production_plan WHERE status IN ({}) ORDER BY created_at, plan_id",
            SELECT_COLUMNS, placeholders
        );

        let mut stmt = conn.prepare(&sql)?;
        let plans = stmt
            .query_map(params_from_iter(statuses.iter().map(|s| s.to_db_str())), map_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(plans)
    }

    /// 新增或更新计划 (UPSERT)
    pub fn save(&self, plan: &ProductionPlan) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        upsert(&conn, plan)?;
        Ok(())
    }

    /// 批量新增或更新（单事务）
    ///
    /// # 红线
    /// - 必须在事务中完成，任一失败整批回滚
    pub fn save_batch(&self, plans: &[ProductionPlan]) -> RepositoryResult<usize> {
        if plans.is_empty() {
            return Ok(0);
        }

        let mut conn = self.get_conn()?;
        let tx = conn
            .transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        for plan in plans {
            upsert(&tx, plan)?;
        }

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;
        Ok(plans.len())
    }
}

fn fmt_date(date: Option<NaiveDate>) -> Option<String> {
    date.map(|d| d.format(DATE_FORMAT).to_string())
}

/// 执行单条 UPSERT（连接或事务内均可）
fn upsert(conn: &Connection, plan: &ProductionPlan) -> rusqlite::Result<usize> {
    conn.execute(
        UPSERT_SQL,
        params![
            &plan.plan_id,
            &plan.plan_number,
            &plan.plan_name,
            &plan.product_name,
            plan.quantity,
            &plan.unit,
            fmt_date(plan.planned_start_date),
            fmt_date(plan.planned_end_date),
            fmt_date(plan.actual_start_date),
            fmt_date(plan.actual_end_date),
            plan.priority.map(|p| p.to_db_str()),
            plan.status.to_db_str(),
            &plan.workshop,
            &plan.production_line,
            &plan.responsible_person,
            plan.progress,
            plan.created_at.format(DATETIME_FORMAT).to_string(),
            plan.updated_at.format(DATETIME_FORMAT).to_string(),
        ],
    )
}

fn conversion_error(idx: usize, err: impl std::error::Error + Send + Sync + 'static) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(err))
}

fn parse_date(row: &Row, idx: usize) -> rusqlite::Result<Option<NaiveDate>> {
    match row.get::<_, Option<String>>(idx)? {
        Some(raw) => NaiveDate::parse_from_str(&raw, DATE_FORMAT)
            .map(Some)
            .map_err(|e| conversion_error(idx, e)),
        None => Ok(None),
    }
}

fn parse_datetime(row: &Row, idx: usize) -> rusqlite::Result<NaiveDateTime> {
    let raw: String = row.get(idx)?;
    NaiveDateTime::parse_from_str(&raw, DATETIME_FORMAT).map_err(|e| conversion_error(idx, e))
}

/// 映射数据库行到 ProductionPlan
fn map_row(row: &Row) -> rusqlite::Result<ProductionPlan> {
    let status_raw: String = row.get(11)?;
    let status = PlanStatus::from_str(&status_raw).ok_or_else(|| {
        conversion_error(
            11,
            RepositoryError::FieldValueError {
                field: "status".to_string(),
                message: format!("未知计划状态: {}", status_raw),
            },
        )
    })?;

    // 未识别的优先级按未知处理（排序秩最低）
    let priority = row
        .get::<_, Option<String>>(10)?
        .and_then(|raw| PlanPriority::from_str(&raw));

    let mut plan = ProductionPlan {
        plan_id: row.get(0)?,
        plan_number: row.get(1)?,
        plan_name: row.get(2)?,
        product_name: row.get(3)?,
        quantity: row.get(4)?,
        unit: row.get(5)?,
        planned_start_date: parse_date(row, 6)?,
        planned_end_date: parse_date(row, 7)?,
        actual_start_date: parse_date(row, 8)?,
        actual_end_date: parse_date(row, 9)?,
        priority,
        status,
        workshop: row.get(12)?,
        production_line: row.get(13)?,
        responsible_person: row.get(14)?,
        progress: 0.0,
        created_at: parse_datetime(row, 16)?,
        updated_at: parse_datetime(row, 17)?,
    };
    plan.set_progress(row.get(15)?);
    Ok(plan)
}
