// ==========================================
// 生产计划排程系统 - 排程 API
// ==========================================
// 职责: 自动/手工/重新排程，甘特图与冲突分析查询
// 说明: 与传输层无关，请求/响应均为可序列化 DTO
// ==========================================

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::error::{ApiError, ApiResult};
use crate::domain::report::{ConflictReport, TimelineFilter, TimelineView};
use crate::domain::schedule::{ResourceAssignment, SchedulingResult};
use crate::domain::types::PlanPriority;
use crate::engine::{AutoScheduleOptions, GanttReporter, SchedulingEngine, SchedulingStrategy};

// ==========================================
// 请求 / 响应 DTO
// ==========================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AutoScheduleRequest {
    pub plan_ids: Option<Vec<String>>,
    pub strategy: Option<String>,
    pub start_from: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutoScheduleResponse {
    pub strategy: SchedulingStrategy,
    pub results: Vec<SchedulingResult>,
    pub total: usize,
    pub confirmed: usize,
    pub with_conflicts: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManualScheduleRequest {
    pub plan_id: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    #[serde(default)]
    pub resources: ResourceAssignment,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RescheduleRequest {
    pub plan_id: String,
    pub priority: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub strategy: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConflictFilter {
    pub date_range: Option<(NaiveDate, NaiveDate)>,
}

// ==========================================
// ScheduleApi - 排程 API
// ==========================================
pub struct ScheduleApi {
    engine: Arc<SchedulingEngine>,
    reporter: Arc<GanttReporter>,
}

impl ScheduleApi {
    pub fn new(engine: Arc<SchedulingEngine>, reporter: Arc<GanttReporter>) -> Self {
        Self { engine, reporter }
    }

    /// 自动排程
    ///
    /// # 返回
    /// - Ok(AutoScheduleResponse): 每个参与计划一条结果（含失败的退化结果）
    /// - Err(ApiError::InvalidInput): 策略名无法识别
    /// - Err(ApiError::PersistenceFailure): 提交失败，整批作废
    pub async fn auto_schedule(&self, request: AutoScheduleRequest) -> ApiResult<AutoScheduleResponse> {
        let strategy = parse_strategy(request.strategy.as_deref())?;
        if let Some(ids) = &request.plan_ids {
            if ids.iter().any(|id| id.trim().is_empty()) {
                return Err(ApiError::InvalidInput("计划ID不能为空".to_string()));
            }
        }

        let outcome = self
            .engine
            .auto_schedule(AutoScheduleOptions {
                plan_ids: request.plan_ids,
                strategy,
                start_from: request.start_from,
                constraints: None,
            })
            .await?;

        let with_conflicts = outcome
            .results
            .iter()
            .filter(|r| r.is_placed() && r.has_conflicts())
            .count();

        Ok(AutoScheduleResponse {
            strategy: outcome.strategy,
            total: outcome.results.len(),
            confirmed: outcome.commit.confirmed,
            with_conflicts,
            failed: outcome.failed,
            results: outcome.results,
        })
    }

    /// 手工排程
    ///
    /// # 返回
    /// - Err(ApiError::InvalidWindow): start >= end
    /// - Err(ApiError::NotFound): 计划不存在
    pub async fn manual_schedule(&self, request: ManualScheduleRequest) -> ApiResult<SchedulingResult> {
        require_plan_id(&request.plan_id)?;

        info!(plan_id = %request.plan_id, start = %request.start, end = %request.end, "手工排程请求");

        let result = self
            .engine
            .manual_schedule(&request.plan_id, request.start, request.end, request.resources)
            .await?;
        Ok(result)
    }

    /// 重新排程
    ///
    /// # 返回
    /// - Err(ApiError::NotFound): 计划不存在
    /// - Err(ApiError::InvalidInput): 优先级或策略无法识别，或交期早于计划开始日期
    pub async fn reschedule(&self, request: RescheduleRequest) -> ApiResult<SchedulingResult> {
        require_plan_id(&request.plan_id)?;

        let priority = match request.priority.as_deref() {
            Some(raw) => Some(
                PlanPriority::from_str(raw)
                    .ok_or_else(|| ApiError::InvalidInput(format!("未知优先级: {}", raw)))?,
            ),
            None => None,
        };
        let strategy = parse_strategy(request.strategy.as_deref())?;

        let result = self
            .engine
            .reschedule(&request.plan_id, priority, request.due_date, strategy)
            .await?;
        Ok(result)
    }

    /// 甘特图
    pub fn get_timeline(&self, filter: TimelineFilter) -> ApiResult<TimelineView> {
        validate_range(filter.date_range)?;
        Ok(self.reporter.build_timeline(&filter)?)
    }

    /// 资源冲突分析
    pub fn analyze_conflicts(&self, filter: ConflictFilter) -> ApiResult<ConflictReport> {
        validate_range(filter.date_range)?;
        Ok(self.reporter.analyze_conflicts(filter.date_range)?)
    }
}

// ==========================================
// 参数校验
// ==========================================

fn require_plan_id(plan_id: &str) -> ApiResult<()> {
    if plan_id.trim().is_empty() {
        return Err(ApiError::InvalidInput("计划ID不能为空".to_string()));
    }
    Ok(())
}

fn parse_strategy(raw: Option<&str>) -> ApiResult<Option<SchedulingStrategy>> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => s
            .parse::<SchedulingStrategy>()
            .map(Some)
            .map_err(ApiError::InvalidInput),
        None => Ok(None),
    }
}

fn validate_range(range: Option<(NaiveDate, NaiveDate)>) -> ApiResult<()> {
    if let Some((from, to)) = range {
        if from > to {
            return Err(ApiError::InvalidInput(format!(
                "日期范围无效: {} 晚于 {}",
                from, to
            )));
        }
    }
    Ok(())
}
