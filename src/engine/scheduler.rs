// ==========================================
// 生产计划排程系统 - 排程引擎
// ==========================================
// 入口:
// - auto_schedule: 策略排序 → 单游标顺序贪心落位 → 整批提交
// - manual_schedule: 调用方指定窗口与资源，立即提交
// - reschedule: 修改优先级/交期后，对单个计划重新自动排程
// ==========================================
// 已知限制: 冲突检测只读取运行开始时已提交的计划快照，
//           同批次中刚计算出的落位在下次运行前彼此不可见
// ==========================================

use crate::config::{SchedulingConfig, SchedulingConfigReader};
use crate::domain::constraint::SchedulingConstraint;
use crate::domain::plan::ProductionPlan;
use crate::domain::schedule::{
    ResourceAssignment, SchedulingResult, DEFAULT_PRODUCTION_LINE, DEFAULT_RESPONSIBLE_PERSON,
    DEFAULT_WORKSHOP,
};
use crate::domain::types::{PlanPriority, PlanStatus};
use crate::engine::committer::{CommitSummary, ResultCommitter};
use crate::engine::conflict::ConflictDetector;
use crate::engine::constraint_provider::ConstraintProvider;
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::feasibility::FeasibilityScorer;
use crate::engine::sorter::StrategySorter;
use crate::engine::store::PlanStore;
use crate::engine::strategy::SchedulingStrategy;
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

// ==========================================
// 请求与输出
// ==========================================

/// 自动排程参数
#[derive(Debug, Clone, Default)]
pub struct AutoScheduleOptions {
    /// 指定计划；None 时选取 DRAFT / CONFIRMED 计划
    pub plan_ids: Option<Vec<String>>,
    /// None 时使用配置的默认策略
    pub strategy: Option<SchedulingStrategy>,
    /// 游标起点；None 时第一个计划从其计划开始日落位
    pub start_from: Option<NaiveDate>,
    /// 显式约束；None 时向约束提供方读取
    pub constraints: Option<Vec<SchedulingConstraint>>,
}

/// 自动排程输出
#[derive(Debug, Clone)]
pub struct AutoScheduleOutcome {
    pub strategy: SchedulingStrategy,
    pub results: Vec<SchedulingResult>,
    pub failed: usize,
    pub commit: CommitSummary,
}

/// 单个计划的落位结果（批内隔离失败）
#[derive(Debug, Clone)]
enum PlacementOutcome {
    Placed(SchedulingResult),
    Failed { plan_id: String, reason: String },
}

impl PlacementOutcome {
    fn into_result(self) -> SchedulingResult {
        match self {
            PlacementOutcome::Placed(result) => result,
            PlacementOutcome::Failed { plan_id, reason } => SchedulingResult::failed(plan_id, reason),
        }
    }
}

// ==========================================
// SchedulingEngine - 排程引擎
// ==========================================
pub struct SchedulingEngine {
    store: Arc<dyn PlanStore>,
    config: Arc<dyn SchedulingConfigReader>,
    constraint_provider: Arc<dyn ConstraintProvider>,
    sorter: StrategySorter,
}

impl SchedulingEngine {
    pub fn new(
        store: Arc<dyn PlanStore>,
        config: Arc<dyn SchedulingConfigReader>,
        constraint_provider: Arc<dyn ConstraintProvider>,
    ) -> Self {
        Self {
            store,
            config,
            constraint_provider,
            sorter: StrategySorter::new(),
        }
    }

    async fn load_config(&self) -> EngineResult<SchedulingConfig> {
        self.config
            .load_scheduling_config()
            .await
            .map_err(|e| EngineError::Config(e.to_string()))
    }

    async fn load_constraints(
        &self,
        explicit: Option<Vec<SchedulingConstraint>>,
    ) -> EngineResult<Vec<SchedulingConstraint>> {
        match explicit {
            Some(constraints) => Ok(constraints),
            None => self
                .constraint_provider
                .list_constraints()
                .await
                .map_err(|e| EngineError::Constraint(e.to_string())),
        }
    }

    // ==========================================
    // 自动排程
    // ==========================================

    /// 自动排程
    ///
    /// 1. 选取待排计划并按策略排序
    /// 2. 读取已提交计划快照（CONFIRMED / IN_PROGRESS）
    /// 3. 单游标顺序落位: 开始 = max(游标, 计划开始日)，工期沿用原计划工期
    /// 4. 游标推进到 max(游标, 落位结束日)，无论是否冲突
    /// 5. 整批提交
    ///
    /// 单个计划落位失败时生成评分 0.0 的退化结果，不中止整批；
    /// 提交失败时整批作废并返回 `EngineError::Persistence`
    pub async fn auto_schedule(&self, options: AutoScheduleOptions) -> EngineResult<AutoScheduleOutcome> {
        let config = self.load_config().await?;
        let strategy = options.strategy.unwrap_or(config.default_strategy);

        let candidates = match &options.plan_ids {
            Some(ids) => self.store.list_plans_by_ids(ids)?,
            None => self.store.list_plans_by_statuses(&PlanStatus::PENDING)?,
        };

        info!(
            candidates = candidates.len(),
            strategy = strategy.as_str(),
            start_from = ?options.start_from,
            "开始自动排程"
        );

        if candidates.is_empty() {
            return Ok(AutoScheduleOutcome {
                strategy,
                results: Vec::new(),
                failed: 0,
                commit: CommitSummary::default(),
            });
        }

        let committed = self.store.list_plans_by_statuses(&PlanStatus::OCCUPYING)?;
        let constraints = self.load_constraints(options.constraints).await?;
        let detector = ConflictDetector::new(&committed, &constraints);
        let scorer = FeasibilityScorer::from_config(&config);

        let sorted = self.sorter.sort(candidates, strategy);

        let mut cursor = options.start_from;
        let mut results = Vec::with_capacity(sorted.len());
        let mut failed = 0;

        for plan in &sorted {
            let outcome = match place(plan, cursor, &detector, &scorer) {
                Ok(result) => PlacementOutcome::Placed(result),
                Err(e) => PlacementOutcome::Failed {
                    plan_id: plan.plan_id.clone(),
                    reason: e.to_string(),
                },
            };

            match &outcome {
                PlacementOutcome::Placed(result) => {
                    if let Some(end) = result.scheduled_end.map(|t| t.date()) {
                        cursor = Some(cursor.map_or(end, |c| c.max(end)));
                    }
                    debug!(
                        plan_id = %plan.plan_id,
                        plan_number = %plan.plan_number,
                        conflicts = result.conflicts.len(),
                        score = result.feasibility_score,
                        "计划落位完成"
                    );
                }
                PlacementOutcome::Failed { reason, .. } => {
                    failed += 1;
                    warn!(plan_id = %plan.plan_id, reason = %reason, "计划落位失败");
                }
            }

            results.push(outcome.into_result());
        }

        let committer = ResultCommitter::new(config.confirm_threshold);
        let mut plans_by_id: HashMap<String, ProductionPlan> =
            sorted.into_iter().map(|p| (p.plan_id.clone(), p)).collect();
        let commit = committer.commit(self.store.as_ref(), &mut plans_by_id, &results)?;

        info!(
            results = results.len(),
            failed,
            confirmed = commit.confirmed,
            "自动排程完成"
        );

        Ok(AutoScheduleOutcome {
            strategy,
            results,
            failed,
            commit,
        })
    }

    // ==========================================
    // 手工排程
    // ==========================================

    /// 手工排程
    ///
    /// - start 必须严格早于 end，否则返回 `InvalidWindow` 且不修改任何数据
    /// - 评分: 无冲突 1.0，有冲突取配置的固定值（默认 0.5）
    /// - 结果立即提交
    pub async fn manual_schedule(
        &self,
        plan_id: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
        resources: ResourceAssignment,
    ) -> EngineResult<SchedulingResult> {
        if start >= end {
            return Err(EngineError::InvalidWindow { start, end });
        }

        let plan = self
            .store
            .get_plan(plan_id)?
            .ok_or_else(|| EngineError::NotFound(plan_id.to_string()))?;

        let config = self.load_config().await?;
        let committed = self.store.list_plans_by_statuses(&PlanStatus::OCCUPYING)?;
        let constraints = self.load_constraints(None).await?;
        let detector = ConflictDetector::new(&committed, &constraints);

        // 未指定的角色沿用计划当前资源（提交后该字段保持不变）
        let effective = ResourceAssignment {
            workshop: resources.workshop.clone().or_else(|| plan.workshop.clone()),
            production_line: resources
                .production_line
                .clone()
                .or_else(|| plan.production_line.clone()),
            responsible_person: resources
                .responsible_person
                .clone()
                .or_else(|| plan.responsible_person.clone()),
        };

        let conflicts = detector.find_conflicts(start.date(), end.date(), &effective, &plan.plan_id);
        let feasibility_score = if conflicts.is_empty() {
            1.0
        } else {
            config.manual_conflict_score
        };

        let result = SchedulingResult {
            plan_id: plan.plan_id.clone(),
            scheduled_start: Some(start),
            scheduled_end: Some(end),
            assigned_resources: resources,
            estimated_duration_days: (end.date() - start.date()).num_days(),
            conflicts,
            feasibility_score,
        };

        info!(
            plan_id = %plan.plan_id,
            conflicts = result.conflicts.len(),
            score = result.feasibility_score,
            "手工排程"
        );

        let committer = ResultCommitter::new(config.confirm_threshold);
        let mut plans_by_id = HashMap::from([(plan.plan_id.clone(), plan)]);
        committer.commit(self.store.as_ref(), &mut plans_by_id, std::slice::from_ref(&result))?;

        Ok(result)
    }

    // ==========================================
    // 重新排程
    // ==========================================

    /// 修改优先级/交期后对单个计划重新自动排程
    pub async fn reschedule(
        &self,
        plan_id: &str,
        new_priority: Option<PlanPriority>,
        new_due_date: Option<NaiveDate>,
        strategy: Option<SchedulingStrategy>,
    ) -> EngineResult<SchedulingResult> {
        let mut plan = self
            .store
            .get_plan(plan_id)?
            .ok_or_else(|| EngineError::NotFound(plan_id.to_string()))?;

        if new_priority.is_some() || new_due_date.is_some() {
            if let Some(priority) = new_priority {
                plan.priority = Some(priority);
            }
            if let Some(due) = new_due_date {
                if let Some(start) = plan.planned_start_date.filter(|start| due < *start) {
                    return Err(EngineError::DueDateBeforeStart { start, due });
                }
                plan.planned_end_date = Some(due);
            }
            plan.updated_at = Utc::now().naive_utc();
            self.store
                .save_plan(&plan)
                .map_err(EngineError::Persistence)?;
        }

        info!(
            plan_id,
            priority = ?new_priority,
            due_date = ?new_due_date,
            "重新排程"
        );

        let outcome = self
            .auto_schedule(AutoScheduleOptions {
                plan_ids: Some(vec![plan_id.to_string()]),
                strategy,
                ..Default::default()
            })
            .await?;

        outcome
            .results
            .into_iter()
            .next()
            .ok_or_else(|| EngineError::NotFound(plan_id.to_string()))
    }
}

// ==========================================
// 落位计算
// ==========================================

/// 资源缺省时使用占位标识
fn default_resources(plan: &ProductionPlan) -> ResourceAssignment {
    fn or_default(value: &Option<String>, default: &str) -> String {
        value
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(default)
            .to_string()
    }

    ResourceAssignment::full(
        or_default(&plan.workshop, DEFAULT_WORKSHOP),
        or_default(&plan.production_line, DEFAULT_PRODUCTION_LINE),
        or_default(&plan.responsible_person, DEFAULT_RESPONSIBLE_PERSON),
    )
}

/// 计算单个计划的落位
fn place(
    plan: &ProductionPlan,
    cursor: Option<NaiveDate>,
    detector: &ConflictDetector<'_>,
    scorer: &FeasibilityScorer,
) -> EngineResult<SchedulingResult> {
    let planned_start = plan
        .planned_start_date
        .ok_or_else(|| EngineError::Placement("计划开始日期缺失".to_string()))?;
    let planned_end = plan
        .planned_end_date
        .ok_or_else(|| EngineError::Placement("计划结束日期缺失".to_string()))?;

    let duration_days = (planned_end - planned_start).num_days();
    if duration_days < 0 {
        return Err(EngineError::Placement(format!(
            "计划结束日期 {} 早于开始日期 {}",
            planned_end, planned_start
        )));
    }

    let start = cursor.map_or(planned_start, |c| c.max(planned_start));
    let end = start
        .checked_add_signed(Duration::days(duration_days))
        .ok_or_else(|| EngineError::Placement(format!("落位窗口超出日期范围: {}", start)))?;

    let resources = default_resources(plan);
    let conflicts = detector.find_conflicts(start, end, &resources, &plan.plan_id);
    let feasibility_score = scorer.score(plan, end, conflicts.len());

    Ok(SchedulingResult {
        plan_id: plan.plan_id.clone(),
        scheduled_start: Some(start.and_time(NaiveTime::MIN)),
        scheduled_end: Some(end.and_time(NaiveTime::MIN)),
        assigned_resources: resources,
        estimated_duration_days: duration_days,
        conflicts,
        feasibility_score,
    })
}
