// ==========================================
// 生产计划排程系统 - 排程结果提交
// ==========================================
// 规则:
// - 排程窗口以日期精度写回 planned_start_date / planned_end_date
// - 结果中指定的资源角色覆盖计划原值，未指定的保持不变
// - 仅当无冲突且评分 > 确认阈值时，状态提升为 CONFIRMED
// - 失败结果（无窗口）不提交
// - 整批一次写入，写入失败则整批作废
// ==========================================

use crate::domain::plan::ProductionPlan;
use crate::domain::schedule::SchedulingResult;
use crate::domain::types::PlanStatus;
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::store::PlanStore;
use chrono::Utc;
use std::collections::HashMap;
use tracing::{debug, info};

/// 提交统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommitSummary {
    pub committed: usize,
    pub confirmed: usize,
    pub skipped: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResultCommitter {
    confirm_threshold: f64,
}

impl ResultCommitter {
    pub fn new(confirm_threshold: f64) -> Self {
        Self { confirm_threshold }
    }

    /// 结果是否满足确认条件
    pub fn qualifies_for_confirmation(&self, result: &SchedulingResult) -> bool {
        result.conflicts.is_empty() && result.feasibility_score > self.confirm_threshold
    }

    /// 将单个结果应用到计划（仅内存）
    ///
    /// # 返回
    /// - `true`: 已应用且状态提升为 CONFIRMED
    /// - `false`: 已应用但状态未变，或结果无窗口未应用
    pub fn apply(&self, plan: &mut ProductionPlan, result: &SchedulingResult) -> bool {
        let (start, end) = match (result.scheduled_start, result.scheduled_end) {
            (Some(start), Some(end)) => (start, end),
            _ => return false,
        };

        plan.planned_start_date = Some(start.date());
        plan.planned_end_date = Some(end.date());

        let resources = &result.assigned_resources;
        if let Some(workshop) = &resources.workshop {
            plan.workshop = Some(workshop.clone());
        }
        if let Some(line) = &resources.production_line {
            plan.production_line = Some(line.clone());
        }
        if let Some(person) = &resources.responsible_person {
            plan.responsible_person = Some(person.clone());
        }

        plan.updated_at = Utc::now().naive_utc();

        if self.qualifies_for_confirmation(result) {
            plan.status = PlanStatus::Confirmed;
            true
        } else {
            false
        }
    }

    /// 批量提交
    ///
    /// # 参数
    /// - `store`: 记录存储
    /// - `plans`: 本批计划（按 plan_id 索引），会被就地更新
    /// - `results`: 本批排程结果
    pub fn commit(
        &self,
        store: &dyn PlanStore,
        plans: &mut HashMap<String, ProductionPlan>,
        results: &[SchedulingResult],
    ) -> EngineResult<CommitSummary> {
        let mut summary = CommitSummary::default();
        let mut to_save = Vec::with_capacity(results.len());

        for result in results {
            let plan = match plans.get_mut(&result.plan_id) {
                Some(plan) if result.is_placed() => plan,
                _ => {
                    summary.skipped += 1;
                    continue;
                }
            };

            if self.apply(plan, result) {
                summary.confirmed += 1;
            }
            debug!(
                plan_id = %plan.plan_id,
                status = %plan.status,
                "排程结果已应用"
            );
            to_save.push(plan.clone());
        }

        summary.committed = store
            .save_plans(&to_save)
            .map_err(EngineError::Persistence)?;

        info!(
            committed = summary.committed,
            confirmed = summary.confirmed,
            skipped = summary.skipped,
            "排程结果提交完成"
        );

        Ok(summary)
    }
}

impl Default for ResultCommitter {
    fn default() -> Self {
        Self::new(0.8)
    }
}
