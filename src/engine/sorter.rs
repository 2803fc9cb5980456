// ==========================================
// 生产计划排程系统 - 策略排序引擎
// ==========================================
// 职责: 按选定策略对待排计划排序
// 输入: 待排计划列表
// 输出: 排序后的计划列表（稳定排序，同键保持输入顺序）
// ==========================================

use crate::domain::plan::ProductionPlan;
use crate::domain::types::PlanPriority;
use crate::engine::strategy::SchedulingStrategy;
use chrono::NaiveDate;
use std::cmp::Ordering;
use tracing::debug;

// ==========================================
// StrategySorter - 策略排序引擎
// ==========================================
pub struct StrategySorter {
    // 无状态引擎,不需要注入依赖
}

impl StrategySorter {
    pub fn new() -> Self {
        Self {}
    }

    /// 按策略排序
    ///
    /// 排序键:
    /// - EARLIEST_DUE_DATE: planned_end_date 升序
    /// - PRIORITY_FIRST: (优先级秩, planned_end_date) 升序
    /// - SHORTEST_PROCESSING_TIME: 计划工期(天) 升序
    /// - BALANCED / CRITICAL_RATIO: (优先级秩, planned_end_date, 工期) 升序
    ///
    /// 缺失日期排在最后
    pub fn sort(&self, mut plans: Vec<ProductionPlan>, strategy: SchedulingStrategy) -> Vec<ProductionPlan> {
        if strategy == SchedulingStrategy::CriticalRatio {
            debug!("CRITICAL_RATIO 尚无独立排序规则，按 BALANCED 排序");
        }

        plans.sort_by(|a, b| self.compare(a, b, strategy));
        plans
    }

    /// 比较两个计划在指定策略下的先后
    ///
    /// Ordering::Less 表示 a 先排
    pub fn compare(&self, a: &ProductionPlan, b: &ProductionPlan, strategy: SchedulingStrategy) -> Ordering {
        match strategy {
            SchedulingStrategy::EarliestDueDate => due_date(a).cmp(&due_date(b)),
            SchedulingStrategy::PriorityFirst => rank(a)
                .cmp(&rank(b))
                .then_with(|| due_date(a).cmp(&due_date(b))),
            SchedulingStrategy::ShortestProcessingTime => duration(a).cmp(&duration(b)),
            SchedulingStrategy::Balanced | SchedulingStrategy::CriticalRatio => rank(a)
                .cmp(&rank(b))
                .then_with(|| due_date(a).cmp(&due_date(b)))
                .then_with(|| duration(a).cmp(&duration(b))),
        }
    }
}

impl Default for StrategySorter {
    fn default() -> Self {
        Self::new()
    }
}

fn rank(plan: &ProductionPlan) -> u8 {
    PlanPriority::rank_of(plan.priority)
}

fn due_date(plan: &ProductionPlan) -> NaiveDate {
    plan.planned_end_date.unwrap_or(NaiveDate::MAX)
}

fn duration(plan: &ProductionPlan) -> i64 {
    plan.planned_duration_days().unwrap_or(i64::MAX)
}
