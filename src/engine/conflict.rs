// ==========================================
// 生产计划排程系统 - 资源冲突检测
// ==========================================
// 职责: 对候选时间窗口 + 资源分配，扫描已占用资源的计划
// 规则:
// - 仅 CONFIRMED / IN_PROGRESS 计划参与
// - 闭区间重叠: not (a_end < b_start or b_end < a_start)
// - 车间 AND 产线同时相同才算冲突（不建模产能分摊、人员重叠）
// - 约束提供方给出的维护停机/可用时段额外产生冲突
// ==========================================

use crate::domain::constraint::SchedulingConstraint;
use crate::domain::plan::ProductionPlan;
use crate::domain::schedule::ResourceAssignment;
use chrono::NaiveDate;

// ==========================================
// ConflictDetector - 冲突检测器
// ==========================================
// 只读引用本次运行开始时的已提交快照
pub struct ConflictDetector<'a> {
    committed: &'a [ProductionPlan],
    constraints: &'a [SchedulingConstraint],
}

impl<'a> ConflictDetector<'a> {
    pub fn new(committed: &'a [ProductionPlan], constraints: &'a [SchedulingConstraint]) -> Self {
        Self {
            committed,
            constraints,
        }
    }

    /// 查找候选落位的冲突
    ///
    /// # 参数
    /// - `start` / `end`: 候选窗口（闭区间，日期精度）
    /// - `resources`: 候选资源分配
    /// - `exclude_plan_id`: 正在排程的计划自身
    ///
    /// # 返回
    /// 冲突描述列表，顺序与快照顺序一致
    pub fn find_conflicts(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        resources: &ResourceAssignment,
        exclude_plan_id: &str,
    ) -> Vec<String> {
        let mut conflicts: Vec<String> = self
            .committed
            .iter()
            .filter(|other| other.plan_id != exclude_plan_id)
            .filter(|other| other.is_occupying())
            .filter(|other| other.overlaps(start, end))
            .filter(|other| co_located(resources, other))
            .map(|other| {
                format!(
                    "与计划 {} 资源冲突: 车间 {} / 产线 {}",
                    other.plan_number,
                    other.workshop.as_deref().unwrap_or_default(),
                    other.production_line.as_deref().unwrap_or_default(),
                )
            })
            .collect();

        conflicts.extend(self.constraint_conflicts(start, end, resources));
        conflicts
    }

    /// 车间、产线与负责人约束产生的冲突
    fn constraint_conflicts(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        resources: &ResourceAssignment,
    ) -> Vec<String> {
        if self.constraints.is_empty() {
            return Vec::new();
        }

        let mut conflicts = Vec::new();
        for key in &resources.keys() {
            for constraint in self.constraints.iter().filter(|c| c.applies_to(key)) {
                if let Some(window) = constraint.blocking_maintenance(start, end) {
                    conflicts.push(format!(
                        "资源 {} 维护停机: {} ~ {}",
                        key, window.start, window.end
                    ));
                }
                if !constraint.is_available(start, end) {
                    conflicts.push(format!("资源 {} 在 {} ~ {} 不可用", key, start, end));
                }
            }
        }
        conflicts
    }
}

/// 候选分配与计划是否同车间且同产线
///
/// 任一方缺少车间或产线时不视为同位
pub fn co_located(resources: &ResourceAssignment, plan: &ProductionPlan) -> bool {
    match (resources.workshop_key(), resources.production_line_key()) {
        (Some(workshop), Some(line)) => {
            plan.workshop_key().as_ref() == Some(&workshop)
                && plan.production_line_key().as_ref() == Some(&line)
        }
        _ => false,
    }
}
