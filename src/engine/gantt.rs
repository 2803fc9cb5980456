// ==========================================
// 生产计划排程系统 - 甘特图与冲突分析
// ==========================================
// 职责: 从已提交计划派生只读视图
// - build_timeline: CONFIRMED / IN_PROGRESS / COMPLETED 计划时间轴
// - analyze_conflicts: 按 (车间, 产线) 分组，组内两两做闭区间重叠判定
// ==========================================

use crate::domain::plan::ProductionPlan;
use crate::domain::report::{
    ConflictReport, ConflictSeverity, ConflictSummary, ResourceConflict, TimelineFilter,
    TimelineResources, TimelineRow, TimelineView,
};
use crate::domain::types::PlanStatus;
use crate::engine::error::EngineResult;
use crate::engine::store::PlanStore;
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::sync::Arc;
use tracing::debug;

pub struct GanttReporter {
    store: Arc<dyn PlanStore>,
}

impl GanttReporter {
    pub fn new(store: Arc<dyn PlanStore>) -> Self {
        Self { store }
    }

    // ==========================================
    // 甘特图
    // ==========================================

    /// 构建时间轴视图
    ///
    /// 行按计划开始日、计划编号排序；缺少开始日期的计划排在最后
    pub fn build_timeline(&self, filter: &TimelineFilter) -> EngineResult<TimelineView> {
        let plans = self.store.list_plans_by_statuses(&PlanStatus::COMMITTED)?;

        let mut rows: Vec<TimelineRow> = plans
            .iter()
            .filter(|p| matches_filter(p, filter))
            .map(to_row)
            .collect();
        rows.sort_by(|a, b| {
            a.planned_start
                .is_none()
                .cmp(&b.planned_start.is_none())
                .then_with(|| a.planned_start.cmp(&b.planned_start))
                .then_with(|| a.plan_number.cmp(&b.plan_number))
        });

        let workshops: BTreeSet<String> = rows.iter().filter_map(|r| r.workshop.clone()).collect();
        let production_lines: BTreeSet<String> =
            rows.iter().filter_map(|r| r.production_line.clone()).collect();

        debug!(rows = rows.len(), "甘特图构建完成");

        Ok(TimelineView {
            tasks: rows,
            resources: TimelineResources {
                workshops: workshops.into_iter().collect(),
                production_lines: production_lines.into_iter().collect(),
            },
        })
    }

    // ==========================================
    // 冲突分析
    // ==========================================

    /// 分析已占用资源计划之间的冲突
    ///
    /// 严重度: 任一计划为 HIGH / URGENT 时为 high，否则 medium
    pub fn analyze_conflicts(&self, date_range: Option<(NaiveDate, NaiveDate)>) -> EngineResult<ConflictReport> {
        let plans = self.store.list_plans_by_statuses(&PlanStatus::OCCUPYING)?;

        let mut groups: BTreeMap<(String, String), Vec<&ProductionPlan>> = BTreeMap::new();
        for plan in &plans {
            let (Some(workshop), Some(line)) = (&plan.workshop, &plan.production_line) else {
                continue;
            };
            if plan.planned_start_date.is_none() || plan.planned_end_date.is_none() {
                continue;
            }
            if let Some((from, to)) = date_range {
                if !plan.overlaps(from, to) {
                    continue;
                }
            }
            groups
                .entry((workshop.clone(), line.clone()))
                .or_default()
                .push(plan);
        }

        let mut conflicts = Vec::new();
        for ((workshop, line), members) in &groups {
            for (i, first) in members.iter().enumerate() {
                for second in &members[i + 1..] {
                    if let Some(conflict) = pair_conflict(workshop, line, first, second) {
                        conflicts.push(conflict);
                    }
                }
            }
        }

        let affected: HashSet<&str> = conflicts
            .iter()
            .flat_map(|c| [c.first_plan_id.as_str(), c.second_plan_id.as_str()])
            .collect();
        let summary = ConflictSummary {
            total_conflicts: conflicts.len(),
            affected_plans: affected.len(),
            high_severity: conflicts
                .iter()
                .filter(|c| c.severity == ConflictSeverity::High)
                .count(),
        };

        debug!(
            groups = groups.len(),
            conflicts = summary.total_conflicts,
            "冲突分析完成"
        );

        Ok(ConflictReport {
            resource_conflicts: conflicts,
            summary,
        })
    }
}

fn matches_filter(plan: &ProductionPlan, filter: &TimelineFilter) -> bool {
    if let Some((from, to)) = filter.date_range {
        if !plan.overlaps(from, to) {
            return false;
        }
    }
    if let Some(workshop) = &filter.workshop {
        if plan.workshop.as_ref() != Some(workshop) {
            return false;
        }
    }
    if let Some(line) = &filter.production_line {
        if plan.production_line.as_ref() != Some(line) {
            return false;
        }
    }
    true
}

fn to_row(plan: &ProductionPlan) -> TimelineRow {
    TimelineRow {
        plan_id: plan.plan_id.clone(),
        plan_number: plan.plan_number.clone(),
        product_name: plan.product_name.clone(),
        workshop: plan.workshop.clone(),
        production_line: plan.production_line.clone(),
        responsible_person: plan.responsible_person.clone(),
        priority: plan.priority,
        status: plan.status,
        progress: plan.progress,
        planned_start: plan.planned_start_date,
        planned_end: plan.planned_end_date,
        actual_start: plan.actual_start_date,
        actual_end: plan.actual_end_date,
    }
}

fn pair_conflict(
    workshop: &str,
    line: &str,
    first: &ProductionPlan,
    second: &ProductionPlan,
) -> Option<ResourceConflict> {
    let (a_start, a_end) = (first.planned_start_date?, first.planned_end_date?);
    let (b_start, b_end) = (second.planned_start_date?, second.planned_end_date?);
    if !second.overlaps(a_start, a_end) {
        return None;
    }

    let is_high = |p: &ProductionPlan| p.priority.map(|x| x.is_high()).unwrap_or(false);
    let severity = if is_high(first) || is_high(second) {
        ConflictSeverity::High
    } else {
        ConflictSeverity::Medium
    };

    Some(ResourceConflict {
        workshop: workshop.to_string(),
        production_line: line.to_string(),
        first_plan_id: first.plan_id.clone(),
        first_plan_number: first.plan_number.clone(),
        second_plan_id: second.plan_id.clone(),
        second_plan_number: second.plan_number.clone(),
        overlap_start: a_start.max(b_start),
        overlap_end: a_end.min(b_end),
        severity,
    })
}
