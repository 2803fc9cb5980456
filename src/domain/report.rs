// ==========================================
// 生产计划排程系统 - 甘特图与冲突报告视图
// ==========================================
// 只读视图，由已提交计划派生
// ==========================================

use crate::domain::types::{PlanPriority, PlanStatus};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// 甘特图
// ==========================================

/// 甘特图查询条件
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimelineFilter {
    pub date_range: Option<(NaiveDate, NaiveDate)>,
    pub workshop: Option<String>,
    pub production_line: Option<String>,
}

/// 甘特图行（一个计划一行）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineRow {
    pub plan_id: String,
    pub plan_number: String,
    pub product_name: String,
    pub workshop: Option<String>,
    pub production_line: Option<String>,
    pub responsible_person: Option<String>,
    pub priority: Option<PlanPriority>,
    pub status: PlanStatus,
    pub progress: f64,
    /// 计划日期缺失的任务仍出现在时间轴上，排在末尾
    pub planned_start: Option<NaiveDate>,
    pub planned_end: Option<NaiveDate>,
    pub actual_start: Option<NaiveDate>,
    pub actual_end: Option<NaiveDate>,
}

/// 甘特图涉及的资源列表
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimelineResources {
    pub workshops: Vec<String>,
    pub production_lines: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimelineView {
    pub tasks: Vec<TimelineRow>,
    pub resources: TimelineResources,
}

// ==========================================
// 冲突分析
// ==========================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictSeverity {
    High,
    Medium,
}

/// 两个同车间同产线计划的时间重叠
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceConflict {
    pub workshop: String,
    pub production_line: String,
    pub first_plan_id: String,
    pub first_plan_number: String,
    pub second_plan_id: String,
    pub second_plan_number: String,
    pub overlap_start: NaiveDate,
    pub overlap_end: NaiveDate,
    pub severity: ConflictSeverity,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConflictSummary {
    pub total_conflicts: usize,
    pub affected_plans: usize,
    pub high_severity: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConflictReport {
    pub resource_conflicts: Vec<ResourceConflict>,
    pub summary: ConflictSummary,
}
