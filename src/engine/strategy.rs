// ==========================================
// 生产计划排程系统 - 策略定义
// ==========================================
// 用途: 自动排程的排序策略入口；未指定时使用 BALANCED
// ==========================================

use serde::{Deserialize, Serialize};

/// 排程策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchedulingStrategy {
    /// 最早交期优先
    EarliestDueDate,
    /// 优先级优先
    PriorityFirst,
    /// 最短工期优先
    ShortestProcessingTime,
    /// 均衡（优先级 → 交期 → 工期）
    Balanced,
    /// 关键比率（预留，当前按 BALANCED 排序）
    CriticalRatio,
}

impl SchedulingStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SchedulingStrategy::EarliestDueDate => "earliest_due_date",
            SchedulingStrategy::PriorityFirst => "priority_first",
            SchedulingStrategy::ShortestProcessingTime => "shortest_processing_time",
            SchedulingStrategy::Balanced => "balanced",
            SchedulingStrategy::CriticalRatio => "critical_ratio",
        }
    }

    pub fn title_cn(&self) -> &'static str {
        match self {
            SchedulingStrategy::EarliestDueDate => "交期优先",
            SchedulingStrategy::PriorityFirst => "优先级优先",
            SchedulingStrategy::ShortestProcessingTime => "短工期优先",
            SchedulingStrategy::Balanced => "均衡方案",
            SchedulingStrategy::CriticalRatio => "关键比率",
        }
    }
}

impl Default for SchedulingStrategy {
    fn default() -> Self {
        SchedulingStrategy::Balanced
    }
}

impl std::str::FromStr for SchedulingStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "earliest_due_date" | "edd" => Ok(SchedulingStrategy::EarliestDueDate),
            "priority_first" => Ok(SchedulingStrategy::PriorityFirst),
            "shortest_processing_time" | "spt" => Ok(SchedulingStrategy::ShortestProcessingTime),
            "balanced" => Ok(SchedulingStrategy::Balanced),
            "critical_ratio" => Ok(SchedulingStrategy::CriticalRatio),
            other => Err(format!("未知策略类型: {}", other)),
        }
    }
}
