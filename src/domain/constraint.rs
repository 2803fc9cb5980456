// ==========================================
// 生产计划排程系统 - 排程约束领域模型
// ==========================================
// 约束是单次排程运行的只读输入，引擎不修改
// ==========================================

use crate::domain::plan::dates_overlap;
use crate::domain::schedule::ResourceKey;
use crate::domain::types::ResourceType;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// TimeSlot - 闭区间日期段
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl TimeSlot {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// 与 [start, end] 是否相交
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        dates_overlap(self.start, self.end, start, end)
    }

    /// 是否完整覆盖 [start, end]
    pub fn covers(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.start <= start && end <= self.end
    }
}

// ==========================================
// SchedulingConstraint - 资源能力与可用性
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulingConstraint {
    pub resource_type: ResourceType,
    pub resource_id: String,
    pub capacity: f64,
    /// 可用时段；为空表示不限
    pub available_slots: Vec<TimeSlot>,
    /// 维护停机时段
    pub maintenance_windows: Vec<TimeSlot>,
}

impl SchedulingConstraint {
    pub fn resource_key(&self) -> ResourceKey {
        ResourceKey::new(self.resource_type, self.resource_id.clone())
    }

    /// 是否作用于指定资源
    pub fn applies_to(&self, key: &ResourceKey) -> bool {
        self.resource_key() == *key
    }

    /// 与 [start, end] 相交的第一个维护时段
    pub fn blocking_maintenance(&self, start: NaiveDate, end: NaiveDate) -> Option<&TimeSlot> {
        self.maintenance_windows.iter().find(|w| w.overlaps(start, end))
    }

    /// [start, end] 是否落在某个可用时段内
    pub fn is_available(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.available_slots.is_empty() || self.available_slots.iter().any(|s| s.covers(start, end))
    }
}
