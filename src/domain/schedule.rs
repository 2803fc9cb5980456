// ==========================================
// 生产计划排程系统 - 排程结果领域模型
// ==========================================
// 说明: 排程结果是临时对象，计算 → (可选)提交 → 丢弃
//       生产计划记录本身是当前已提交排程的唯一事实来源
// ==========================================

use crate::domain::types::ResourceType;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 未设置车间时的占位标识
pub const DEFAULT_WORKSHOP: &str = "默认车间";
/// 未设置产线时的占位标识
pub const DEFAULT_PRODUCTION_LINE: &str = "默认产线";
/// 未设置负责人时的占位标识
pub const DEFAULT_RESPONSIBLE_PERSON: &str = "默认负责人";

// ==========================================
// ResourceKey - 资源键
// ==========================================
// 资源仍以自由文本标识，键值对 (类型, 标识) 便于后续接入资源目录
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ResourceKey {
    pub resource_type: ResourceType,
    pub resource_id: String,
}

impl ResourceKey {
    pub fn new(resource_type: ResourceType, resource_id: impl Into<String>) -> Self {
        Self {
            resource_type,
            resource_id: resource_id.into(),
        }
    }

    pub fn workshop(id: &str) -> Self {
        Self::new(ResourceType::Workshop, id)
    }

    pub fn production_line(id: &str) -> Self {
        Self::new(ResourceType::ProductionLine, id)
    }

    pub fn personnel(id: &str) -> Self {
        Self::new(ResourceType::Personnel, id)
    }
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.resource_type, self.resource_id)
    }
}

// ==========================================
// ResourceAssignment - 资源分配（角色 → 资源标识）
// ==========================================
// None 表示该角色未指定，提交时不覆盖计划原值
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceAssignment {
    pub workshop: Option<String>,
    pub production_line: Option<String>,
    pub responsible_person: Option<String>,
}

impl ResourceAssignment {
    /// 三个角色全部指定的分配
    pub fn full(
        workshop: impl Into<String>,
        production_line: impl Into<String>,
        responsible_person: impl Into<String>,
    ) -> Self {
        Self {
            workshop: Some(workshop.into()),
            production_line: Some(production_line.into()),
            responsible_person: Some(responsible_person.into()),
        }
    }

    /// 车间资源键
    pub fn workshop_key(&self) -> Option<ResourceKey> {
        self.workshop.as_deref().map(ResourceKey::workshop)
    }

    /// 产线资源键
    pub fn production_line_key(&self) -> Option<ResourceKey> {
        self.production_line.as_deref().map(ResourceKey::production_line)
    }

    /// 全部已指定角色的资源键
    pub fn keys(&self) -> Vec<ResourceKey> {
        let mut keys = Vec::with_capacity(3);
        keys.extend(self.workshop_key());
        keys.extend(self.production_line_key());
        keys.extend(self.responsible_person.as_deref().map(ResourceKey::personnel));
        keys
    }
}

// ==========================================
// SchedulingResult - 单个计划的排程结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulingResult {
    pub plan_id: String,
    /// 排程开始时间；排程失败时为 None
    pub scheduled_start: Option<NaiveDateTime>,
    /// 排程结束时间；排程失败时为 None
    pub scheduled_end: Option<NaiveDateTime>,
    pub assigned_resources: ResourceAssignment,
    pub estimated_duration_days: i64,
    /// 冲突描述；为空表示无已知冲突
    pub conflicts: Vec<String>,
    /// 可行性评分 [0.0, 1.0]
    pub feasibility_score: f64,
}

impl SchedulingResult {
    /// 排程失败的退化结果（评分 0.0，冲突列表说明失败原因）
    pub fn failed(plan_id: impl Into<String>, reason: impl fmt::Display) -> Self {
        Self {
            plan_id: plan_id.into(),
            scheduled_start: None,
            scheduled_end: None,
            assigned_resources: ResourceAssignment::default(),
            estimated_duration_days: 0,
            conflicts: vec![format!("scheduling failed: {}", reason)],
            feasibility_score: 0.0,
        }
    }

    /// 是否为有效落位（失败结果没有时间窗口）
    pub fn is_placed(&self) -> bool {
        self.scheduled_start.is_some() && self.scheduled_end.is_some()
    }

    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }
}
