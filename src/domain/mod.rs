// ==========================================
// 生产计划排程系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型、值对象
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod constraint;
pub mod plan;
pub mod report;
pub mod schedule;
pub mod types;

// 重导出核心类型
pub use constraint::{SchedulingConstraint, TimeSlot};
pub use plan::{dates_overlap, ProductionPlan};
pub use report::{
    ConflictReport, ConflictSeverity, ConflictSummary, ResourceConflict, TimelineFilter,
    TimelineResources, TimelineRow, TimelineView,
};
pub use schedule::{
    ResourceAssignment, ResourceKey, SchedulingResult, DEFAULT_PRODUCTION_LINE,
    DEFAULT_RESPONSIBLE_PERSON, DEFAULT_WORKSHOP,
};
pub use types::{PlanPriority, PlanStatus, ResourceType};
