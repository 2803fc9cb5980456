// ==========================================
// 生产计划排程系统 - 引擎层
// ==========================================
// 职责: 排序、冲突检测、评分、落位与提交
// 红线: Engine 不拼 SQL，存储访问只经由 PlanStore
// ==========================================

pub mod committer;
pub mod conflict;
pub mod constraint_provider;
pub mod error;
pub mod feasibility;
pub mod gantt;
pub mod scheduler;
pub mod sorter;
pub mod store;
pub mod strategy;

// 重导出核心引擎
pub use committer::{CommitSummary, ResultCommitter};
pub use conflict::{co_located, ConflictDetector};
pub use constraint_provider::{ConstraintProvider, EmptyConstraintProvider, StaticConstraintProvider};
pub use error::{EngineError, EngineResult};
pub use feasibility::FeasibilityScorer;
pub use gantt::GanttReporter;
pub use scheduler::{AutoScheduleOptions, AutoScheduleOutcome, SchedulingEngine};
pub use sorter::StrategySorter;
pub use store::PlanStore;
pub use strategy::SchedulingStrategy;
