// ==========================================
// 生产计划排程系统 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 批量排程 + 人工干预 (确定性贪心启发式, 非全局最优求解)
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 排程规则
pub mod engine;

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施（连接初始化/建表）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// 应用层 - 依赖装配
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{PlanPriority, PlanStatus, ResourceType};

// 领域实体
pub use domain::{
    ConflictReport, ProductionPlan, ResourceAssignment, ResourceKey, SchedulingConstraint,
    SchedulingResult, TimeSlot, TimelineView,
};

// 引擎
pub use engine::{
    ConflictDetector, ConstraintProvider, FeasibilityScorer, GanttReporter, PlanStore,
    ResultCommitter, SchedulingEngine, SchedulingStrategy, StrategySorter,
};

// API
pub use api::{ApiError, ApiResult, ScheduleApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "生产计划排程系统";
