// ==========================================
// 生产计划排程系统 - API 层
// ==========================================
// 职责: 提供与传输层无关的业务 API
// ==========================================

pub mod error;
pub mod schedule_api;

// 重导出核心类型
pub use error::{ApiError, ApiResult};
pub use schedule_api::{
    AutoScheduleRequest, AutoScheduleResponse, ConflictFilter, ManualScheduleRequest,
    RescheduleRequest, ScheduleApi,
};
