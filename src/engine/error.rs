// ==========================================
// 生产计划排程系统 - 引擎层错误类型
// ==========================================

use crate::repository::RepositoryError;
use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    /// 未知计划 id，中止单计划操作
    #[error("计划不存在: {0}")]
    NotFound(String),

    /// 手工排程开始时间不早于结束时间
    #[error("无效排程窗口: start={start}, end={end}")]
    InvalidWindow {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    /// 新交期早于计划开始日期，计划记录保持不变
    #[error("交期 {due} 早于计划开始日期 {start}")]
    DueDateBeforeStart { start: NaiveDate, due: NaiveDate },

    /// 读取计划记录失败
    #[error("计划记录读取失败: {0}")]
    Store(#[from] RepositoryError),

    /// 写入存储失败，整批作废
    #[error("排程结果持久化失败: {0}")]
    Persistence(RepositoryError),

    /// 单个计划落位失败（批内隔离，不向外传播）
    #[error("{0}")]
    Placement(String),

    #[error("配置读取失败: {0}")]
    Config(String),

    #[error("约束读取失败: {0}")]
    Constraint(String),
}

pub type EngineResult<T> = Result<T, EngineError>;
