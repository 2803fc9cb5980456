// ==========================================
// 生产计划排程系统 - API层错误类型
// ==========================================
// 对外错误分类:
// - NotFound: 未知计划 id，单计划操作中止
// - InvalidWindow: 手工排程 start >= end，不产生任何修改
// - InvalidInput: 请求参数非法（含交期早于开始日期），不产生任何修改
// - PersistenceFailure: 存储写入失败，本次运行结果全部作废，可整批重试
// ==========================================

use crate::engine::EngineError;
use crate::repository::error::RepositoryError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    #[error("无效排程窗口: {0}")]
    InvalidWindow(String),

    #[error("持久化失败: {0}")]
    PersistenceFailure(String),

    /// 连接被占用，调用方可稍后重试
    #[error("数据库繁忙: {0}")]
    DatabaseBusy(String),

    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{}(id={})不存在", entity, id))
            }
            RepositoryError::LockError(msg) => ApiError::DatabaseBusy(msg),
            RepositoryError::FieldValueError { field, message } => {
                ApiError::InternalError(format!("存储数据损坏 ({}): {}", field, message))
            }
            RepositoryError::Other(err) => ApiError::Other(err),
            other => ApiError::PersistenceFailure(other.to_string()),
        }
    }
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::NotFound(id) => ApiError::NotFound(format!("计划(id={})不存在", id)),
            EngineError::InvalidWindow { start, end } => {
                ApiError::InvalidWindow(format!("开始时间 {} 必须早于结束时间 {}", start, end))
            }
            EngineError::DueDateBeforeStart { start, due } => {
                ApiError::InvalidInput(format!("交期 {} 早于计划开始日期 {}", due, start))
            }
            EngineError::Store(repo_err) => match repo_err {
                RepositoryError::DatabaseTransactionError(msg) | RepositoryError::DatabaseQueryError(msg) => {
                    ApiError::InternalError(format!("计划记录读取失败: {}", msg))
                }
                other => ApiError::from(other),
            },
            EngineError::Persistence(repo_err) => ApiError::from(repo_err),
            EngineError::Placement(msg) | EngineError::Config(msg) | EngineError::Constraint(msg) => {
                ApiError::InternalError(msg)
            }
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
