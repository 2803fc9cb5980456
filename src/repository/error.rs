// ==========================================
// 生产计划排程系统 - 仓储层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use rusqlite::ErrorCode;
use thiserror::Error;

/// 仓储层错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("{entity}不存在: id={id}")]
    NotFound { entity: String, id: String },

    /// 共享连接互斥锁中毒，或 SQLite 返回 BUSY / LOCKED
    #[error("数据库连接被占用: {0}")]
    LockError(String),

    /// 整批写入的事务开启或提交失败，本批全部回滚
    #[error("批量写入事务失败: {0}")]
    DatabaseTransactionError(String),

    #[error("SQL 执行失败: {0}")]
    DatabaseQueryError(String),

    /// 行数据无法还原为计划（日期格式、状态枚举等）
    #[error("计划字段无法解析 (field={field}): {message}")]
    FieldValueError { field: String, message: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<rusqlite::Error> for RepositoryError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(e, msg)
                if matches!(e.code, ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked) =>
            {
                RepositoryError::LockError(msg.unwrap_or_else(|| e.to_string()))
            }
            rusqlite::Error::QueryReturnedNoRows => RepositoryError::NotFound {
                entity: "生产计划".to_string(),
                id: "?".to_string(),
            },
            rusqlite::Error::FromSqlConversionFailure(idx, _, source) => RepositoryError::FieldValueError {
                field: format!("#{}", idx),
                message: source.to_string(),
            },
            other => RepositoryError::DatabaseQueryError(other.to_string()),
        }
    }
}

/// Result 类型别名
pub type RepositoryResult<T> = Result<T, RepositoryError>;
