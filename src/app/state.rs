// ==========================================
// 生产计划排程系统 - 应用状态
// ==========================================
// 职责: 组装共享连接、仓储、配置与引擎，持有 API 实例
// ==========================================

use std::sync::{Arc, Mutex};

use crate::api::ScheduleApi;
use crate::config::ConfigManager;
use crate::db;
use crate::engine::{EmptyConstraintProvider, GanttReporter, SchedulingEngine};
use crate::repository::ProductionPlanRepository;

/// 应用状态
///
/// 所有组件共享同一个 SQLite 连接
pub struct AppState {
    /// 数据库路径
    pub db_path: String,

    /// 排程API
    pub schedule_api: Arc<ScheduleApi>,

    /// 配置管理器（调整评分参数/默认策略）
    pub config_manager: Arc<ConfigManager>,

    /// 生产计划仓储
    pub plan_repo: Arc<ProductionPlanRepository>,
}

impl AppState {
    /// 创建新的AppState实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径，不存在时自动创建并建表
    pub fn new(db_path: String) -> Result<Self, String> {
        tracing::info!("初始化AppState，数据库路径: {}", db_path);

        let conn = db::open_and_init(&db_path)
            .map_err(|e| format!("无法打开数据库 {}: {}", db_path, e))?;
        let conn = Arc::new(Mutex::new(conn));

        let plan_repo = Arc::new(ProductionPlanRepository::new(conn.clone()));
        let config_manager = Arc::new(ConfigManager::from_connection(conn));

        let engine = Arc::new(SchedulingEngine::new(
            plan_repo.clone(),
            config_manager.clone(),
            Arc::new(EmptyConstraintProvider),
        ));
        let reporter = Arc::new(GanttReporter::new(plan_repo.clone()));
        let schedule_api = Arc::new(ScheduleApi::new(engine, reporter));

        tracing::info!("AppState初始化完成");

        Ok(Self {
            db_path,
            schedule_api,
            config_manager,
            plan_repo,
        })
    }
}

/// 获取默认数据库路径
///
/// 优先读取环境变量 `PRODUCTION_SCHEDULING_DB_PATH`，
/// 否则使用用户数据目录下的 production-scheduling/production_scheduling.db
pub fn get_default_db_path() -> String {
    use std::path::PathBuf;

    if let Ok(path) = std::env::var("PRODUCTION_SCHEDULING_DB_PATH") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("./production_scheduling.db");

    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("production-scheduling");
        // 目录创建失败时回退到当前目录
        if std::fs::create_dir_all(&dir).is_ok() {
            path = dir.join("production_scheduling.db");
        }
    }

    path.to_string_lossy().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_get_default_db_path() {
        let path = get_default_db_path();
        assert!(!path.is_empty());
        assert!(path.ends_with(".db"));
    }

    #[test]
    fn test_app_state_bootstraps_fresh_database() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("state.db").to_string_lossy().to_string();

        let state = AppState::new(db_path.clone()).unwrap();
        assert_eq!(state.db_path, db_path);
        assert!(state.plan_repo.list_by_ids(&[]).unwrap().is_empty());
        assert!(state
            .config_manager
            .get_config_value("scheduling.conflict_penalty")
            .unwrap()
            .is_none());
    }
}
