// ==========================================
// 生产计划排程系统 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写
// 存储: config_kv 表 (key-value + scope)
// ==========================================

use crate::config::scheduling_config::{config_keys, SchedulingConfig, SchedulingConfigReader};
use crate::db::open_sqlite_connection;
use crate::engine::strategy::SchedulingStrategy;
use async_trait::async_trait;
use rusqlite::{params, Connection};
use std::collections::BTreeMap;
use std::error::Error;
use std::sync::{Arc, Mutex};
use tracing::warn;

const GLOBAL_SCOPE: &str = "global";

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> Result<Self, Box<dyn Error + Send + Sync>> {
        let conn = open_sqlite_connection(db_path)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 ConfigManager
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 读取 global scope 的配置值
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    pub fn get_config_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error + Send + Sync>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let result = conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = ?1 AND key = ?2",
            params![GLOBAL_SCOPE, key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(Box::new(e)),
        }
    }

    /// 写入 global scope 的配置值（存在则覆盖）
    pub fn set_config_value(&self, key: &str, value: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        conn.execute(
            r#"INSERT INTO config_kv (scope_id, key, value, updated_at)
               VALUES (?1, ?2, ?3, datetime('now'))
               ON CONFLICT(scope_id, key) DO UPDATE SET
                   value = excluded.value,
                   updated_at = excluded.updated_at"#,
            params![GLOBAL_SCOPE, key, value],
        )?;

        Ok(())
    }

    /// 获取所有 global 配置的快照（JSON 格式）
    pub fn get_config_snapshot(&self) -> Result<String, Box<dyn Error + Send + Sync>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let mut stmt = conn.prepare("SELECT key, value FROM config_kv WHERE scope_id = ?1 ORDER BY key")?;
        let rows = stmt.query_map(params![GLOBAL_SCOPE], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut config_map = BTreeMap::new();
        for row in rows {
            let (key, value) = row?;
            config_map.insert(key, value);
        }

        Ok(serde_json::to_string(&config_map)?)
    }

    /// 读取数值配置，缺失或非法时回落默认值
    fn get_f64_or_default(&self, key: &str, default: f64) -> Result<f64, Box<dyn Error + Send + Sync>> {
        match self.get_config_value(key)? {
            Some(raw) => match raw.trim().parse::<f64>() {
                Ok(v) if v.is_finite() && v >= 0.0 => Ok(v),
                _ => {
                    warn!(key, value = %raw, default, "配置值非法，使用默认值");
                    Ok(default)
                }
            },
            None => Ok(default),
        }
    }
}

#[async_trait]
impl SchedulingConfigReader for ConfigManager {
    async fn load_scheduling_config(&self) -> Result<SchedulingConfig, Box<dyn Error + Send + Sync>> {
        let defaults = SchedulingConfig::default();

        let default_strategy = match self.get_config_value(config_keys::DEFAULT_STRATEGY)? {
            Some(raw) => raw.parse::<SchedulingStrategy>().unwrap_or_else(|e| {
                warn!(error = %e, "默认策略配置非法，使用 balanced");
                defaults.default_strategy
            }),
            None => defaults.default_strategy,
        };

        Ok(SchedulingConfig {
            conflict_penalty: self
                .get_f64_or_default(config_keys::CONFLICT_PENALTY, defaults.conflict_penalty)?,
            delay_penalty_per_day: self.get_f64_or_default(
                config_keys::DELAY_PENALTY_PER_DAY,
                defaults.delay_penalty_per_day,
            )?,
            advance_bonus_per_day: self.get_f64_or_default(
                config_keys::ADVANCE_BONUS_PER_DAY,
                defaults.advance_bonus_per_day,
            )?,
            confirm_threshold: self
                .get_f64_or_default(config_keys::CONFIRM_THRESHOLD, defaults.confirm_threshold)?,
            manual_conflict_score: self.get_f64_or_default(
                config_keys::MANUAL_CONFLICT_SCORE,
                defaults.manual_conflict_score,
            )?,
            default_strategy,
        })
    }
}
