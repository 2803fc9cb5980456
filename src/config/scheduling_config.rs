// ==========================================
// 生产计划排程系统 - 排程配置读取 Trait
// ==========================================
// 职责: 定义引擎所需的配置读取接口及配置快照
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use crate::engine::strategy::SchedulingStrategy;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::error::Error;

/// 配置键
pub mod config_keys {
    pub const CONFLICT_PENALTY: &str = "scheduling.conflict_penalty";
    pub const DELAY_PENALTY_PER_DAY: &str = "scheduling.delay_penalty_per_day";
    pub const ADVANCE_BONUS_PER_DAY: &str = "scheduling.advance_bonus_per_day";
    pub const CONFIRM_THRESHOLD: &str = "scheduling.confirm_threshold";
    pub const MANUAL_CONFLICT_SCORE: &str = "scheduling.manual_conflict_score";
    pub const DEFAULT_STRATEGY: &str = "scheduling.default_strategy";
}

// ==========================================
// SchedulingConfig - 单次排程运行的配置快照
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulingConfig {
    /// 每个冲突扣分
    pub conflict_penalty: f64,
    /// 每延期一天扣分
    pub delay_penalty_per_day: f64,
    /// 每提前一天加分
    pub advance_bonus_per_day: f64,
    /// 无冲突且评分严格大于该阈值时确认计划
    pub confirm_threshold: f64,
    /// 手工排程存在冲突时的固定评分
    pub manual_conflict_score: f64,
    /// 请求未指定策略时使用
    pub default_strategy: SchedulingStrategy,
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            conflict_penalty: 0.3,
            delay_penalty_per_day: 0.1,
            advance_bonus_per_day: 0.05,
            confirm_threshold: 0.8,
            manual_conflict_score: 0.5,
            default_strategy: SchedulingStrategy::Balanced,
        }
    }
}

// ==========================================
// SchedulingConfigReader Trait
// ==========================================
// 实现者: ConfigManager（从 config_kv 表读取）、SchedulingConfig（固定配置）
#[async_trait]
pub trait SchedulingConfigReader: Send + Sync {
    /// 读取当前排程配置快照
    ///
    /// 缺失或非法的配置项回落到默认值
    async fn load_scheduling_config(&self) -> Result<SchedulingConfig, Box<dyn Error + Send + Sync>>;
}

#[async_trait]
impl SchedulingConfigReader for SchedulingConfig {
    async fn load_scheduling_config(&self) -> Result<SchedulingConfig, Box<dyn Error + Send + Sync>> {
        Ok(self.clone())
    }
}
