// ==========================================
// 生产计划排程系统 - 配置层
// ==========================================
// 职责: 排程评分/确认阈值等配置管理
// 存储: config_kv 表
// ==========================================

pub mod config_manager;
pub mod scheduling_config;

// 重导出核心配置
pub use config_manager::ConfigManager;
pub use scheduling_config::{config_keys, SchedulingConfig, SchedulingConfigReader};
