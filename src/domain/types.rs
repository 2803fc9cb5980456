// ==========================================
// 生产计划排程系统 - 领域类型定义
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 计划优先级 (Plan Priority)
// ==========================================
// 顺序: URGENT > HIGH > MEDIUM > LOW
// 序列化格式: SCREAMING_SNAKE_CASE (与数据库一致)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlanPriority {
    Urgent, // 紧急
    High,   // 高
    Medium, // 中
    Low,    // 低
}

/// 未知优先级的排序秩（排在所有已知优先级之后）
pub const UNKNOWN_PRIORITY_RANK: u8 = 4;

impl PlanPriority {
    /// 排序秩: URGENT=0 … LOW=3，越小越优先
    pub fn rank(&self) -> u8 {
        match self {
            PlanPriority::Urgent => 0,
            PlanPriority::High => 1,
            PlanPriority::Medium => 2,
            PlanPriority::Low => 3,
        }
    }

    /// 可缺省优先级的排序秩
    pub fn rank_of(priority: Option<PlanPriority>) -> u8 {
        priority.map(|p| p.rank()).unwrap_or(UNKNOWN_PRIORITY_RANK)
    }

    /// 是否为高优先级（HIGH / URGENT）
    pub fn is_high(&self) -> bool {
        matches!(self, PlanPriority::Urgent | PlanPriority::High)
    }

    /// 从字符串解析优先级（大小写不敏感）
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "URGENT" => Some(PlanPriority::Urgent),
            "HIGH" => Some(PlanPriority::High),
            "MEDIUM" => Some(PlanPriority::Medium),
            "LOW" => Some(PlanPriority::Low),
            _ => None,
        }
    }

    /// 转换为数据库存储的字符串
    pub fn to_db_str(&self) -> &'static str {
        match self {
            PlanPriority::Urgent => "URGENT",
            PlanPriority::High => "HIGH",
            PlanPriority::Medium => "MEDIUM",
            PlanPriority::Low => "LOW",
        }
    }
}

impl fmt::Display for PlanPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_str())
    }
}

// ==========================================
// 计划状态 (Plan Status)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlanStatus {
    Draft,      // 草稿
    Confirmed,  // 已确认
    InProgress, // 执行中
    Completed,  // 已完成
    Cancelled,  // 已取消
    Paused,     // 暂停
    Delayed,    // 延期
}

impl PlanStatus {
    /// 自动排程默认候选状态
    pub const PENDING: [PlanStatus; 2] = [PlanStatus::Draft, PlanStatus::Confirmed];

    /// 当前占用资源、参与冲突检测的状态
    pub const OCCUPYING: [PlanStatus; 2] = [PlanStatus::Confirmed, PlanStatus::InProgress];

    /// 甘特图展示的已提交状态
    pub const COMMITTED: [PlanStatus; 3] = [
        PlanStatus::Confirmed,
        PlanStatus::InProgress,
        PlanStatus::Completed,
    ];

    /// 从字符串解析状态
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "DRAFT" => Some(PlanStatus::Draft),
            "CONFIRMED" => Some(PlanStatus::Confirmed),
            "IN_PROGRESS" => Some(PlanStatus::InProgress),
            "COMPLETED" => Some(PlanStatus::Completed),
            "CANCELLED" => Some(PlanStatus::Cancelled),
            "PAUSED" => Some(PlanStatus::Paused),
            "DELAYED" => Some(PlanStatus::Delayed),
            _ => None,
        }
    }

    /// 转换为数据库存储的字符串
    pub fn to_db_str(&self) -> &'static str {
        match self {
            PlanStatus::Draft => "DRAFT",
            PlanStatus::Confirmed => "CONFIRMED",
            PlanStatus::InProgress => "IN_PROGRESS",
            PlanStatus::Completed => "COMPLETED",
            PlanStatus::Cancelled => "CANCELLED",
            PlanStatus::Paused => "PAUSED",
            PlanStatus::Delayed => "DELAYED",
        }
    }
}

impl fmt::Display for PlanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_str())
    }
}

// ==========================================
// 资源类型 (Resource Type)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResourceType {
    Equipment,      // 设备
    Workshop,       // 车间
    ProductionLine, // 产线
    Personnel,      // 人员
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceType::Equipment => write!(f, "EQUIPMENT"),
            ResourceType::Workshop => write!(f, "WORKSHOP"),
            ResourceType::ProductionLine => write!(f, "PRODUCTION_LINE"),
            ResourceType::Personnel => write!(f, "PERSONNEL"),
        }
    }
}
