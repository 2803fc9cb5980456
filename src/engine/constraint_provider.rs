// ==========================================
// 生产计划排程系统 - 约束提供方
// ==========================================
// 职责: 提供资源能力/可用性约束（可插拔，默认为空）
// ==========================================

use crate::domain::constraint::SchedulingConstraint;
use async_trait::async_trait;
use std::error::Error;

/// 排程约束提供方
#[async_trait]
pub trait ConstraintProvider: Send + Sync {
    /// 列出本次排程可用的约束（可为空）
    async fn list_constraints(&self) -> Result<Vec<SchedulingConstraint>, Box<dyn Error + Send + Sync>>;
}

/// 默认实现：不提供任何约束
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyConstraintProvider;

#[async_trait]
impl ConstraintProvider for EmptyConstraintProvider {
    async fn list_constraints(&self) -> Result<Vec<SchedulingConstraint>, Box<dyn Error + Send + Sync>> {
        Ok(Vec::new())
    }
}

/// 固定约束集合（用于预设场景与测试）
#[derive(Debug, Clone, Default)]
pub struct StaticConstraintProvider {
    constraints: Vec<SchedulingConstraint>,
}

impl StaticConstraintProvider {
    pub fn new(constraints: Vec<SchedulingConstraint>) -> Self {
        Self { constraints }
    }
}

#[async_trait]
impl ConstraintProvider for StaticConstraintProvider {
    async fn list_constraints(&self) -> Result<Vec<SchedulingConstraint>, Box<dyn Error + Send + Sync>> {
        Ok(self.constraints.clone())
    }
}
