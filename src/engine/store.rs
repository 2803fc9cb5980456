// ==========================================
// 生产计划排程系统 - 引擎层记录存储接口
// ==========================================
// 职责: 定义引擎访问生产计划存储的唯一接口（依赖倒置）
// 实现者: ProductionPlanRepository（SQLite）
// ==========================================

use crate::domain::plan::ProductionPlan;
use crate::domain::types::PlanStatus;
use crate::repository::{ProductionPlanRepository, RepositoryResult};

/// 生产计划记录存储
///
/// 本组件不提供跨运行加锁，多个排程运行需由调用方串行化
pub trait PlanStore: Send + Sync {
    /// 按 id 读取计划
    fn get_plan(&self, plan_id: &str) -> RepositoryResult<Option<ProductionPlan>>;

    /// 按 id 集合读取（未知 id 忽略）
    fn list_plans_by_ids(&self, plan_ids: &[String]) -> RepositoryResult<Vec<ProductionPlan>>;

    /// 按状态集合读取
    fn list_plans_by_statuses(&self, statuses: &[PlanStatus]) -> RepositoryResult<Vec<ProductionPlan>>;

    /// 保存单个计划（UPSERT）
    fn save_plan(&self, plan: &ProductionPlan) -> RepositoryResult<()>;

    /// 整批保存；失败时整批不生效
    fn save_plans(&self, plans: &[ProductionPlan]) -> RepositoryResult<usize>;
}

impl PlanStore for ProductionPlanRepository {
    fn get_plan(&self, plan_id: &str) -> RepositoryResult<Option<ProductionPlan>> {
        self.find_by_id(plan_id)
    }

    fn list_plans_by_ids(&self, plan_ids: &[String]) -> RepositoryResult<Vec<ProductionPlan>> {
        self.list_by_ids(plan_ids)
    }

    fn list_plans_by_statuses(&self, statuses: &[PlanStatus]) -> RepositoryResult<Vec<ProductionPlan>> {
        self.list_by_statuses(statuses)
    }

    fn save_plan(&self, plan: &ProductionPlan) -> RepositoryResult<()> {
        self.save(plan)
    }

    fn save_plans(&self, plans: &[ProductionPlan]) -> RepositoryResult<usize> {
        self.save_batch(plans)
    }
}
