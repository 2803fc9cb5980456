// ==========================================
// 生产计划排程系统 - 生产计划领域模型
// ==========================================
// 红线: 实际开工/完工日期由执行跟踪写入，排程引擎只读不写
// ==========================================

use crate::domain::schedule::ResourceKey;
use crate::domain::types::{PlanPriority, PlanStatus};
use chrono::{NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ==========================================
// ProductionPlan - 生产计划（待排程任务）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionPlan {
    // ===== 标识 =====
    pub plan_id: String,     // 计划ID
    pub plan_number: String, // 计划编号（展示/冲突描述使用）
    pub plan_name: String,   // 计划名称

    // ===== 产品与数量 =====
    pub product_name: String, // 产品描述
    pub quantity: f64,        // 计划数量
    pub unit: String,         // 计量单位

    // ===== 计划窗口（排程目标） =====
    pub planned_start_date: Option<NaiveDate>,
    pub planned_end_date: Option<NaiveDate>,

    // ===== 实际窗口（执行跟踪维护） =====
    pub actual_start_date: Option<NaiveDate>,
    pub actual_end_date: Option<NaiveDate>,

    // ===== 优先级与状态 =====
    pub priority: Option<PlanPriority>, // None 表示未知优先级
    pub status: PlanStatus,

    // ===== 资源归属（自由文本标识） =====
    pub workshop: Option<String>,
    pub production_line: Option<String>,
    pub responsible_person: Option<String>,

    pub progress: f64, // 进度百分比 [0, 100]

    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl ProductionPlan {
    /// 创建草稿计划
    ///
    /// plan_id 自动生成；其余可选字段留空，由调用方按需补充
    pub fn new_draft(
        plan_number: impl Into<String>,
        product_name: impl Into<String>,
        quantity: f64,
        unit: impl Into<String>,
    ) -> Self {
        let plan_number = plan_number.into();
        let now = Utc::now().naive_utc();
        Self {
            plan_id: Uuid::new_v4().to_string(),
            plan_name: plan_number.clone(),
            plan_number,
            product_name: product_name.into(),
            quantity,
            unit: unit.into(),
            planned_start_date: None,
            planned_end_date: None,
            actual_start_date: None,
            actual_end_date: None,
            priority: None,
            status: PlanStatus::Draft,
            workshop: None,
            production_line: None,
            responsible_person: None,
            progress: 0.0,
            created_at: now,
            updated_at: now,
        }
    }

    /// 设置进度（截断到 [0, 100]）
    pub fn set_progress(&mut self, progress: f64) {
        self.progress = progress.clamp(0.0, 100.0);
    }

    /// 计划工期（天）；任一日期缺失时返回 None
    pub fn planned_duration_days(&self) -> Option<i64> {
        match (self.planned_start_date, self.planned_end_date) {
            (Some(start), Some(end)) => Some((end - start).num_days()),
            _ => None,
        }
    }

    /// 计划窗口是否与闭区间 [start, end] 相交
    ///
    /// 任一计划日期缺失时视为不相交
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        match (self.planned_start_date, self.planned_end_date) {
            (Some(a_start), Some(a_end)) => dates_overlap(a_start, a_end, start, end),
            _ => false,
        }
    }

    /// 车间资源键
    pub fn workshop_key(&self) -> Option<ResourceKey> {
        self.workshop.as_deref().map(ResourceKey::workshop)
    }

    /// 产线资源键
    pub fn production_line_key(&self) -> Option<ResourceKey> {
        self.production_line.as_deref().map(ResourceKey::production_line)
    }

    /// 是否处于占用资源的状态（CONFIRMED / IN_PROGRESS）
    pub fn is_occupying(&self) -> bool {
        PlanStatus::OCCUPYING.contains(&self.status)
    }
}

/// 闭区间相交判定: not (a_end < b_start or b_end < a_start)
pub fn dates_overlap(a_start: NaiveDate, a_end: NaiveDate, b_start: NaiveDate, b_end: NaiveDate) -> bool {
    !(a_end < b_start || b_end < a_start)
}
