// ==========================================
// 生产计划排程系统 - 可行性评分
// ==========================================
// 评分 = 1.0
//      - 冲突数 × conflict_penalty
//      - 延期天数 × delay_penalty_per_day
//      + 提前天数 × advance_bonus_per_day
// 最终截断到 [0.0, 1.0]
// ==========================================

use crate::config::SchedulingConfig;
use crate::domain::plan::ProductionPlan;
use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeasibilityScorer {
    conflict_penalty: f64,
    delay_penalty_per_day: f64,
    advance_bonus_per_day: f64,
}

impl FeasibilityScorer {
    pub fn new(conflict_penalty: f64, delay_penalty_per_day: f64, advance_bonus_per_day: f64) -> Self {
        Self {
            conflict_penalty,
            delay_penalty_per_day,
            advance_bonus_per_day,
        }
    }

    pub fn from_config(config: &SchedulingConfig) -> Self {
        Self::new(
            config.conflict_penalty,
            config.delay_penalty_per_day,
            config.advance_bonus_per_day,
        )
    }

    /// 计算落位可行性评分
    ///
    /// 计划无目标完工日期时不做交期调整
    pub fn score(&self, plan: &ProductionPlan, proposed_end: NaiveDate, conflict_count: usize) -> f64 {
        let mut score = 1.0 - self.conflict_penalty * conflict_count as f64;

        if let Some(planned_end) = plan.planned_end_date {
            let slip_days = (proposed_end - planned_end).num_days();
            if slip_days > 0 {
                score -= self.delay_penalty_per_day * slip_days as f64;
            } else if slip_days < 0 {
                score += self.advance_bonus_per_day * (-slip_days) as f64;
            }
        }

        score.clamp(0.0, 1.0)
    }
}

impl Default for FeasibilityScorer {
    fn default() -> Self {
        Self::from_config(&SchedulingConfig::default())
    }
}
