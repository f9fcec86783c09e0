// ==========================================
// 宽体货机配载评估系统 - 引擎配置
// ==========================================
// 红线: 核心不读环境变量/文件,配置对象在构造时显式传入
// 默认值即 B777F 机型常量,进程启动加载一次,运行期不可变
// ==========================================

use crate::domain::position::Coordinates;
use serde::{Deserialize, Serialize};

// ==========================================
// 机型常量 (默认值来源)
// ==========================================

/// 全机最大业载 (kg)
pub const DEFAULT_MAX_TOTAL_WEIGHT_KG: f64 = 110_000.0;
/// 重心包线下界 (m)
pub const DEFAULT_CG_ENVELOPE_MIN_M: f64 = 16.5;
/// 重心包线上界 (m)
pub const DEFAULT_CG_ENVELOPE_MAX_M: f64 = 26.8;
/// 空机重心 (m),Σw=0 时的哨兵值
pub const DEFAULT_EMPTY_CG_M: f64 = 21.65;
/// 下货舱堆叠高度上限 (m)
pub const DEFAULT_LOWER_DECK_STACK_LIMIT_M: f64 = 2.4;
/// 主货舱堆叠高度上限 (m)
pub const DEFAULT_MAIN_DECK_STACK_LIMIT_M: f64 = 3.2;
/// 货位总数 (24 下货舱 + 32 主货舱)
pub const TOTAL_POSITIONS: usize = 56;

// ==========================================
// AircraftLimits - 全机限制
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AircraftLimits {
    pub max_total_weight_kg: f64,      // 最大业载 (kg)
    pub cg_envelope_min_m: f64,        // 重心包线下界 (m)
    pub cg_envelope_max_m: f64,        // 重心包线上界 (m)
    pub empty_weight_cg: Coordinates,  // 空机重心(Σw=0 哨兵)
    pub lower_deck_stack_limit_m: f64, // 下货舱堆叠高度上限 (m)
    pub main_deck_stack_limit_m: f64,  // 主货舱堆叠高度上限 (m)
}

impl Default for AircraftLimits {
    fn default() -> Self {
        Self {
            max_total_weight_kg: DEFAULT_MAX_TOTAL_WEIGHT_KG,
            cg_envelope_min_m: DEFAULT_CG_ENVELOPE_MIN_M,
            cg_envelope_max_m: DEFAULT_CG_ENVELOPE_MAX_M,
            empty_weight_cg: Coordinates::new(DEFAULT_EMPTY_CG_M, 0.0, 2.0),
            lower_deck_stack_limit_m: DEFAULT_LOWER_DECK_STACK_LIMIT_M,
            main_deck_stack_limit_m: DEFAULT_MAIN_DECK_STACK_LIMIT_M,
        }
    }
}

// ==========================================
// ScoringWeights - 适配评分权重
// ==========================================
// 组合公式见 engine/fit.rs; 四项权重之和应为 1.0
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    pub volume_weight: f64,           // 容积适配权重
    pub weight_margin_weight: f64,    // 承重余量权重
    pub deck_preference_weight: f64,  // 货舱偏好权重
    pub handling_weight: f64,         // 特殊处理适配权重
    pub deck_mismatch_score: f64,     // 货舱不匹配时的偏好分(不淘汰,降分)
    pub fragile_vibration_penalty: f64, // 易碎货物落在高振动区的乘性惩罚
    pub stacking_overflow_penalty: f64, // 超出单层高度、依赖堆叠空间的乘性惩罚
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            volume_weight: 0.35,
            weight_margin_weight: 0.25,
            deck_preference_weight: 0.20,
            handling_weight: 0.20,
            deck_mismatch_score: 0.3,
            fragile_vibration_penalty: 0.6,
            stacking_overflow_penalty: 0.85,
        }
    }
}

// ==========================================
// AlertThresholds - 告警阈值
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertThresholds {
    // ===== 容量告警 (利用率 %) =====
    pub capacity_critical_pct: f64, // CRITICAL: 总利用率 ≥ 此值
    pub weight_critical_pct: f64,   // CRITICAL: 载重利用率 ≥ 此值
    pub capacity_high_pct: f64,     // HIGH: 总利用率 ≥ 此值
    pub capacity_medium_pct: f64,   // MEDIUM: 总利用率 ≥ 此值

    // ===== 载重平衡状态阈值 =====
    pub weight_margin_critical_pct: f64, // critical: 业载余量 < max 的此百分比
    pub weight_margin_caution_pct: f64,  // caution: 业载余量 < max 的此百分比
    pub cg_critical_margin_m: f64,       // critical: 重心距包线边界 < 此值 (m)
    pub cg_caution_margin_m: f64,        // caution: 重心距包线边界 < 此值 (m)

    // ===== 均衡分析 =====
    pub balance_score_threshold: f64, // is_balanced 的最低均衡评分
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            capacity_critical_pct: 95.0,
            weight_critical_pct: 98.0,
            capacity_high_pct: 85.0,
            capacity_medium_pct: 70.0,
            weight_margin_critical_pct: 5.0,
            weight_margin_caution_pct: 15.0,
            cg_critical_margin_m: 0.5,
            cg_caution_margin_m: 1.5,
            balance_score_threshold: 70.0,
        }
    }
}

// ==========================================
// EngineConfig - 引擎配置汇总
// ==========================================
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub limits: AircraftLimits,     // 全机限制
    pub scoring: ScoringWeights,    // 评分权重
    pub alerts: AlertThresholds,    // 告警阈值
    pub max_recommendations: usize, // 候选货位上限(默认 10,0 按默认处理)
}

impl EngineConfig {
    /// 候选货位上限; 防御 0 值配置
    pub fn effective_max_recommendations(&self) -> usize {
        if self.max_recommendations == 0 {
            10
        } else {
            self.max_recommendations
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limits_match_aircraft_constants() {
        let limits = AircraftLimits::default();
        assert_eq!(limits.max_total_weight_kg, 110_000.0);
        assert_eq!(limits.cg_envelope_min_m, 16.5);
        assert_eq!(limits.cg_envelope_max_m, 26.8);
        assert_eq!(limits.lower_deck_stack_limit_m, 2.4);
        assert_eq!(limits.main_deck_stack_limit_m, 3.2);
    }

    #[test]
    fn test_default_scoring_weights_sum_to_one() {
        let weights = ScoringWeights::default();
        let sum = weights.volume_weight
            + weights.weight_margin_weight
            + weights.deck_preference_weight
            + weights.handling_weight;
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_effective_max_recommendations_guards_zero() {
        let config = EngineConfig::default();
        assert_eq!(config.effective_max_recommendations(), 10);

        let config = EngineConfig {
            max_recommendations: 5,
            ..Default::default()
        };
        assert_eq!(config.effective_max_recommendations(), 5);
    }

    #[test]
    fn test_config_deserialize_partial_json() {
        // 局部覆写,其余字段回落默认值
        let json = r#"{"scoring": {"volume_weight": 0.5}, "max_recommendations": 3}"#;
        let config: EngineConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.scoring.volume_weight, 0.5);
        assert_eq!(config.scoring.weight_margin_weight, 0.25); // 默认值保留
        assert_eq!(config.max_recommendations, 3);
        assert_eq!(config.limits.max_total_weight_kg, 110_000.0);
    }
}
