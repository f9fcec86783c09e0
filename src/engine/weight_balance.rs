// ==========================================
// 宽体货机配载评估系统 - 载重平衡引擎
// ==========================================
// 职责: 重心力矩运算、包线校验、装载影响推演
// 输入: 已占用货位快照(库存持锁导出,不读散落状态)
// 红线: 推演绝不改库存; Σw=0 时返回空机重心哨兵,不允许除零崩溃
// ==========================================

use crate::config::engine_config::{AircraftLimits, AlertThresholds};
use crate::domain::cargo::Cargo;
use crate::domain::metrics::{WeightBalanceImpact, WeightBalanceStatus};
use crate::domain::position::{Coordinates, Position};
use crate::domain::types::WeightStatus;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

// ==========================================
// WeightViolationResult - 超限处置结果
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightViolationResult {
    pub has_violation: bool,        // 原货位装载是否超限
    pub alternatives: Vec<Position>, // 合规替代货位,按 |重心偏移| 升序
}

// ==========================================
// WeightBalanceEngine - 载重平衡引擎
// ==========================================
pub struct WeightBalanceEngine {
    limits: AircraftLimits,
    thresholds: AlertThresholds,
}

impl WeightBalanceEngine {
    /// 构造函数
    pub fn new(limits: AircraftLimits, thresholds: AlertThresholds) -> Self {
        Self { limits, thresholds }
    }

    // ==========================================
    // 纯计算
    // ==========================================

    /// 重心加权平均: Σ(w·a) / Σw
    ///
    /// # 规则
    /// - Σw ≤ 0 → 返回空机重心哨兵(定义值,非崩溃)
    /// - weights 与 arms 按下标配对,较长一侧多余元素忽略
    pub fn calculate_center_of_gravity(&self, weights: &[f64], arms: &[f64]) -> f64 {
        let total_weight: f64 = weights.iter().sum();
        if total_weight <= 0.0 {
            return self.limits.empty_weight_cg.x;
        }

        let moment: f64 = weights.iter().zip(arms.iter()).map(|(w, a)| w * a).sum();
        moment / total_weight
    }

    /// 重心包线校验(闭区间)
    pub fn validate_cg_limits(cg: f64, low: f64, high: f64) -> bool {
        cg >= low && cg <= high
    }

    /// 聚合当前状态: (总重, 三维重心)
    ///
    /// x 用力臂 arm_m; y/z 用货位坐标。空载返回 (0, 空机重心)
    pub fn aggregate_state(&self, occupied: &[Position]) -> (f64, Coordinates) {
        let mut total_weight = 0.0f64;
        let mut moment_x = 0.0f64;
        let mut moment_y = 0.0f64;
        let mut moment_z = 0.0f64;

        for position in occupied {
            let weight = position.occupant.as_ref().map(|c| c.weight_kg).unwrap_or(0.0);
            total_weight += weight;
            moment_x += weight * position.arm_m;
            moment_y += weight * position.coordinates.y;
            moment_z += weight * position.coordinates.z;
        }

        if total_weight <= 0.0 {
            return (0.0, self.limits.empty_weight_cg);
        }

        (
            total_weight,
            Coordinates::new(
                moment_x / total_weight,
                moment_y / total_weight,
                moment_z / total_weight,
            ),
        )
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 推演装载影响(不改库存): 假如 cargo 装入 candidate,重心与总重怎么变
    pub fn calculate_cg_impact(
        &self,
        cargo: &Cargo,
        candidate: &Position,
        occupied: &[Position],
    ) -> WeightBalanceImpact {
        let (current_weight, current_cg) = self.aggregate_state(occupied);

        let new_total_weight = current_weight + cargo.weight_kg;
        let new_cg = if new_total_weight <= 0.0 {
            self.limits.empty_weight_cg
        } else {
            Coordinates::new(
                (current_weight * current_cg.x + cargo.weight_kg * candidate.arm_m)
                    / new_total_weight,
                (current_weight * current_cg.y + cargo.weight_kg * candidate.coordinates.y)
                    / new_total_weight,
                (current_weight * current_cg.z + cargo.weight_kg * candidate.coordinates.z)
                    / new_total_weight,
            )
        };

        let within_limits = Self::validate_cg_limits(
            new_cg.x,
            self.limits.cg_envelope_min_m,
            self.limits.cg_envelope_max_m,
        ) && new_total_weight <= self.limits.max_total_weight_kg;

        debug!(
            cargo_id = %cargo.id,
            position_id = %candidate.id,
            new_cg_x = new_cg.x,
            new_total_weight_kg = new_total_weight,
            within_limits,
            "装载影响推演完成"
        );

        WeightBalanceImpact {
            current_cg,
            new_cg,
            // 空载时 aggregate_state 已返回空机重心哨兵,偏移天然相对哨兵计算
            cg_shift_m: new_cg.x - current_cg.x,
            new_total_weight_kg: new_total_weight,
            within_limits,
        }
    }

    /// 超限处置: 原货位超限时,在可用货位中搜索合规替代,按 |重心偏移| 升序
    pub fn handle_weight_violation(
        &self,
        cargo: &Cargo,
        position: &Position,
        available_positions: &[Position],
        occupied: &[Position],
    ) -> WeightViolationResult {
        let impact = self.calculate_cg_impact(cargo, position, occupied);
        if impact.within_limits {
            return WeightViolationResult {
                has_violation: false,
                alternatives: Vec::new(),
            };
        }

        let mut alternatives: Vec<(Position, f64)> = available_positions
            .iter()
            .filter(|p| p.id != position.id)
            .filter_map(|p| {
                let alt_impact = self.calculate_cg_impact(cargo, p, occupied);
                if alt_impact.within_limits {
                    Some((p.clone(), alt_impact.cg_shift_m.abs()))
                } else {
                    None
                }
            })
            .collect();

        alternatives.sort_by(|a, b| {
            a.1.partial_cmp(&b.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.id.cmp(&b.0.id))
        });

        WeightViolationResult {
            has_violation: true,
            alternatives: alternatives.into_iter().map(|(p, _)| p).collect(),
        }
    }

    /// 当前载重平衡状态
    ///
    /// 分级规则 (可解释):
    /// - critical: 业载余量 < 5% 最大业载, 或重心距包线边界 < 0.5m
    /// - caution:  业载余量 < 15% 最大业载, 或重心距包线边界 < 1.5m
    /// - normal:   其他
    pub fn get_current_status(&self, occupied: &[Position]) -> WeightBalanceStatus {
        let (current_weight, cg) = self.aggregate_state(occupied);
        let cg_x = cg.x;

        let weight_margin = self.limits.max_total_weight_kg - current_weight;
        let margin_pct = if self.limits.max_total_weight_kg > 0.0 {
            weight_margin / self.limits.max_total_weight_kg * 100.0
        } else {
            0.0
        };
        let cg_edge_distance = (cg_x - self.limits.cg_envelope_min_m)
            .min(self.limits.cg_envelope_max_m - cg_x);

        let mut reasons = Vec::new();
        if margin_pct < self.thresholds.weight_margin_critical_pct {
            reasons.push(format!(
                "业载余量不足({:.1}% < {:.0}%)",
                margin_pct, self.thresholds.weight_margin_critical_pct
            ));
        } else if margin_pct < self.thresholds.weight_margin_caution_pct {
            reasons.push(format!(
                "业载余量偏低({:.1}% < {:.0}%)",
                margin_pct, self.thresholds.weight_margin_caution_pct
            ));
        }
        if cg_edge_distance < self.thresholds.cg_critical_margin_m {
            reasons.push(format!(
                "重心贴近包线边界({:.2}m < {:.1}m)",
                cg_edge_distance, self.thresholds.cg_critical_margin_m
            ));
        } else if cg_edge_distance < self.thresholds.cg_caution_margin_m {
            reasons.push(format!(
                "重心接近包线边界({:.2}m < {:.1}m)",
                cg_edge_distance, self.thresholds.cg_caution_margin_m
            ));
        }

        let status = if margin_pct < self.thresholds.weight_margin_critical_pct
            || cg_edge_distance < self.thresholds.cg_critical_margin_m
        {
            WeightStatus::Critical
        } else if margin_pct < self.thresholds.weight_margin_caution_pct
            || cg_edge_distance < self.thresholds.cg_caution_margin_m
        {
            WeightStatus::Caution
        } else {
            reasons.push("正常".to_string());
            WeightStatus::Normal
        };

        let status_reason = json!({
            "level": status.to_string(),
            "reasons": reasons,
            "margin_pct": margin_pct,
            "cg_edge_distance_m": cg_edge_distance,
        })
        .to_string();

        WeightBalanceStatus {
            current_weight_kg: current_weight,
            current_cg_m: cg_x,
            weight_margin_kg: weight_margin,
            status,
            status_reason,
        }
    }
}
