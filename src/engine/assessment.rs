// ==========================================
// 宽体货机配载评估系统 - 配载评估协调器
// ==========================================
// 职责: 串联 空间适配评分 + 载重平衡推演 + 硬约束校验,
//       产出可解释的货位推荐与告警
// 数据流: 请求 → 绝对限制预校验 → 候选检索评分 → 逐项平衡推演
//         → 约束标注 → 指标/告警聚合
// 红线: 单个候选的平衡违规跳到下一候选恢复; 校验类失败立即上浮
// ==========================================

use crate::config::engine_config::EngineConfig;
use crate::domain::cargo::{Cargo, CargoRequest};
use crate::domain::metrics::{Alert, UtilizationMetrics, WeightBalanceImpact};
use crate::domain::position::{Position, PositionRecommendation};
use crate::domain::types::{AlertSeverity, AlertType};
use crate::engine::fit::SpatialFitScorer;
use crate::engine::fit_core::FitCore;
use crate::engine::monitor::CapacityAlertMonitor;
use crate::engine::weight_balance::WeightBalanceEngine;
use crate::inventory::position_inventory::PositionInventory;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument, warn};

// 承重接近上限的预警比例
const WEIGHT_WARNING_RATIO: f64 = 0.8;

// ==========================================
// AssessmentResult - 评估结果
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentResult {
    pub assessment_successful: bool, // 是否存在至少一个完全合规候选
    pub cargo_id: String,
    pub recommended_positions: Vec<PositionRecommendation>,
    pub capacity_utilization: UtilizationMetrics,
    pub weight_balance_impact: Option<WeightBalanceImpact>, // 首选候选的平衡影响
    pub alerts: Vec<Alert>,
    pub error_message: Option<String>,
}

// ==========================================
// 约束校验结构
// ==========================================

/// 单个约束族的校验结果
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryCheck {
    pub violations: Vec<String>, // 硬违规(一票否决)
    pub warnings: Vec<String>,   // 软预警(降级提示)
}

/// 三个约束族: 空间 / 载重 / 特殊处理
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConstraintCategories {
    pub spatial: CategoryCheck,
    pub weight: CategoryCheck,
    pub handling: CategoryCheck,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConstraintValidation {
    pub overall_valid: bool,       // 无任何硬违规
    pub severity: AlertSeverity,   // CRITICAL=硬违规; 否则按预警数量降级
    pub constraint_categories: ConstraintCategories,
}

/// 违规处置动作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationAction {
    Reject,             // 无可行替代,拒绝
    SuggestAlternative, // 存在满足全部硬约束的替代货位
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViolationHandling {
    pub action: ViolationAction,
    pub alternatives: Vec<Position>,
}

// ==========================================
// AssessmentCoordinator - 配载评估协调器
// ==========================================
pub struct AssessmentCoordinator {
    inventory: Arc<PositionInventory>,
    scorer: SpatialFitScorer,
    weight_balance: WeightBalanceEngine,
    monitor: Arc<CapacityAlertMonitor>,
    config: EngineConfig,
}

impl AssessmentCoordinator {
    /// 构造函数
    pub fn new(
        inventory: Arc<PositionInventory>,
        scorer: SpatialFitScorer,
        weight_balance: WeightBalanceEngine,
        monitor: Arc<CapacityAlertMonitor>,
        config: EngineConfig,
    ) -> Self {
        Self {
            inventory,
            scorer,
            weight_balance,
            monitor,
            config,
        }
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 配载评估主流程
    ///
    /// 步骤:
    /// 1. 绝对限制预校验(任何货位都装不下 → 立即失败,不检索候选)
    /// 2. 候选检索与评分(货舱偏好参与评分而非硬过滤)
    /// 3. 逐候选平衡推演,剔除越限项; 全部越限时保留最小越限项并标记
    /// 4. 标注推荐理由与约束满足性
    /// 5. 聚合容量指标与告警
    #[instrument(skip(self, request), fields(cargo_id = %request.cargo.id, priority = %request.priority))]
    pub fn assess_cargo_placement(&self, request: &CargoRequest) -> AssessmentResult {
        let cargo = &request.cargo;

        // 1. 绝对限制预校验
        if let Some(reason) = self.check_absolute_limits(cargo) {
            warn!(cargo_id = %cargo.id, reason = %reason, "绝对限制预校验失败");
            return AssessmentResult {
                assessment_successful: false,
                cargo_id: cargo.id.clone(),
                recommended_positions: Vec::new(),
                capacity_utilization: self.inventory.utilization_metrics(),
                weight_balance_impact: None,
                alerts: Vec::new(),
                error_message: Some(reason),
            };
        }

        // 2. 候选检索与评分(全部空闲货位参与,货舱偏好体现在评分上)
        let available = self.inventory.get_available_positions(None);
        let candidates = self.scorer.find_best_positions(
            cargo,
            request.preferred_deck,
            &available,
            self.config.effective_max_recommendations(),
        );

        let metrics = self.inventory.utilization_metrics();

        if candidates.is_empty() {
            return AssessmentResult {
                assessment_successful: false,
                cargo_id: cargo.id.clone(),
                recommended_positions: Vec::new(),
                capacity_utilization: metrics,
                weight_balance_impact: None,
                alerts: Vec::new(),
                error_message: Some("当前无空闲货位满足该货物的硬约束".to_string()),
            };
        }

        // 3. 逐候选平衡推演
        let occupied = self.inventory.occupied_snapshot();
        let mut compliant: Vec<PositionRecommendation> = Vec::new();
        let mut violating: Vec<(PositionRecommendation, WeightBalanceImpact, f64)> = Vec::new();

        for (position, score) in &candidates {
            let impact = self
                .weight_balance
                .calculate_cg_impact(cargo, position, &occupied);

            // 4. 标注推荐理由
            let (_, mut reasoning) = self.scorer.score(cargo, request.preferred_deck, position);
            reasoning.push(format!("CG_SHIFT={:+.3}m", impact.cg_shift_m));
            reasoning.push(format!("NEW_CG={:.2}m", impact.new_cg.x));

            if impact.within_limits {
                reasoning.push("WITHIN_LIMITS".to_string());
                compliant.push(PositionRecommendation {
                    position: position.clone(),
                    fit_score: *score,
                    reasoning,
                    constraints_satisfied: true,
                });
            } else {
                let magnitude = self.violation_magnitude(&impact);
                reasoning.push(format!(
                    "LIMIT_VIOLATION: new_cg={:.2}m, new_total_weight={:.0}kg",
                    impact.new_cg.x, impact.new_total_weight_kg
                ));
                violating.push((
                    PositionRecommendation {
                        position: position.clone(),
                        fit_score: *score,
                        reasoning,
                        constraints_satisfied: false,
                    },
                    impact,
                    magnitude,
                ));
            }
        }

        let mut alerts = Vec::new();
        let assessment_successful = !compliant.is_empty();

        let (recommended_positions, weight_balance_impact) = if assessment_successful {
            let top_impact = self.weight_balance.calculate_cg_impact(
                cargo,
                &compliant[0].position,
                &occupied,
            );
            (compliant, Some(top_impact))
        } else {
            // 全部越限: 保留最小越限候选并以告警标记
            violating.sort_by(|a, b| {
                a.2.partial_cmp(&b.2)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then_with(|| a.0.position.id.cmp(&b.0.position.id))
            });
            // candidates 非空且 compliant 为空时 violating 必非空
            let (least, impact, _) = match violating.into_iter().next() {
                Some(entry) => entry,
                None => {
                    return AssessmentResult {
                        assessment_successful: false,
                        cargo_id: cargo.id.clone(),
                        recommended_positions: Vec::new(),
                        capacity_utilization: metrics,
                        weight_balance_impact: None,
                        alerts,
                        error_message: Some("候选评估为空".to_string()),
                    };
                }
            };

            let alert = Alert::new(
                AlertSeverity::Critical,
                AlertType::WeightBalance,
                format!(
                    "无完全合规货位: 最优候选 {} 仍越限 (new_cg={:.2}m, 总重={:.0}kg)",
                    least.position.id, impact.new_cg.x, impact.new_total_weight_kg
                ),
                vec![
                    "先卸载或重排既有货物再装载该件".to_string(),
                    "检查是否可拆分货物降低单件重量".to_string(),
                ],
            );
            self.monitor.record_constraint_alerts(vec![alert.clone()]);
            alerts.push(alert);

            (vec![least], Some(impact))
        };

        // 5. 聚合容量告警
        alerts.extend(self.monitor.monitor_capacity(&metrics));

        info!(
            cargo_id = %cargo.id,
            assessment_successful,
            recommendation_count = recommended_positions.len(),
            alert_count = alerts.len(),
            "配载评估完成"
        );

        AssessmentResult {
            assessment_successful,
            cargo_id: cargo.id.clone(),
            recommended_positions,
            capacity_utilization: metrics,
            weight_balance_impact,
            alerts,
            error_message: if assessment_successful {
                None
            } else {
                Some("所有候选货位均违反载重平衡限制".to_string())
            },
        }
    }

    /// 三族约束独立校验后合并
    ///
    /// severity 规则: 任一硬违规 → CRITICAL; 预警 ≥ 2 → HIGH; 预警 = 1 → MEDIUM; 无 → LOW
    pub fn coordinate_constraint_validation(
        &self,
        cargo: &Cargo,
        position: &Position,
    ) -> ConstraintValidation {
        let mut categories = ConstraintCategories::default();

        // ===== 空间族 =====
        let gate = FitCore::check_hard_constraints(cargo, position);
        for reason in &gate.reasons {
            if reason.starts_with("DIM_EXCEEDED") || reason.starts_with("STACKING_REQUIRED") {
                categories.spatial.violations.push(reason.clone());
            } else if reason.starts_with("STACK_OVERFLOW") {
                categories.spatial.warnings.push(reason.clone());
            }
        }
        if cargo.fragile && position.high_vibration {
            categories
                .spatial
                .warnings
                .push("FRAGILE_ON_VIBRATION: high-vibration position".to_string());
        }

        // ===== 载重族 =====
        if cargo.weight_kg > position.max_weight_kg {
            categories.weight.violations.push(format!(
                "WEIGHT_EXCEEDED: cargo={:.0}kg > max={:.0}kg",
                cargo.weight_kg, position.max_weight_kg
            ));
        } else if cargo.weight_kg > position.max_weight_kg * WEIGHT_WARNING_RATIO {
            categories.weight.warnings.push(format!(
                "WEIGHT_NEAR_LIMIT: cargo={:.0}kg > {:.0}% of max",
                cargo.weight_kg,
                WEIGHT_WARNING_RATIO * 100.0
            ));
        }
        let occupied = self.inventory.occupied_snapshot();
        let impact = self
            .weight_balance
            .calculate_cg_impact(cargo, position, &occupied);
        if !impact.within_limits {
            categories.weight.violations.push(format!(
                "BALANCE_VIOLATION: new_cg={:.2}m, new_total_weight={:.0}kg",
                impact.new_cg.x, impact.new_total_weight_kg
            ));
        }

        // ===== 特殊处理族 =====
        for tag in &cargo.special_handling {
            if !position.supports_handling(tag) {
                categories
                    .handling
                    .violations
                    .push(format!("HANDLING_UNSUPPORTED: tag={}", tag));
            }
        }

        let violation_count = categories.spatial.violations.len()
            + categories.weight.violations.len()
            + categories.handling.violations.len();
        let warning_count = categories.spatial.warnings.len()
            + categories.weight.warnings.len()
            + categories.handling.warnings.len();

        let severity = if violation_count > 0 {
            AlertSeverity::Critical
        } else if warning_count >= 2 {
            AlertSeverity::High
        } else if warning_count == 1 {
            AlertSeverity::Medium
        } else {
            AlertSeverity::Low
        };

        ConstraintValidation {
            overall_valid: violation_count == 0,
            severity,
            constraint_categories: categories,
        }
    }

    /// 违规处置: 在库存中检索满足全部硬约束(含平衡限制)的替代货位
    pub fn handle_constraint_violations(
        &self,
        cargo: &Cargo,
        position: &Position,
    ) -> ViolationHandling {
        let available = self.inventory.get_available_positions(None);
        let occupied = self.inventory.occupied_snapshot();

        let candidates = self.scorer.find_best_positions(
            cargo,
            None,
            &available,
            self.config.effective_max_recommendations(),
        );

        let alternatives: Vec<Position> = candidates
            .into_iter()
            .map(|(p, _)| p)
            .filter(|p| p.id != position.id)
            .filter(|p| {
                self.weight_balance
                    .calculate_cg_impact(cargo, p, &occupied)
                    .within_limits
            })
            .collect();

        let action = if alternatives.is_empty() {
            ViolationAction::Reject
        } else {
            ViolationAction::SuggestAlternative
        };

        ViolationHandling {
            action,
            alternatives,
        }
    }

    // ==========================================
    // 内部辅助
    // ==========================================

    /// 绝对限制预校验: 通过返回 None,失败返回拒绝原因
    ///
    /// 与全机限制比较(单件超业载)或与最大货位包线比较(任何货位都装不下),
    /// 特殊处理标签不参与此判定(属于货位适配而非绝对限制)
    fn check_absolute_limits(&self, cargo: &Cargo) -> Option<String> {
        // 单件即超全机最大业载
        let max_total = self.config.limits.max_total_weight_kg;
        if cargo.weight_kg > max_total {
            return Some(format!(
                "货物 {} 重量 {:.0}kg 超过全机最大业载 {:.0}kg",
                cargo.id, cargo.weight_kg, max_total
            ));
        }

        // 任何货位(无论占用与否)都无法在尺寸/承重上容纳
        let mut probe = cargo.clone();
        probe.special_handling.clear();
        let theoretically_fits = self
            .inventory
            .snapshot()
            .iter()
            .any(|p| FitCore::check_hard_constraints(&probe, p).passed);

        if theoretically_fits {
            None
        } else {
            Some(format!(
                "货物 {} ({:.2}x{:.2}x{:.2}m, {:.0}kg) 超出所有货位的装载包线",
                cargo.id,
                cargo.dimensions.length,
                cargo.dimensions.width,
                cargo.dimensions.height,
                cargo.weight_kg
            ))
        }
    }

    /// 越限程度度量: 重心出界距离(m) + 超重比例,用于挑选最小越限候选
    fn violation_magnitude(&self, impact: &WeightBalanceImpact) -> f64 {
        let limits = &self.config.limits;
        let cg_excess = (limits.cg_envelope_min_m - impact.new_cg.x)
            .max(0.0)
            .max(impact.new_cg.x - limits.cg_envelope_max_m)
            .max(0.0);
        let weight_excess_ratio = if limits.max_total_weight_kg > 0.0 {
            ((impact.new_total_weight_kg - limits.max_total_weight_kg)
                / limits.max_total_weight_kg)
                .max(0.0)
        } else {
            0.0
        };
        cg_excess + weight_excess_ratio
    }
}
