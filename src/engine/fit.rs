// ==========================================
// 宽体货机配载评估系统 - 空间适配评分引擎
// ==========================================
// 职责: 对候选货位计算确定性适配评分并排序
// 红线: 相同输入必须产生相同排序(并列时按货位编号字典序),
//       评分只读库存快照,绝不修改货位状态
// ==========================================

use crate::config::engine_config::ScoringWeights;
use crate::domain::cargo::Cargo;
use crate::domain::position::{Position, PositionCapacity};
use crate::domain::types::{CargoType, DeckType, PositionState};
use crate::engine::fit_core::FitCore;
use tracing::debug;

// ==========================================
// SpatialFitScorer - 空间适配评分引擎
// ==========================================
pub struct SpatialFitScorer {
    weights: ScoringWeights,
}

impl SpatialFitScorer {
    /// 构造函数
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 计算货物对货位的适配评分
    ///
    /// 组合公式:
    ///   base = w_vol·容积适配 + w_margin·承重余量 + w_deck·货舱偏好 + w_handling·处理适配
    ///   score = base × 类型调整 × 易碎振动惩罚 × 堆叠溢出惩罚, 截断到 [0,1]
    ///
    /// # 返回
    /// (score, reasons): 硬约束不通过时 score=0.0,reasons 给出拒绝原因
    pub fn score(
        &self,
        cargo: &Cargo,
        preferred_deck: Option<DeckType>,
        position: &Position,
    ) -> (f64, Vec<String>) {
        // 1. 硬约束门控
        let gate = FitCore::check_hard_constraints(cargo, position);
        if !gate.passed {
            return (0.0, gate.reasons);
        }
        let mut reasons = gate.reasons;

        // 2. 容积适配
        let volume_score = FitCore::volume_fit_score(cargo.volume(), position.usable_volume());
        reasons.push(format!("VOLUME_FIT: {:.2}", volume_score));

        // 3. 承重余量
        let margin_score = position.weight_margin_ratio(cargo.weight_kg);
        reasons.push(format!("WEIGHT_MARGIN: {:.2}", margin_score));

        // 4. 货舱偏好
        let deck_score = match preferred_deck {
            None => 1.0, // 无偏好不扣分
            Some(deck) if deck == position.deck_type => {
                reasons.push(format!("DECK_MATCH: {}", deck));
                1.0
            }
            Some(deck) => {
                reasons.push(format!(
                    "DECK_MISMATCH: preferred={}, actual={}",
                    deck, position.deck_type
                ));
                self.weights.deck_mismatch_score
            }
        };

        // 5. 特殊处理适配(硬性不支持已在门控淘汰,此处恒为满分)
        let handling_score = 1.0;

        let base = self.weights.volume_weight * volume_score
            + self.weights.weight_margin_weight * margin_score
            + self.weights.deck_preference_weight * deck_score
            + self.weights.handling_weight * handling_score;

        // 6. 乘性调整
        let mut score = base * Self::cargo_type_adjustment(cargo.cargo_type, position);

        if cargo.fragile && position.high_vibration {
            score *= self.weights.fragile_vibration_penalty;
            reasons.push("FRAGILE_VIBRATION_PENALTY".to_string());
        }

        if gate.needs_stack_overflow {
            score *= self.weights.stacking_overflow_penalty;
            reasons.push("STACK_OVERFLOW_PENALTY".to_string());
        }

        (score.clamp(0.0, 1.0), reasons)
    }

    /// 搜索最优货位
    ///
    /// # 参数
    /// - `candidates`: 候选货位(调用方负责先过滤为 AVAILABLE;此处再防御一次)
    /// - `max_results`: 截断数量
    ///
    /// # 返回
    /// 按评分降序、编号升序排列的 (货位, 评分) 列表,剔除 score=0 的不可行项
    pub fn find_best_positions(
        &self,
        cargo: &Cargo,
        preferred_deck: Option<DeckType>,
        candidates: &[Position],
        max_results: usize,
    ) -> Vec<(Position, f64)> {
        let mut scored: Vec<(Position, f64)> = candidates
            .iter()
            .filter(|p| p.state == PositionState::Available)
            .map(|p| {
                let (score, _) = self.score(cargo, preferred_deck, p);
                (p.clone(), score)
            })
            .filter(|(_, score)| *score > 0.0)
            .collect();

        // 评分降序,并列时按编号字典序保证确定性
        scored.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.id.cmp(&b.0.id))
        });
        scored.truncate(max_results);

        debug!(
            cargo_id = %cargo.id,
            candidate_count = candidates.len(),
            result_count = scored.len(),
            "货位评分完成"
        );

        scored
    }

    // ==========================================
    // 类型调整映射表
    // ==========================================

    /// 货物类型评分调整系数(封闭枚举 + 显式映射,不做运行时类型探测)
    ///
    /// - 电子产品: 偏好温控稳定的下货舱,振动区降分
    /// - 易腐货物: 偏好温控货位
    /// - 机械设备: 偏好主货舱承重
    /// - 汽车零部件: 振动区轻微降分
    /// - 纺织品/普通货物: 无调整
    fn cargo_type_adjustment(cargo_type: CargoType, position: &Position) -> f64 {
        match cargo_type {
            CargoType::Electronics => {
                let deck_factor = match position.deck_type {
                    DeckType::LowerDeck => 1.0,
                    DeckType::MainDeck => 0.95,
                };
                let vibration_factor = if position.high_vibration { 0.9 } else { 1.0 };
                deck_factor * vibration_factor
            }
            CargoType::Perishable => {
                if position.supports_handling("temperature_controlled") {
                    1.0
                } else {
                    0.9
                }
            }
            CargoType::Machinery => match position.deck_type {
                DeckType::MainDeck => 1.0,
                DeckType::LowerDeck => 0.95,
            },
            CargoType::AutomotiveParts => {
                if position.high_vibration {
                    0.95
                } else {
                    1.0
                }
            }
            CargoType::Textiles | CargoType::General => 1.0,
        }
    }
}

// ==========================================
// 单元测试
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::engine_config::AircraftLimits;
    use crate::domain::cargo::Dimensions;
    use crate::inventory::layout::build_standard_layout;

    fn create_scorer() -> SpatialFitScorer {
        SpatialFitScorer::new(ScoringWeights::default())
    }

    fn standard_positions() -> Vec<Position> {
        build_standard_layout(&AircraftLimits::default())
    }

    fn create_test_cargo() -> Cargo {
        Cargo {
            id: "C001".to_string(),
            dimensions: Dimensions::new(1.5, 1.2, 0.8),
            weight_kg: 500.0,
            stackable: true,
            tiltable: false,
            fragile: false,
            cargo_type: CargoType::Electronics,
            special_handling: vec![],
        }
    }

    #[test]
    fn test_score_in_unit_range_with_reasons() {
        let scorer = create_scorer();
        let positions = standard_positions();
        let cargo = create_test_cargo();

        let (score, reasons) = scorer.score(&cargo, Some(DeckType::LowerDeck), &positions[0]);
        assert!(score > 0.0 && score <= 1.0);
        assert!(reasons.iter().any(|r| r.starts_with("VOLUME_FIT")));
        assert!(reasons.iter().any(|r| r.starts_with("WEIGHT_MARGIN")));
        assert!(reasons.iter().any(|r| r.starts_with("DECK_MATCH")));
    }

    #[test]
    fn test_score_zero_for_infeasible() {
        let scorer = create_scorer();
        let positions = standard_positions();
        let mut cargo = create_test_cargo();
        cargo.dimensions = Dimensions::new(3.0, 2.5, 2.0);
        cargo.weight_kg = 2800.0;
        cargo.stackable = false;

        for position in &positions {
            let (score, reasons) = scorer.score(&cargo, None, position);
            assert_eq!(score, 0.0, "position {} should reject", position.id);
            assert!(!reasons.is_empty());
        }
    }

    #[test]
    fn test_deck_preference_changes_ranking() {
        let scorer = create_scorer();
        let positions = standard_positions();
        let cargo = create_test_cargo();

        let lower_first =
            scorer.find_best_positions(&cargo, Some(DeckType::LowerDeck), &positions, 5);
        assert!(!lower_first.is_empty());
        assert_eq!(lower_first[0].0.deck_type, DeckType::LowerDeck);
    }

    #[test]
    fn test_find_best_positions_deterministic_tie_break() {
        let scorer = create_scorer();
        let positions = standard_positions();
        let cargo = create_test_cargo();

        let first = scorer.find_best_positions(&cargo, None, &positions, 10);
        let second = scorer.find_best_positions(&cargo, None, &positions, 10);

        let ids_first: Vec<&str> = first.iter().map(|(p, _)| p.id.as_str()).collect();
        let ids_second: Vec<&str> = second.iter().map(|(p, _)| p.id.as_str()).collect();
        assert_eq!(ids_first, ids_second); // 完全确定性

        // 评分降序
        for pair in first.windows(2) {
            assert!(pair[0].1 >= pair[1].1);
        }
    }

    #[test]
    fn test_find_best_positions_skips_non_available() {
        let scorer = create_scorer();
        let mut positions = standard_positions();
        let cargo = create_test_cargo();

        // 全部标记为占用
        for position in positions.iter_mut() {
            position.state = PositionState::Occupied;
            position.occupant = Some(cargo.clone());
        }

        let results = scorer.find_best_positions(&cargo, None, &positions, 10);
        assert!(results.is_empty());
    }

    #[test]
    fn test_fragile_on_vibration_position_scores_lower() {
        let scorer = create_scorer();
        let positions = standard_positions();
        let mut cargo = create_test_cargo();
        cargo.cargo_type = CargoType::General;
        cargo.fragile = true;

        let vibration = positions
            .iter()
            .find(|p| p.high_vibration && p.deck_type == DeckType::LowerDeck)
            .unwrap();
        let calm = positions
            .iter()
            .find(|p| !p.high_vibration && p.deck_type == DeckType::LowerDeck)
            .unwrap();

        let (score_vibration, _) = scorer.score(&cargo, None, vibration);
        let (score_calm, _) = scorer.score(&cargo, None, calm);
        assert!(score_vibration < score_calm);
    }

    #[test]
    fn test_heavy_lift_restricted_to_main_deck() {
        let scorer = create_scorer();
        let positions = standard_positions();
        let mut cargo = create_test_cargo();
        cargo.special_handling = vec!["heavy_lift".to_string()];

        let results = scorer.find_best_positions(&cargo, None, &positions, 56);
        assert!(!results.is_empty());
        assert!(results
            .iter()
            .all(|(p, _)| p.deck_type == DeckType::MainDeck));
    }

    #[test]
    fn test_max_results_truncation() {
        let scorer = create_scorer();
        let positions = standard_positions();
        let cargo = create_test_cargo();

        let results = scorer.find_best_positions(&cargo, None, &positions, 3);
        assert_eq!(results.len(), 3);
    }
}
