// ==========================================
// 宽体货机配载评估系统 - 空间适配纯函数库
// ==========================================
// 职责: 提供摆放方向枚举、硬约束门控、评分分量的纯逻辑
// 红线: 无状态、无副作用、无 I/O 操作,所有规则必须输出 reason
// ==========================================

use crate::domain::cargo::{Cargo, Dimensions};
use crate::domain::position::{Position, PositionCapacity};

// ==========================================
// HardConstraintCheck - 硬约束门控结果
// ==========================================
#[derive(Debug, Clone)]
pub struct HardConstraintCheck {
    pub passed: bool,              // 是否通过全部硬约束
    pub needs_stack_overflow: bool, // 是否依赖堆叠空间装载(超出单层高度)
    pub reasons: Vec<String>,      // 决策原因(编码)
}

// ==========================================
// FitCore - 纯函数工具类
// ==========================================
pub struct FitCore;

impl FitCore {
    /// 枚举货物允许的摆放方向
    ///
    /// # 规则
    /// - tiltable=false → 仅原始方向
    /// - tiltable=true → 全部 6 种轴向排列
    pub fn orientations(dims: &Dimensions, tiltable: bool) -> Vec<Dimensions> {
        if !tiltable {
            return vec![*dims];
        }

        let (l, w, h) = (dims.length, dims.width, dims.height);
        vec![
            Dimensions::new(l, w, h),
            Dimensions::new(l, h, w),
            Dimensions::new(w, l, h),
            Dimensions::new(w, h, l),
            Dimensions::new(h, l, w),
            Dimensions::new(h, w, l),
        ]
    }

    /// 硬约束门控
    ///
    /// # 规则
    /// 1. weight > max_weight_kg → WEIGHT_EXCEEDED
    /// 2. 任一允许方向放得进单层外形尺寸 → 通过
    /// 3. 底面放得下且高度不超过货舱堆叠上限:
    ///    - stackable=true → 通过(标记 STACK_OVERFLOW,评分降权)
    ///    - stackable=false → STACKING_REQUIRED
    /// 4. 所有方向都放不下 → DIM_EXCEEDED
    /// 5. 要求的特殊处理标签货位不支持 → HANDLING_UNSUPPORTED
    pub fn check_hard_constraints(cargo: &Cargo, position: &Position) -> HardConstraintCheck {
        let mut reasons = Vec::new();

        // 规则 1: 承重
        if !position.can_hold_weight(cargo.weight_kg) {
            reasons.push(format!(
                "WEIGHT_EXCEEDED: cargo={:.0}kg > max={:.0}kg",
                cargo.weight_kg, position.max_weight_kg
            ));
            return HardConstraintCheck {
                passed: false,
                needs_stack_overflow: false,
                reasons,
            };
        }

        // 规则 5 提前判: 特殊处理标签(与尺寸无关,先挡掉)
        for tag in &cargo.special_handling {
            if !position.supports_handling(tag) {
                reasons.push(format!("HANDLING_UNSUPPORTED: tag={}", tag));
                return HardConstraintCheck {
                    passed: false,
                    needs_stack_overflow: false,
                    reasons,
                };
            }
        }

        // 规则 2: 单层外形尺寸
        let orientations = Self::orientations(&cargo.dimensions, cargo.tiltable);
        if orientations
            .iter()
            .any(|o| o.fits_within(&position.max_dimensions))
        {
            reasons.push("DIM_FIT: within single-tier envelope".to_string());
            return HardConstraintCheck {
                passed: true,
                needs_stack_overflow: false,
                reasons,
            };
        }

        // 规则 3: 底面放得下、高度依赖堆叠空间
        let stack_candidate = orientations.iter().any(|o| {
            o.length <= position.max_dimensions.length
                && o.width <= position.max_dimensions.width
                && o.height <= position.stack_limit_m
        });

        if stack_candidate {
            if cargo.stackable {
                reasons.push(format!(
                    "STACK_OVERFLOW: height within deck limit {:.1}m",
                    position.stack_limit_m
                ));
                return HardConstraintCheck {
                    passed: true,
                    needs_stack_overflow: true,
                    reasons,
                };
            }
            reasons.push(format!(
                "STACKING_REQUIRED: cargo non-stackable, height={:.2}m > tier={:.2}m",
                cargo.dimensions.height, position.max_dimensions.height
            ));
            return HardConstraintCheck {
                passed: false,
                needs_stack_overflow: false,
                reasons,
            };
        }

        // 规则 4: 放不下
        reasons.push(format!(
            "DIM_EXCEEDED: cargo={:.2}x{:.2}x{:.2}m > envelope={:.2}x{:.2}x{:.2}m",
            cargo.dimensions.length,
            cargo.dimensions.width,
            cargo.dimensions.height,
            position.max_dimensions.length,
            position.max_dimensions.width,
            position.max_dimensions.height
        ));
        HardConstraintCheck {
            passed: false,
            needs_stack_overflow: false,
            reasons,
        }
    }

    /// 容积适配分量: 货物体积 / 货位可用容积,装填率越高越好
    /// (承重余量分量见 PositionCapacity::weight_margin_ratio)
    pub fn volume_fit_score(cargo_volume: f64, usable_volume: f64) -> f64 {
        if usable_volume <= 0.0 {
            return 0.0;
        }
        (cargo_volume / usable_volume).clamp(0.0, 1.0)
    }
}

// ==========================================
// 单元测试
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::position::Coordinates;
    use crate::domain::types::{CargoType, DeckType, PositionState};

    fn create_test_position() -> Position {
        Position {
            id: "LD-01-01".to_string(),
            deck_type: DeckType::LowerDeck,
            coordinates: Coordinates::new(16.8, -0.9, 1.1),
            max_dimensions: Dimensions::new(1.8, 1.6, 1.7),
            max_weight_kg: 1500.0,
            arm_m: 16.8,
            stack_limit_m: 2.4,
            supported_handling: vec!["orientation_critical".to_string()],
            high_vibration: false,
            state: PositionState::Available,
            occupant: None,
        }
    }

    fn create_test_cargo(dims: Dimensions, weight_kg: f64) -> Cargo {
        Cargo {
            id: "C001".to_string(),
            dimensions: dims,
            weight_kg,
            stackable: true,
            tiltable: false,
            fragile: false,
            cargo_type: CargoType::General,
            special_handling: vec![],
        }
    }

    // ==========================================
    // 测试 1: 摆放方向枚举
    // ==========================================

    #[test]
    fn test_orientations_non_tiltable() {
        let dims = Dimensions::new(2.0, 1.0, 0.5);
        let orientations = FitCore::orientations(&dims, false);
        assert_eq!(orientations.len(), 1); // 仅原始方向
        assert_eq!(orientations[0], dims);
    }

    #[test]
    fn test_orientations_tiltable_all_permutations() {
        let dims = Dimensions::new(2.0, 1.0, 0.5);
        let orientations = FitCore::orientations(&dims, true);
        assert_eq!(orientations.len(), 6);
        // 体积在所有方向下不变
        for o in &orientations {
            assert!((o.volume() - dims.volume()).abs() < 1e-9);
        }
    }

    // ==========================================
    // 测试 2: 硬约束门控
    // ==========================================

    #[test]
    fn test_hard_constraints_pass() {
        let position = create_test_position();
        let cargo = create_test_cargo(Dimensions::new(1.5, 1.2, 0.8), 500.0);

        let check = FitCore::check_hard_constraints(&cargo, &position);
        assert!(check.passed);
        assert!(!check.needs_stack_overflow);
        assert!(check.reasons.iter().any(|r| r.starts_with("DIM_FIT")));
    }

    #[test]
    fn test_hard_constraints_weight_exceeded() {
        let position = create_test_position();
        let cargo = create_test_cargo(Dimensions::new(1.0, 1.0, 1.0), 2000.0);

        let check = FitCore::check_hard_constraints(&cargo, &position);
        assert!(!check.passed);
        assert!(check
            .reasons
            .iter()
            .any(|r| r.starts_with("WEIGHT_EXCEEDED")));
    }

    #[test]
    fn test_hard_constraints_dim_exceeded() {
        let position = create_test_position();
        let cargo = create_test_cargo(Dimensions::new(3.0, 2.5, 2.0), 500.0);

        let check = FitCore::check_hard_constraints(&cargo, &position);
        assert!(!check.passed);
        assert!(check.reasons.iter().any(|r| r.starts_with("DIM_EXCEEDED")));
    }

    #[test]
    fn test_hard_constraints_tiltable_rescues_orientation() {
        let position = create_test_position();
        // 原始方向高度 1.8m 超过 1.7m,翻转后 (1.8, 1.6, 1.0) 放得下
        let mut cargo = create_test_cargo(Dimensions::new(1.0, 1.6, 1.8), 500.0);

        let check = FitCore::check_hard_constraints(&cargo, &position);
        assert!(check.needs_stack_overflow); // 不可翻转: 只能依赖堆叠空间

        cargo.tiltable = true;
        let check = FitCore::check_hard_constraints(&cargo, &position);
        assert!(check.passed);
        assert!(!check.needs_stack_overflow); // 翻转后单层放下
    }

    #[test]
    fn test_hard_constraints_stacking_required_rejects_non_stackable() {
        let position = create_test_position();
        // 高度 2.0m: 超过单层 1.7m,但低于货舱堆叠上限 2.4m
        let mut cargo = create_test_cargo(Dimensions::new(1.5, 1.2, 2.0), 500.0);
        cargo.stackable = false;

        let check = FitCore::check_hard_constraints(&cargo, &position);
        assert!(!check.passed);
        assert!(check
            .reasons
            .iter()
            .any(|r| r.starts_with("STACKING_REQUIRED")));
    }

    #[test]
    fn test_hard_constraints_stack_overflow_allowed_for_stackable() {
        let position = create_test_position();
        let cargo = create_test_cargo(Dimensions::new(1.5, 1.2, 2.0), 500.0);

        let check = FitCore::check_hard_constraints(&cargo, &position);
        assert!(check.passed);
        assert!(check.needs_stack_overflow);
        assert!(check.reasons.iter().any(|r| r.starts_with("STACK_OVERFLOW")));
    }

    #[test]
    fn test_hard_constraints_unsupported_handling_tag() {
        let position = create_test_position(); // 下货舱不支持 heavy_lift
        let mut cargo = create_test_cargo(Dimensions::new(1.0, 1.0, 0.8), 500.0);
        cargo.special_handling = vec!["heavy_lift".to_string()];

        let check = FitCore::check_hard_constraints(&cargo, &position);
        assert!(!check.passed);
        assert!(check
            .reasons
            .iter()
            .any(|r| r.contains("HANDLING_UNSUPPORTED: tag=heavy_lift")));
    }

    // ==========================================
    // 测试 3: 评分分量
    // ==========================================

    #[test]
    fn test_volume_fit_score() {
        assert!((FitCore::volume_fit_score(1.44, 4.896) - 0.294).abs() < 0.001);
        assert_eq!(FitCore::volume_fit_score(10.0, 4.0), 1.0); // 上限截断
        assert_eq!(FitCore::volume_fit_score(1.0, 0.0), 0.0); // 防御除零
    }
}
