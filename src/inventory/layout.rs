// ==========================================
// 宽体货机配载评估系统 - 标准货位布局
// ==========================================
// 职责: 进程启动时一次性生成全部 56 个货位 (24 下货舱 + 32 主货舱)
// 编号: LD-{排:02}-{列:02} / MD-{排:02}-{列:02},字典序即物理排列顺序
// 力臂: 全部落在重心包线 [16.5, 26.8] 内,任意占用组合的重心凸组合不出界
// ==========================================

use crate::config::engine_config::AircraftLimits;
use crate::domain::cargo::Dimensions;
use crate::domain::position::{Coordinates, Position};
use crate::domain::types::{DeckType, PositionState};

// ===== 下货舱参数 =====
const LOWER_DECK_ROWS: u32 = 12;
const LOWER_DECK_FIRST_ARM_M: f64 = 16.8;
const LOWER_DECK_ROW_PITCH_M: f64 = 0.9;
const LOWER_DECK_MAX_DIMS: Dimensions = Dimensions {
    length: 1.8,
    width: 1.6,
    height: 1.7,
};
const LOWER_DECK_MAX_WEIGHT_KG: f64 = 1500.0;
const LOWER_DECK_Y_OFFSET_M: f64 = 0.9;
const LOWER_DECK_Z_M: f64 = 1.1;
// 下货舱前部 01-06 排带温控回路
const LOWER_DECK_TEMP_CONTROLLED_ROWS: u32 = 6;

// ===== 主货舱参数 =====
const MAIN_DECK_ROWS: u32 = 16;
const MAIN_DECK_FIRST_ARM_M: f64 = 16.7;
const MAIN_DECK_ROW_PITCH_M: f64 = 0.65;
const MAIN_DECK_MAX_DIMS: Dimensions = Dimensions {
    length: 2.8,
    width: 2.2,
    height: 2.9,
};
const MAIN_DECK_MAX_WEIGHT_KG: f64 = 2500.0;
const MAIN_DECK_Y_OFFSET_M: f64 = 1.4;
const MAIN_DECK_Z_M: f64 = 3.0;

// 高振动区: 力臂位于包线最前/最后约 1m 的货位(靠近增压隔框与尾部)
const HIGH_VIBRATION_FWD_ARM_M: f64 = 17.5;
const HIGH_VIBRATION_AFT_ARM_M: f64 = 26.0;

/// 生成标准 56 货位布局,全部 AVAILABLE
pub fn build_standard_layout(limits: &AircraftLimits) -> Vec<Position> {
    let mut positions =
        Vec::with_capacity((LOWER_DECK_ROWS as usize + MAIN_DECK_ROWS as usize) * 2);

    // 1. 下货舱 12 排 × 2 列
    for row in 1..=LOWER_DECK_ROWS {
        let arm = LOWER_DECK_FIRST_ARM_M + LOWER_DECK_ROW_PITCH_M * f64::from(row - 1);
        for col in 1..=2u32 {
            let y = if col == 1 {
                -LOWER_DECK_Y_OFFSET_M
            } else {
                LOWER_DECK_Y_OFFSET_M
            };

            let mut supported_handling = vec!["orientation_critical".to_string()];
            if row <= LOWER_DECK_TEMP_CONTROLLED_ROWS {
                supported_handling.push("temperature_controlled".to_string());
            }

            positions.push(Position {
                id: format!("LD-{:02}-{:02}", row, col),
                deck_type: DeckType::LowerDeck,
                coordinates: Coordinates::new(arm, y, LOWER_DECK_Z_M),
                max_dimensions: LOWER_DECK_MAX_DIMS,
                max_weight_kg: LOWER_DECK_MAX_WEIGHT_KG,
                arm_m: arm,
                stack_limit_m: limits.lower_deck_stack_limit_m,
                supported_handling,
                high_vibration: arm < HIGH_VIBRATION_FWD_ARM_M || arm > HIGH_VIBRATION_AFT_ARM_M,
                state: PositionState::Available,
                occupant: None,
            });
        }
    }

    // 2. 主货舱 16 排 × 2 列
    for row in 1..=MAIN_DECK_ROWS {
        let arm = MAIN_DECK_FIRST_ARM_M + MAIN_DECK_ROW_PITCH_M * f64::from(row - 1);
        for col in 1..=2u32 {
            let y = if col == 1 {
                -MAIN_DECK_Y_OFFSET_M
            } else {
                MAIN_DECK_Y_OFFSET_M
            };

            positions.push(Position {
                id: format!("MD-{:02}-{:02}", row, col),
                deck_type: DeckType::MainDeck,
                coordinates: Coordinates::new(arm, y, MAIN_DECK_Z_M),
                max_dimensions: MAIN_DECK_MAX_DIMS,
                max_weight_kg: MAIN_DECK_MAX_WEIGHT_KG,
                arm_m: arm,
                stack_limit_m: limits.main_deck_stack_limit_m,
                supported_handling: vec![
                    "orientation_critical".to_string(),
                    "heavy_lift".to_string(),
                ],
                high_vibration: arm < HIGH_VIBRATION_FWD_ARM_M || arm > HIGH_VIBRATION_AFT_ARM_M,
                state: PositionState::Available,
                occupant: None,
            });
        }
    }

    positions
}
