// ==========================================
// 宽体货机配载评估系统 - 货位领域模型
// ==========================================
// 红线: 货位记录由 PositionInventory 独占持有(arena 所有权),
//       调用方只通过访问器方法拿到克隆,不跨调用持有可变引用
// ==========================================

use crate::domain::cargo::{Cargo, Dimensions};
use crate::domain::types::{DeckType, PositionState};
use serde::{Deserialize, Serialize};

// ==========================================
// Coordinates - 货位坐标
// ==========================================
// x: 距基准面纵向力臂 (m),载重平衡的安全相关维度
// y: 横向偏移 (m); z: 垂直高度 (m)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Coordinates {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

// ==========================================
// Position - 载货位
// ==========================================
// 编号规则: {舱位前缀}-{排:02}-{列:02},例如 LD-03-01 / MD-08-02
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Position {
    // ===== 主键 =====
    pub id: String, // 货位唯一标识(编码 舱+排+列)

    // ===== 物理属性 =====
    pub deck_type: DeckType,       // 所属货舱
    pub coordinates: Coordinates,  // 货位坐标
    pub max_dimensions: Dimensions, // 单层可容纳的最大外形尺寸
    pub max_weight_kg: f64,        // 最大承重 (kg)
    pub arm_m: f64,                // 重心力臂 (m),通常等于 coordinates.x
    pub stack_limit_m: f64,        // 所属货舱的堆叠高度上限 (m)

    // ===== 适配属性 =====
    pub supported_handling: Vec<String>, // 支持的特殊处理标签
    pub high_vibration: bool,            // 高振动区(易碎货物降分)

    // ===== 占用状态 =====
    pub state: PositionState,   // 占用状态
    pub occupant: Option<Cargo>, // 占用货物(不变式: 非空 ⇔ state ∈ {RESERVED, OCCUPIED})
}

impl Position {
    /// 可用容积 (m³),按单层最大外形尺寸计算
    pub fn usable_volume(&self) -> f64 {
        self.max_dimensions.volume()
    }

    /// 是否支持指定特殊处理标签
    pub fn supports_handling(&self, tag: &str) -> bool {
        self.supported_handling.iter().any(|t| t == tag)
    }

    /// 占用不变式检查: occupant 非空 当且仅当 state ∈ {RESERVED, OCCUPIED}
    pub fn occupancy_consistent(&self) -> bool {
        match self.state {
            PositionState::Available => self.occupant.is_none(),
            PositionState::Reserved | PositionState::Occupied => self.occupant.is_some(),
        }
    }
}

// ==========================================
// Trait: PositionCapacity
// ==========================================
// 用途: 评分引擎/平衡引擎的承重约束检查接口
pub trait PositionCapacity {
    /// 检查是否可承载指定重量
    fn can_hold_weight(&self, weight_kg: f64) -> bool;

    /// 剩余承重 (kg)
    fn remaining_weight_kg(&self) -> f64;

    /// 承重余量比例 (0.0 - 1.0),相对于 max_weight_kg
    fn weight_margin_ratio(&self, weight_kg: f64) -> f64;
}

impl PositionCapacity for Position {
    fn can_hold_weight(&self, weight_kg: f64) -> bool {
        weight_kg <= self.max_weight_kg
    }

    fn remaining_weight_kg(&self) -> f64 {
        let occupied = self.occupant.as_ref().map(|c| c.weight_kg).unwrap_or(0.0);
        (self.max_weight_kg - occupied).max(0.0)
    }

    fn weight_margin_ratio(&self, weight_kg: f64) -> f64 {
        if self.max_weight_kg <= 0.0 {
            return 0.0;
        }
        (1.0 - weight_kg / self.max_weight_kg).clamp(0.0, 1.0)
    }
}

// ==========================================
// PositionRecommendation - 货位推荐
// ==========================================
// reasoning: 有序的评分解释(所有规则必须输出 reason)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionRecommendation {
    pub position: Position,            // 推荐货位(快照克隆)
    pub fit_score: f64,                // 适配评分 [0.0, 1.0]
    pub reasoning: Vec<String>,        // 评分解释(有序)
    pub constraints_satisfied: bool,   // 硬约束是否全部满足
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::CargoType;

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

    fn create_test_cargo() -> Cargo {
        Cargo {
            id: "C001".to_string(),
            dimensions: Dimensions::new(1.0, 1.0, 0.8),
            weight_kg: 400.0,
            stackable: true,
            tiltable: false,
            fragile: false,
            cargo_type: CargoType::General,
            special_handling: vec![],
        }
    }

    #[test]
    fn test_weight_margin_ratio() {
        let position = create_test_position();
        assert!((position.weight_margin_ratio(1500.0) - 0.0).abs() < 1e-9);
        assert!((position.weight_margin_ratio(750.0) - 0.5).abs() < 1e-9);
        assert!((position.weight_margin_ratio(0.0) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_remaining_weight() {
        let mut position = create_test_position();
        assert_eq!(position.remaining_weight_kg(), 1500.0);

        position.state = PositionState::Occupied;
        position.occupant = Some(create_test_cargo());
        assert_eq!(position.remaining_weight_kg(), 1100.0); // 1500 - 400
    }

    #[test]
    fn test_occupancy_consistent() {
        let mut position = create_test_position();
        assert!(position.occupancy_consistent()); // AVAILABLE + None

        position.state = PositionState::Occupied;
        assert!(!position.occupancy_consistent()); // OCCUPIED + None 违反不变式

        position.occupant = Some(create_test_cargo());
        assert!(position.occupancy_consistent()); // OCCUPIED + Some
    }

    #[test]
    fn test_supports_handling() {
        let position = create_test_position();
        assert!(position.supports_handling("orientation_critical"));
        assert!(!position.supports_handling("heavy_lift"));
    }
}
