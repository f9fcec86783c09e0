// ==========================================
// 宽体货机配载评估系统 - 货物领域模型
// ==========================================
// 生命周期: 每次请求创建,响应产生后丢弃,引擎内不持久化
// ==========================================

use crate::domain::types::{CargoType, DeckType, Priority};
use serde::{Deserialize, Serialize};

// ==========================================
// Dimensions - 三维尺寸
// ==========================================
// 单位: 米,均为正数(由 api/validator.rs 校验)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub length: f64, // 长 (m)
    pub width: f64,  // 宽 (m)
    pub height: f64, // 高 (m)
}

impl Dimensions {
    /// 构造函数
    pub fn new(length: f64, width: f64, height: f64) -> Self {
        Self {
            length,
            width,
            height,
        }
    }

    /// 体积 (m³)
    pub fn volume(&self) -> f64 {
        self.length * self.width * self.height
    }

    /// 按长宽高逐轴比较: 每一维都不超过 other 才算放得下
    pub fn fits_within(&self, other: &Dimensions) -> bool {
        self.length <= other.length && self.width <= other.width && self.height <= other.height
    }
}

// ==========================================
// Cargo - 货物
// ==========================================
// 红线: 创建后不可变,引擎层只读
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cargo {
    // ===== 主键 =====
    pub id: String, // 货物唯一标识

    // ===== 物理属性 =====
    pub dimensions: Dimensions, // 外形尺寸
    pub weight_kg: f64,         // 重量 (kg, >0)

    // ===== 装载属性 =====
    pub stackable: bool, // 可堆叠
    pub tiltable: bool,  // 可翻转(允许任意轴向摆放)
    pub fragile: bool,   // 易碎

    // ===== 分类 =====
    pub cargo_type: CargoType, // 货物类型

    // ===== 特殊处理标签 =====
    // 例如 "orientation_critical" / "heavy_lift" / "temperature_controlled"
    #[serde(default)]
    pub special_handling: Vec<String>,
}

impl Cargo {
    /// 体积 (m³)
    pub fn volume(&self) -> f64 {
        self.dimensions.volume()
    }

    /// 密度 (kg/m³); 体积为 0 时返回 0,避免除零
    pub fn density(&self) -> f64 {
        let volume = self.volume();
        if volume > 0.0 {
            self.weight_kg / volume
        } else {
            0.0
        }
    }

    /// 是否要求指定特殊处理标签
    pub fn requires_handling(&self, tag: &str) -> bool {
        self.special_handling.iter().any(|t| t == tag)
    }
}

// ==========================================
// CargoRequest - 配载评估请求
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CargoRequest {
    pub cargo: Cargo,                     // 待评估货物(请求持有所有权)
    pub preferred_deck: Option<DeckType>, // 期望货舱(无偏好时为 None)
    pub priority: Priority,               // 请求优先级
    pub requested_by: String,             // 请求方标识(仅审计用)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_cargo() -> Cargo {
        Cargo {
            id: "TEST001".to_string(),
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
    fn test_dimensions_volume() {
        let dims = Dimensions::new(1.5, 1.2, 0.8);
        assert!((dims.volume() - 1.44).abs() < 1e-9);
    }

    #[test]
    fn test_dimensions_fits_within() {
        let cargo_dims = Dimensions::new(1.5, 1.2, 0.8);
        let envelope = Dimensions::new(1.8, 1.6, 1.7);
        assert!(cargo_dims.fits_within(&envelope));
        assert!(!envelope.fits_within(&cargo_dims));
    }

    #[test]
    fn test_cargo_density() {
        let cargo = create_test_cargo();
        // 500 / 1.44 ≈ 347.2 kg/m³
        assert!((cargo.density() - 347.222).abs() < 0.01);
    }

    #[test]
    fn test_cargo_density_zero_volume() {
        let mut cargo = create_test_cargo();
        cargo.dimensions = Dimensions::new(0.0, 1.0, 1.0);
        assert_eq!(cargo.density(), 0.0); // 不崩溃
    }

    #[test]
    fn test_requires_handling() {
        let mut cargo = create_test_cargo();
        cargo.special_handling = vec!["orientation_critical".to_string()];
        assert!(cargo.requires_handling("orientation_critical"));
        assert!(!cargo.requires_handling("heavy_lift"));
    }
}
