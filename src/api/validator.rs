// ==========================================
// 宽体货机配载评估系统 - 请求校验
// ==========================================
// 职责: 入口处拦截畸形/物理不可能的请求数据
// 红线: 先校验后提交,校验失败的请求绝不触碰库存状态
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::cargo::{Cargo, CargoRequest};

/// 校验货物数据
///
/// 规则:
/// 1. id 非空(去除首尾空白后)
/// 2. 三维尺寸均为正且有限
/// 3. 重量为正且有限
pub fn validate_cargo(cargo: &Cargo) -> ApiResult<()> {
    if cargo.id.trim().is_empty() {
        return Err(ApiError::ValidationError("货物ID不能为空".to_string()));
    }

    let dims = &cargo.dimensions;
    for (name, value) in [
        ("length", dims.length),
        ("width", dims.width),
        ("height", dims.height),
    ] {
        if !value.is_finite() || value <= 0.0 {
            return Err(ApiError::ValidationError(format!(
                "货物{}尺寸非法: {}={}",
                cargo.id, name, value
            )));
        }
    }

    if !cargo.weight_kg.is_finite() || cargo.weight_kg <= 0.0 {
        return Err(ApiError::ValidationError(format!(
            "货物{}重量非法: weight_kg={}",
            cargo.id, cargo.weight_kg
        )));
    }

    Ok(())
}

/// 校验配载评估请求
pub fn validate_request(request: &CargoRequest) -> ApiResult<()> {
    validate_cargo(&request.cargo)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cargo::Dimensions;
    use crate::domain::types::{CargoType, Priority};

    fn create_valid_cargo() -> Cargo {
        Cargo {
            id: "C001".to_string(),
            dimensions: Dimensions::new(1.0, 1.0, 1.0),
            weight_kg: 500.0,
            stackable: true,
            tiltable: false,
            fragile: false,
            cargo_type: CargoType::General,
            special_handling: vec![],
        }
    }

    #[test]
    fn test_valid_cargo_passes() {
        assert!(validate_cargo(&create_valid_cargo()).is_ok());
    }

    #[test]
    fn test_empty_id_rejected() {
        let mut cargo = create_valid_cargo();
        cargo.id = "   ".to_string();
        assert!(matches!(
            validate_cargo(&cargo),
            Err(ApiError::ValidationError(_))
        ));
    }

    #[test]
    fn test_non_positive_dimensions_rejected() {
        let mut cargo = create_valid_cargo();
        cargo.dimensions = Dimensions::new(0.0, 1.0, 1.0);
        assert!(matches!(
            validate_cargo(&cargo),
            Err(ApiError::ValidationError(_))
        ));

        let mut cargo = create_valid_cargo();
        cargo.dimensions = Dimensions::new(1.0, -2.0, 1.0);
        assert!(validate_cargo(&cargo).is_err());
    }

    #[test]
    fn test_non_finite_values_rejected() {
        let mut cargo = create_valid_cargo();
        cargo.dimensions = Dimensions::new(f64::NAN, 1.0, 1.0);
        assert!(validate_cargo(&cargo).is_err());

        let mut cargo = create_valid_cargo();
        cargo.weight_kg = f64::INFINITY;
        assert!(validate_cargo(&cargo).is_err());
    }

    #[test]
    fn test_non_positive_weight_rejected() {
        let mut cargo = create_valid_cargo();
        cargo.weight_kg = 0.0;
        assert!(validate_cargo(&cargo).is_err());

        cargo.weight_kg = -10.0;
        assert!(validate_cargo(&cargo).is_err());
    }

    #[test]
    fn test_validate_request_delegates_to_cargo() {
        let request = CargoRequest {
            cargo: create_valid_cargo(),
            preferred_deck: None,
            priority: Priority::Normal,
            requested_by: "ops".to_string(),
        };
        assert!(validate_request(&request).is_ok());
    }
}
