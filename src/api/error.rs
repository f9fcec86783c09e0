// ==========================================
// 宽体货机配载评估系统 - API层错误类型
// ==========================================
// 职责: 定义对外错误分类,转换库存层错误为业务错误
// 红线: 所有错误信息必须包含显式原因(可解释性)
// ==========================================

use crate::inventory::error::InventoryError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 请求校验错误
    // ==========================================
    /// 请求数据畸形或物理上不可能(零/负尺寸、非正重量)
    #[error("请求校验失败: {0}")]
    ValidationError(String),

    // ==========================================
    // 配载业务错误
    // ==========================================
    /// 货物在理论上不可能装入任何货位
    #[error("超出装载能力: {0}")]
    CapacityExceeded(String),

    /// 货位状态转换冲突(并发竞争或重复操作)
    #[error("货位预订冲突: {0}")]
    ReservationConflict(String),

    /// 装载将突破重心包线或最大业载
    #[error("载重平衡违反: {0}")]
    WeightBalanceViolation(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ==========================================
// 从 InventoryError 转换
// 目的: 将库存层的状态机错误转换为对外的业务错误
// ==========================================
impl From<InventoryError> for ApiError {
    fn from(err: InventoryError) -> Self {
        match err {
            InventoryError::NotFound { position_id } => {
                ApiError::NotFound(format!("货位(id={})不存在", position_id))
            }
            InventoryError::AlreadyOccupied { position_id, state } => {
                ApiError::ReservationConflict(format!(
                    "货位{}当前状态为{},无法预订",
                    position_id, state
                ))
            }
            InventoryError::OccupantMismatch {
                position_id,
                occupant_id,
                requested_id,
            } => ApiError::ReservationConflict(format!(
                "货位{}已绑定货物{},请求货物{}被拒绝",
                position_id, occupant_id, requested_id
            )),
            InventoryError::InvalidTransition {
                position_id,
                from,
                to,
            } => ApiError::ReservationConflict(format!(
                "货位{}不允许状态转换 {} → {}",
                position_id, from, to
            )),
            InventoryError::AlreadyAvailable { position_id } => {
                ApiError::ReservationConflict(format!("货位{}本就空闲", position_id))
            }
            InventoryError::LockError(msg) => ApiError::InternalError(msg),
            InventoryError::Other(err) => ApiError::Other(err),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

// ==========================================
// 安全约束校验辅助函数
// ==========================================

/// 校验载重平衡限制
///
/// 参数:
/// - cg_m: 装载后纵向重心 (m)
/// - envelope_min_m / envelope_max_m: 重心包线(闭区间)
/// - total_weight_kg: 装载后总重
/// - max_total_weight_kg: 全机最大业载
///
/// 返回:
/// - Ok(()) 如果重心与总重均在认证范围内
/// - Err(ApiError::WeightBalanceViolation) 如果任一越限
pub fn validate_balance_limits(
    cg_m: f64,
    envelope_min_m: f64,
    envelope_max_m: f64,
    total_weight_kg: f64,
    max_total_weight_kg: f64,
) -> ApiResult<()> {
    if cg_m < envelope_min_m || cg_m > envelope_max_m {
        return Err(ApiError::WeightBalanceViolation(format!(
            "重心 {:.2}m 超出包线 [{:.1}, {:.1}]",
            cg_m, envelope_min_m, envelope_max_m
        )));
    }
    if total_weight_kg > max_total_weight_kg {
        return Err(ApiError::WeightBalanceViolation(format!(
            "总重 {:.0}kg 超过最大业载 {:.0}kg",
            total_weight_kg, max_total_weight_kg
        )));
    }
    Ok(())
}

/// 校验理论可装载性(是否存在能容纳该货物的货位)
///
/// 参数:
/// - cargo_id: 货物ID
/// - feasible_position_count: 尺寸/承重上可容纳该货物的货位数量
///
/// 返回:
/// - Ok(()) 如果至少一个货位理论可容纳
/// - Err(ApiError::CapacityExceeded) 如果没有
pub fn validate_loadability(cargo_id: &str, feasible_position_count: usize) -> ApiResult<()> {
    if feasible_position_count > 0 {
        Ok(())
    } else {
        Err(ApiError::CapacityExceeded(format!(
            "货物{}超出所有货位的装载包线",
            cargo_id
        )))
    }
}
