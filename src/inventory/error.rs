// ==========================================
// 宽体货机配载评估系统 - 库存层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 红线: 状态机转换失败必须返回类型化错误,不允许静默重试
// ==========================================

use crate::domain::types::PositionState;
use thiserror::Error;

/// 货位库存层错误类型
#[derive(Error, Debug)]
pub enum InventoryError {
    // ===== 查找错误 =====
    #[error("货位未找到: position_id={position_id}")]
    NotFound { position_id: String },

    // ===== 预订/占用冲突 =====
    #[error("货位已被占用: position_id={position_id}, state={state}")]
    AlreadyOccupied {
        position_id: String,
        state: PositionState,
    },

    #[error("货位占用者不匹配: position_id={position_id}, occupant={occupant_id}, requested={requested_id}")]
    OccupantMismatch {
        position_id: String,
        occupant_id: String,
        requested_id: String,
    },

    // ===== 状态机错误 =====
    #[error("无效的状态转换: position_id={position_id}, from={from} to={to}")]
    InvalidTransition {
        position_id: String,
        from: PositionState,
        to: PositionState,
    },

    /// release 在 AVAILABLE 货位上的定义结果(API 层按幂等 no-op 处理)
    #[error("货位已空闲: position_id={position_id}")]
    AlreadyAvailable { position_id: String },

    // ===== 并发控制错误 =====
    #[error("库存锁获取失败: {0}")]
    LockError(String),

    // ===== 通用错误 =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result 类型别名
pub type InventoryResult<T> = Result<T, InventoryError>;
