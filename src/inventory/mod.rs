// ==========================================
// 宽体货机配载评估系统 - 库存层
// ==========================================
// 职责: 货位 arena 所有权与状态机,不含评分/平衡规则
// ==========================================

pub mod error;
pub mod layout;
pub mod position_inventory;

pub use error::{InventoryError, InventoryResult};
pub use layout::build_standard_layout;
pub use position_inventory::PositionInventory;
