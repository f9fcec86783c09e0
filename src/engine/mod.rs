// ==========================================
// 宽体货机配载评估系统 - 引擎层
// ==========================================
// 职责: 实现配载业务规则,不直接修改库存状态机
// 红线: 所有规则必须输出 reason; 评分与推演只读快照
// ==========================================

pub mod assessment;
pub mod fit;
pub mod fit_core;
pub mod monitor;
pub mod weight_balance;

// 重导出核心引擎
pub use assessment::{
    AssessmentCoordinator, AssessmentResult, CategoryCheck, ConstraintCategories,
    ConstraintValidation, ViolationAction, ViolationHandling,
};
pub use fit::SpatialFitScorer;
pub use fit_core::{FitCore, HardConstraintCheck};
pub use monitor::CapacityAlertMonitor;
pub use weight_balance::{WeightBalanceEngine, WeightViolationResult};
