// ==========================================
// 宽体货机配载评估系统 - 领域层
// ==========================================
// 职责: 实体与类型定义,不含业务规则
// ==========================================

pub mod cargo;
pub mod metrics;
pub mod position;
pub mod types;

// 重导出常用实体
pub use cargo::{Cargo, CargoRequest, Dimensions};
pub use metrics::{
    Alert, AlertSummary, CapacityForecast, LoadBalanceAnalysis, OptimizationOpportunity,
    SeverityCounts, UtilizationMetrics, WeightBalanceImpact, WeightBalanceStatus,
};
pub use position::{Coordinates, Position, PositionCapacity, PositionRecommendation};
pub use types::{
    AlertSeverity, AlertType, CargoType, DeckType, PositionState, Priority, WeightStatus,
};
