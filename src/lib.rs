// ==========================================
// 宽体货机配载评估系统 - 核心库
// ==========================================
// 系统定位: 决策支持引擎 (人工最终控制权)
// 边界: 不含部署/HTTP/持久化/可视化,对外只暴露结构化记录
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 库存层 - 货位 arena 与状态机
pub mod inventory;

// 引擎层 - 业务规则
pub mod engine;

// 配置层 - 引擎配置
pub mod config;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{
    AlertSeverity, AlertType, CargoType, DeckType, PositionState, Priority, WeightStatus,
};

// 领域实体
pub use domain::{
    Alert, AlertSummary, CapacityForecast, Cargo, CargoRequest, Coordinates, Dimensions,
    LoadBalanceAnalysis, OptimizationOpportunity, Position, PositionRecommendation,
    UtilizationMetrics, WeightBalanceImpact, WeightBalanceStatus,
};

// 库存
pub use inventory::{InventoryError, PositionInventory};

// 引擎
pub use engine::{
    AssessmentCoordinator, AssessmentResult, CapacityAlertMonitor, SpatialFitScorer,
    WeightBalanceEngine,
};

// 配置
pub use config::{AircraftLimits, AlertThresholds, EngineConfig, ScoringWeights};

// API
pub use api::{ApiError, ApiResult, AssessmentApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "宽体货机配载评估系统";

// ==========================================
// 预编译检查
// ==========================================

// 确保编译时所有模块可见
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
