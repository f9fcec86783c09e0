// ==========================================
// 宽体货机配载评估系统 - 配置层
// ==========================================
// 职责: 引擎配置对象(构造时传入,带文档化默认值)
// ==========================================

pub mod engine_config;

pub use engine_config::{
    AircraftLimits, AlertThresholds, EngineConfig, ScoringWeights, TOTAL_POSITIONS,
};
