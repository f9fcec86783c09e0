// ==========================================
// 宽体货机配载评估系统 - 领域类型定义
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 货舱类型 (Deck Type)
// ==========================================
// 两个物理隔离的货舱: 下货舱(LOWER_DECK) / 主货舱(MAIN_DECK)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeckType {
    LowerDeck, // 下货舱
    MainDeck,  // 主货舱
}

impl fmt::Display for DeckType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeckType::LowerDeck => write!(f, "LOWER_DECK"),
            DeckType::MainDeck => write!(f, "MAIN_DECK"),
        }
    }
}

impl DeckType {
    /// 从字符串解析货舱类型
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "LOWER_DECK" => Some(DeckType::LowerDeck),
            "MAIN_DECK" => Some(DeckType::MainDeck),
            _ => None,
        }
    }
}

// ==========================================
// 货位占用状态 (Position State)
// ==========================================
// 状态机: AVAILABLE → RESERVED → OCCUPIED → AVAILABLE
// 允许 AVAILABLE → OCCUPIED 直接占用; 禁止 OCCUPIED → RESERVED
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PositionState {
    Available, // 空闲
    Reserved,  // 已预订(软占用)
    Occupied,  // 已占用(实装)
}

impl fmt::Display for PositionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PositionState::Available => write!(f, "AVAILABLE"),
            PositionState::Reserved => write!(f, "RESERVED"),
            PositionState::Occupied => write!(f, "OCCUPIED"),
        }
    }
}

// ==========================================
// 货物类型 (Cargo Type)
// ==========================================
// 封闭枚举,评分调整系数见 engine/fit.rs 的映射表
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CargoType {
    Electronics,     // 电子产品
    Textiles,        // 纺织品
    Machinery,       // 机械设备
    AutomotiveParts, // 汽车零部件
    Perishable,      // 易腐货物
    General,         // 普通货物
}

impl fmt::Display for CargoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CargoType::Electronics => write!(f, "electronics"),
            CargoType::Textiles => write!(f, "textiles"),
            CargoType::Machinery => write!(f, "machinery"),
            CargoType::AutomotiveParts => write!(f, "automotive_parts"),
            CargoType::Perishable => write!(f, "perishable"),
            CargoType::General => write!(f, "general"),
        }
    }
}

impl CargoType {
    /// 从字符串解析货物类型
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "electronics" => CargoType::Electronics,
            "textiles" => CargoType::Textiles,
            "machinery" => CargoType::Machinery,
            "automotive_parts" => CargoType::AutomotiveParts,
            "perishable" => CargoType::Perishable,
            _ => CargoType::General, // 默认值
        }
    }
}

// ==========================================
// 请求优先级 (Priority)
// ==========================================
// 等级制,不是评分制; 仅影响审计与日志,不改变硬约束
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Low,    // 低
    Normal, // 正常
    High,   // 高
    Urgent, // 紧急
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::Low => write!(f, "LOW"),
            Priority::Normal => write!(f, "NORMAL"),
            Priority::High => write!(f, "HIGH"),
            Priority::Urgent => write!(f, "URGENT"),
        }
    }
}

// ==========================================
// 告警等级 (Alert Severity)
// ==========================================
// 顺序: Low < Medium < High < Critical
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertSeverity {
    Low,      // 低
    Medium,   // 中
    High,     // 高
    Critical, // 危急
}

impl fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertSeverity::Low => write!(f, "LOW"),
            AlertSeverity::Medium => write!(f, "MEDIUM"),
            AlertSeverity::High => write!(f, "HIGH"),
            AlertSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

// ==========================================
// 告警类型 (Alert Type)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertType {
    Capacity,            // 容量告警
    WeightBalance,       // 载重平衡告警
    ConstraintViolation, // 约束违反告警
    Optimization,        // 优化建议
}

impl fmt::Display for AlertType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertType::Capacity => write!(f, "CAPACITY"),
            AlertType::WeightBalance => write!(f, "WEIGHT_BALANCE"),
            AlertType::ConstraintViolation => write!(f, "CONSTRAINT_VIOLATION"),
            AlertType::Optimization => write!(f, "OPTIMIZATION"),
        }
    }
}

// ==========================================
// 载重状态 (Weight Status)
// ==========================================
// 序列化为小写,与对外接口约定一致
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightStatus {
    Normal,   // 正常
    Caution,  // 关注
    Critical, // 危急
}

impl fmt::Display for WeightStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeightStatus::Normal => write!(f, "normal"),
            WeightStatus::Caution => write!(f, "caution"),
            WeightStatus::Critical => write!(f, "critical"),
        }
    }
}
