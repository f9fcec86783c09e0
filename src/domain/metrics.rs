// ==========================================
// 宽体货机配载评估系统 - 指标与告警模型
// ==========================================
// 用途: 容量监控/载重平衡的只读快照对象
// ==========================================

use crate::domain::position::Coordinates;
use crate::domain::types::{AlertSeverity, AlertType, WeightStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// UtilizationMetrics - 容量利用率指标
// ==========================================
// 百分比口径: 货位数占比; weight_utilization 以全机最大业载为分母
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UtilizationMetrics {
    pub total_utilization: f64,      // 总利用率 (%)
    pub lower_deck_utilization: f64, // 下货舱利用率 (%)
    pub main_deck_utilization: f64,  // 主货舱利用率 (%)
    pub weight_utilization: f64,     // 载重利用率 (%)
    pub available_positions: usize,  // 空闲货位数
    pub reserved_positions: usize,   // 预订货位数
    pub occupied_positions: usize,   // 占用货位数
    pub total_positions: usize,      // 货位总数
}

// ==========================================
// WeightBalanceImpact - 载重平衡影响
// ==========================================
// 不改变库存状态的"假如装载"推演结果; x 维是安全相关维度
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightBalanceImpact {
    pub current_cg: Coordinates,     // 当前重心
    pub new_cg: Coordinates,         // 装载后重心
    pub cg_shift_m: f64,             // 纵向重心偏移 (new_cg.x - current_cg.x)
    pub new_total_weight_kg: f64,    // 装载后总重 (kg)
    pub within_limits: bool,         // 是否同时满足重心包线与最大业载
}

// ==========================================
// WeightBalanceStatus - 载重平衡状态
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightBalanceStatus {
    pub current_weight_kg: f64, // 当前总重 (kg)
    pub current_cg_m: f64,      // 当前纵向重心 (m)
    pub weight_margin_kg: f64,  // 业载余量 (max_total_weight - current_weight)
    pub status: WeightStatus,   // normal / caution / critical
    pub status_reason: String,  // 分级原因 (JSON 格式,可解释性)
}

// ==========================================
// Alert - 告警
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub alert_id: String,               // 告警 ID (UUID)
    pub severity: AlertSeverity,        // 告警等级
    pub alert_type: AlertType,          // 告警类型
    pub message: String,                // 告警消息
    pub suggested_actions: Vec<String>, // 建议措施
    pub created_at: DateTime<Utc>,      // 产生时间
}

impl Alert {
    /// 构造函数(自动生成 ID 与时间戳)
    pub fn new(
        severity: AlertSeverity,
        alert_type: AlertType,
        message: impl Into<String>,
        suggested_actions: Vec<String>,
    ) -> Self {
        Self {
            alert_id: uuid::Uuid::new_v4().to_string(),
            severity,
            alert_type,
            message: message.into(),
            suggested_actions,
            created_at: Utc::now(),
        }
    }
}

// ==========================================
// AlertSummary - 告警汇总
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertSummary {
    pub total_active_alerts: usize,    // 活跃告警总数
    pub by_severity: SeverityCounts,   // 分级计数
}

/// 告警分级计数
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeverityCounts {
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

// ==========================================
// LoadBalanceAnalysis - 配载均衡分析
// ==========================================
// balance_score: 0-100,对舱间利用率偏差与前后重量偏差扣分
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadBalanceAnalysis {
    pub balance_score: f64,           // 均衡评分 (0-100)
    pub is_balanced: bool,            // 是否达到均衡阈值
    pub deck_deviation_pct: f64,      // 舱间利用率偏差 (百分点)
    pub forward_aft_deviation_pct: f64, // 前后重量分布偏差 (%)
}

// ==========================================
// OptimizationOpportunity - 优化建议
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationOpportunity {
    #[serde(rename = "type")]
    pub opportunity_type: String, // 建议类型(编码)
    pub recommendation: String,   // 建议内容
}

// ==========================================
// CapacityForecast - 容量趋势预测
// ==========================================
// 线性外推; 无历史样本时 forecast = 当前利用率
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapacityForecast {
    pub hours_ahead: f64,           // 预测时长 (小时)
    pub current_utilization: f64,   // 当前利用率 (%)
    pub forecast_utilization: f64,  // 预测利用率 (%)
    pub will_exceed_capacity: bool, // 是否将触及容量上限
    pub recommendation: String,     // 趋势建议
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_new_generates_id_and_timestamp() {
        let alert = Alert::new(
            AlertSeverity::High,
            AlertType::Capacity,
            "容量紧张",
            vec!["暂缓接收新货物".to_string()],
        );
        assert!(!alert.alert_id.is_empty());
        assert_eq!(alert.severity, AlertSeverity::High);
        assert_eq!(alert.alert_type, AlertType::Capacity);
        assert_eq!(alert.suggested_actions.len(), 1);
    }

    #[test]
    fn test_opportunity_type_serde_rename() {
        let opp = OptimizationOpportunity {
            opportunity_type: "consolidation".to_string(),
            recommendation: "合并小件货物".to_string(),
        };
        let json = serde_json::to_string(&opp).unwrap();
        assert!(json.contains("\"type\":\"consolidation\""));
    }
}
