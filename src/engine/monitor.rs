// ==========================================
// 宽体货机配载评估系统 - 容量与告警监控
// ==========================================
// 职责: 分级容量告警、载重平衡告警、均衡分析、优化建议、趋势预测
// 输入: 库存导出的利用率指标/货位快照,监控自身不触碰状态机
// 告警保留: 按类型整组替换,始终反映"当前活跃"集合
// ==========================================

use crate::config::engine_config::{AircraftLimits, AlertThresholds};
use crate::domain::metrics::{
    Alert, AlertSummary, CapacityForecast, LoadBalanceAnalysis, OptimizationOpportunity,
    SeverityCounts, UtilizationMetrics, WeightBalanceStatus,
};
use crate::domain::position::Position;
use crate::domain::types::{AlertSeverity, AlertType, DeckType, PositionState, WeightStatus};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{info, warn};

// 占用货位装填率低于此值视为"未充分利用"
const UNDER_FILLED_VOLUME_RATIO: f64 = 0.3;
// 触发合并建议的未充分利用货位数量
const UNDER_FILLED_COUNT_TRIGGER: usize = 3;
// 前/后重量占比超过此值视为纵向失衡
const FORWARD_AFT_SHARE_TRIGGER: f64 = 65.0;
// 舱间利用率偏差超过此值(百分点)触发调舱建议
const DECK_DEVIATION_TRIGGER_PP: f64 = 30.0;

// ==========================================
// CapacityAlertMonitor - 容量与告警监控
// ==========================================
pub struct CapacityAlertMonitor {
    thresholds: AlertThresholds,
    limits: AircraftLimits,
    // 活跃告警,按告警类型整组替换
    active_alerts: Mutex<HashMap<AlertType, Vec<Alert>>>,
    // 利用率历史样本 (时间戳, 利用率%),用于趋势外推
    history: Mutex<Vec<(DateTime<Utc>, f64)>>,
}

impl CapacityAlertMonitor {
    /// 构造函数
    pub fn new(thresholds: AlertThresholds, limits: AircraftLimits) -> Self {
        Self {
            thresholds,
            limits,
            active_alerts: Mutex::new(HashMap::new()),
            history: Mutex::new(Vec::new()),
        }
    }

    // ==========================================
    // 容量告警 (分级阶梯)
    // ==========================================

    /// 容量监控
    ///
    /// 规则 (可解释):
    /// - CRITICAL: 总利用率 ≥ capacity_critical_pct 或 载重利用率 ≥ weight_critical_pct
    /// - HIGH:     总利用率 ≥ capacity_high_pct
    /// - MEDIUM:   总利用率 ≥ capacity_medium_pct
    /// - 低于 MEDIUM 阈值不产生告警
    pub fn monitor_capacity(&self, metrics: &UtilizationMetrics) -> Vec<Alert> {
        let mut alerts = Vec::new();

        // 载重利用率单独判定(与货位占用率独立超限)
        if metrics.weight_utilization >= self.thresholds.weight_critical_pct {
            alerts.push(Alert::new(
                AlertSeverity::Critical,
                AlertType::Capacity,
                format!(
                    "载重危急: 载重利用率 {:.1}% ≥ {:.0}%",
                    metrics.weight_utilization, self.thresholds.weight_critical_pct
                ),
                vec![
                    "停止接收新货物".to_string(),
                    "复核已装载货物重量清单".to_string(),
                ],
            ));
        }

        // 货位占用率阶梯,取最高档
        if metrics.total_utilization >= self.thresholds.capacity_critical_pct {
            alerts.push(Alert::new(
                AlertSeverity::Critical,
                AlertType::Capacity,
                format!(
                    "容量危急: 总利用率 {:.1}% ≥ {:.0}%",
                    metrics.total_utilization, self.thresholds.capacity_critical_pct
                ),
                vec![
                    "暂停接收新货物".to_string(),
                    "优先安排卸载窗口".to_string(),
                ],
            ));
        } else if metrics.total_utilization >= self.thresholds.capacity_high_pct {
            alerts.push(Alert::new(
                AlertSeverity::High,
                AlertType::Capacity,
                format!(
                    "容量紧张: 总利用率 {:.1}% ≥ {:.0}%",
                    metrics.total_utilization, self.thresholds.capacity_high_pct
                ),
                vec![
                    "仅接收高优先级货物".to_string(),
                    "评估剩余货位的尺寸分布".to_string(),
                ],
            ));
        } else if metrics.total_utilization >= self.thresholds.capacity_medium_pct {
            alerts.push(Alert::new(
                AlertSeverity::Medium,
                AlertType::Capacity,
                format!(
                    "容量关注: 总利用率 {:.1}% ≥ {:.0}%",
                    metrics.total_utilization, self.thresholds.capacity_medium_pct
                ),
                vec!["关注后续装载计划排队深度".to_string()],
            ));
        }

        if !alerts.is_empty() {
            warn!(
                total_utilization = metrics.total_utilization,
                weight_utilization = metrics.weight_utilization,
                alert_count = alerts.len(),
                "容量告警触发"
            );
        }

        self.retain_alerts(AlertType::Capacity, alerts.clone());
        alerts
    }

    // ==========================================
    // 载重平衡告警
    // ==========================================

    /// 将载重平衡状态映射为告警
    pub fn generate_weight_balance_alerts(&self, status: &WeightBalanceStatus) -> Vec<Alert> {
        let alerts = match status.status {
            WeightStatus::Critical => vec![Alert::new(
                AlertSeverity::Critical,
                AlertType::WeightBalance,
                format!(
                    "载重平衡危急: 当前重心 {:.2}m, 业载余量 {:.0}kg",
                    status.current_cg_m, status.weight_margin_kg
                ),
                vec![
                    "向尾部货位重新分配载荷".to_string(),
                    "立即复核重心包线余量".to_string(),
                    "暂停后续装载直至重心恢复".to_string(),
                ],
            )],
            WeightStatus::Caution => vec![Alert::new(
                AlertSeverity::High,
                AlertType::WeightBalance,
                format!(
                    "载重平衡关注: 当前重心 {:.2}m, 业载余量 {:.0}kg",
                    status.current_cg_m, status.weight_margin_kg
                ),
                vec![
                    "后续装载优先选择反向力臂货位".to_string(),
                    "跟踪重心随装载的移动趋势".to_string(),
                ],
            )],
            WeightStatus::Normal => Vec::new(),
        };

        self.retain_alerts(AlertType::WeightBalance, alerts.clone());
        alerts
    }

    /// 记录约束违反类告警(由评估协调器产生)
    pub fn record_constraint_alerts(&self, alerts: Vec<Alert>) {
        self.retain_alerts(AlertType::ConstraintViolation, alerts);
    }

    // ==========================================
    // 均衡分析
    // ==========================================

    /// 配载均衡分析
    ///
    /// balance_score = 100 − 0.5·舱间利用率偏差(百分点) − 0.5·前后重量偏差(%)
    pub fn get_load_balance_analysis(&self, positions: &[Position]) -> LoadBalanceAnalysis {
        let deck_deviation = Self::deck_utilization_deviation(positions);
        let forward_aft_deviation = self.forward_aft_weight_deviation(positions);

        let balance_score =
            (100.0 - 0.5 * deck_deviation - 0.5 * forward_aft_deviation).clamp(0.0, 100.0);

        LoadBalanceAnalysis {
            balance_score,
            is_balanced: balance_score >= self.thresholds.balance_score_threshold,
            deck_deviation_pct: deck_deviation,
            forward_aft_deviation_pct: forward_aft_deviation,
        }
    }

    /// 舱间利用率偏差(百分点)
    fn deck_utilization_deviation(positions: &[Position]) -> f64 {
        let mut lower_total = 0usize;
        let mut lower_occupied = 0usize;
        let mut main_total = 0usize;
        let mut main_occupied = 0usize;

        for position in positions {
            let occupied = position.state == PositionState::Occupied;
            match position.deck_type {
                DeckType::LowerDeck => {
                    lower_total += 1;
                    if occupied {
                        lower_occupied += 1;
                    }
                }
                DeckType::MainDeck => {
                    main_total += 1;
                    if occupied {
                        main_occupied += 1;
                    }
                }
            }
        }

        let lower_pct = ratio_pct(lower_occupied, lower_total);
        let main_pct = ratio_pct(main_occupied, main_total);
        (lower_pct - main_pct).abs()
    }

    /// 前后重量分布偏差 (%): |前部占比 − 后部占比|
    fn forward_aft_weight_deviation(&self, positions: &[Position]) -> f64 {
        let midpoint = (self.limits.cg_envelope_min_m + self.limits.cg_envelope_max_m) / 2.0;
        let mut forward_weight = 0.0f64;
        let mut aft_weight = 0.0f64;

        for position in positions {
            if let Some(cargo) = position.occupant.as_ref() {
                if position.state != PositionState::Occupied {
                    continue;
                }
                if position.arm_m < midpoint {
                    forward_weight += cargo.weight_kg;
                } else {
                    aft_weight += cargo.weight_kg;
                }
            }
        }

        let total = forward_weight + aft_weight;
        if total <= 0.0 {
            return 0.0; // 空载视为完全均衡
        }
        ((forward_weight - aft_weight) / total * 100.0).abs()
    }

    // ==========================================
    // 优化建议
    // ==========================================

    /// 基于当前占用状况的优化建议启发式
    pub fn identify_optimization_opportunities(
        &self,
        positions: &[Position],
    ) -> Vec<OptimizationOpportunity> {
        let mut opportunities = Vec::new();

        // 1. 小件货物占大货位: 装填率过低的占用货位过多 → 建议合并
        let under_filled = positions
            .iter()
            .filter(|p| p.state == PositionState::Occupied)
            .filter(|p| {
                p.occupant
                    .as_ref()
                    .map(|c| {
                        let usable = p.usable_volume();
                        usable > 0.0 && c.volume() / usable < UNDER_FILLED_VOLUME_RATIO
                    })
                    .unwrap_or(false)
            })
            .count();
        if under_filled >= UNDER_FILLED_COUNT_TRIGGER {
            opportunities.push(OptimizationOpportunity {
                opportunity_type: "consolidation".to_string(),
                recommendation: format!(
                    "{} 个货位装填率低于 {:.0}%,可将小件货物合并释放整位",
                    under_filled,
                    UNDER_FILLED_VOLUME_RATIO * 100.0
                ),
            });
        }

        // 2. 纵向失衡且反向仍有空位 → 建议调整装载方向
        let midpoint = (self.limits.cg_envelope_min_m + self.limits.cg_envelope_max_m) / 2.0;
        let mut forward_weight = 0.0f64;
        let mut aft_weight = 0.0f64;
        let mut aft_available = false;
        let mut forward_available = false;
        for position in positions {
            match position.state {
                PositionState::Occupied => {
                    let weight = position.occupant.as_ref().map(|c| c.weight_kg).unwrap_or(0.0);
                    if position.arm_m < midpoint {
                        forward_weight += weight;
                    } else {
                        aft_weight += weight;
                    }
                }
                PositionState::Available => {
                    if position.arm_m < midpoint {
                        forward_available = true;
                    } else {
                        aft_available = true;
                    }
                }
                PositionState::Reserved => {}
            }
        }
        let total_weight = forward_weight + aft_weight;
        if total_weight > 0.0 {
            let forward_share = forward_weight / total_weight * 100.0;
            if forward_share > FORWARD_AFT_SHARE_TRIGGER && aft_available {
                opportunities.push(OptimizationOpportunity {
                    opportunity_type: "shift_aft".to_string(),
                    recommendation: format!(
                        "前部重量占比 {:.0}%,尾部仍有空位,建议后续重货排向尾部",
                        forward_share
                    ),
                });
            } else if (100.0 - forward_share) > FORWARD_AFT_SHARE_TRIGGER && forward_available {
                opportunities.push(OptimizationOpportunity {
                    opportunity_type: "shift_forward".to_string(),
                    recommendation: format!(
                        "尾部重量占比 {:.0}%,前部仍有空位,建议后续重货排向前部",
                        100.0 - forward_share
                    ),
                });
            }
        }

        // 3. 舱间利用率失衡且轻载舱仍有空位 → 建议调舱
        let deck_deviation = Self::deck_utilization_deviation(positions);
        if deck_deviation > DECK_DEVIATION_TRIGGER_PP {
            opportunities.push(OptimizationOpportunity {
                opportunity_type: "rebalance_decks".to_string(),
                recommendation: format!(
                    "舱间利用率偏差 {:.0} 个百分点,建议向轻载货舱分流",
                    deck_deviation
                ),
            });
        }

        opportunities
    }

    // ==========================================
    // 趋势预测
    // ==========================================

    /// 记录一次利用率样本(当前时刻)
    pub fn record_sample(&self, utilization_pct: f64) {
        self.record_sample_at(Utc::now(), utilization_pct);
    }

    /// 记录一次利用率样本(指定时刻,测试/回放用)
    pub fn record_sample_at(&self, at: DateTime<Utc>, utilization_pct: f64) {
        let mut history = self.lock_history();
        history.push((at, utilization_pct));
    }

    /// 容量趋势预测: 按历史样本线性外推
    ///
    /// # 规则
    /// - 历史样本 < 2 条 → forecast = 当前利用率(无趋势)
    /// - 否则 slope = (末样本 − 首样本) / 间隔小时数, forecast 截断到 [0, 100]
    pub fn get_capacity_forecast(
        &self,
        hours_ahead: f64,
        current_utilization: f64,
    ) -> CapacityForecast {
        let slope_per_hour = {
            let history = self.lock_history();
            if history.len() < 2 {
                0.0
            } else {
                let (first_at, first_pct) = history[0];
                let (last_at, last_pct) = history[history.len() - 1];
                let elapsed_hours =
                    (last_at - first_at).num_seconds() as f64 / 3600.0;
                if elapsed_hours <= 0.0 {
                    0.0
                } else {
                    (last_pct - first_pct) / elapsed_hours
                }
            }
        };

        let forecast_utilization =
            (current_utilization + slope_per_hour * hours_ahead).clamp(0.0, 100.0);
        let will_exceed_capacity =
            forecast_utilization >= self.thresholds.capacity_critical_pct;

        let recommendation = if will_exceed_capacity {
            format!(
                "按当前趋势 {:.0} 小时后利用率约 {:.1}%,建议预留卸载窗口并暂缓接单",
                hours_ahead, forecast_utilization
            )
        } else if slope_per_hour > 0.0 {
            format!(
                "利用率缓慢上升(每小时约 {:.2} 个百分点),容量暂时充足",
                slope_per_hour
            )
        } else {
            "容量趋势平稳".to_string()
        };

        info!(
            hours_ahead,
            current_utilization, forecast_utilization, will_exceed_capacity, "容量趋势预测"
        );

        CapacityForecast {
            hours_ahead,
            current_utilization,
            forecast_utilization,
            will_exceed_capacity,
            recommendation,
        }
    }

    // ==========================================
    // 告警汇总
    // ==========================================

    /// 当前活跃告警汇总
    pub fn get_alert_summary(&self) -> AlertSummary {
        let guard = self.lock_alerts();
        let mut counts = SeverityCounts::default();
        let mut total = 0usize;

        for alerts in guard.values() {
            for alert in alerts {
                total += 1;
                match alert.severity {
                    AlertSeverity::Critical => counts.critical += 1,
                    AlertSeverity::High => counts.high += 1,
                    AlertSeverity::Medium => counts.medium += 1,
                    AlertSeverity::Low => counts.low += 1,
                }
            }
        }

        AlertSummary {
            total_active_alerts: total,
            by_severity: counts,
        }
    }

    /// 当前活跃告警明细(按类型展开)
    pub fn active_alerts(&self) -> Vec<Alert> {
        let guard = self.lock_alerts();
        guard.values().flatten().cloned().collect()
    }

    // ==========================================
    // 内部辅助
    // ==========================================

    fn retain_alerts(&self, alert_type: AlertType, alerts: Vec<Alert>) {
        let mut guard = self.lock_alerts();
        if alerts.is_empty() {
            guard.remove(&alert_type);
        } else {
            guard.insert(alert_type, alerts);
        }
    }

    fn lock_alerts(&self) -> std::sync::MutexGuard<'_, HashMap<AlertType, Vec<Alert>>> {
        self.active_alerts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn lock_history(&self) -> std::sync::MutexGuard<'_, Vec<(DateTime<Utc>, f64)>> {
        self.history
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn ratio_pct(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}
