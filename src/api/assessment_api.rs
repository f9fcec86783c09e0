// ==========================================
// 宽体货机配载评估系统 - 配载评估 API
// ==========================================
// 职责: 对外唯一门面,装配 库存 + 引擎 + 监控 并暴露:
//   - assess_cargo_placement (主入口)
//   - reserve / occupy / release (推荐被采纳后的显式落位)
//   - 利用率 / 告警 / 平衡 / 预测 只读查询
// 架构: API 层 → 引擎层 → 库存层; 序列化到传输协议由调用方负责
// ==========================================

use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::api::validator;
use crate::config::engine_config::EngineConfig;
use crate::domain::cargo::{Cargo, CargoRequest};
use crate::domain::metrics::{
    AlertSummary, CapacityForecast, LoadBalanceAnalysis, OptimizationOpportunity,
    UtilizationMetrics, WeightBalanceStatus,
};
use crate::domain::position::Position;
use crate::engine::assessment::{
    AssessmentCoordinator, AssessmentResult, ConstraintValidation, ViolationHandling,
};
use crate::engine::fit::SpatialFitScorer;
use crate::engine::monitor::CapacityAlertMonitor;
use crate::engine::weight_balance::WeightBalanceEngine;
use crate::inventory::error::InventoryError;
use crate::inventory::position_inventory::PositionInventory;
use tracing::instrument;

// ==========================================
// AssessmentApi - 配载评估 API
// ==========================================
pub struct AssessmentApi {
    inventory: Arc<PositionInventory>,
    monitor: Arc<CapacityAlertMonitor>,
    coordinator: AssessmentCoordinator,
    weight_balance: WeightBalanceEngine,
}

impl AssessmentApi {
    /// 以标准 56 货位布局装配完整引擎栈
    pub fn new(config: EngineConfig) -> Self {
        let inventory = Arc::new(PositionInventory::new(&config.limits));
        Self::with_inventory(config, inventory)
    }

    /// 以外部库存装配(测试/特殊布局)
    pub fn with_inventory(config: EngineConfig, inventory: Arc<PositionInventory>) -> Self {
        let monitor = Arc::new(CapacityAlertMonitor::new(
            config.alerts.clone(),
            config.limits.clone(),
        ));
        let coordinator = AssessmentCoordinator::new(
            inventory.clone(),
            SpatialFitScorer::new(config.scoring.clone()),
            WeightBalanceEngine::new(config.limits.clone(), config.alerts.clone()),
            monitor.clone(),
            config.clone(),
        );
        let weight_balance =
            WeightBalanceEngine::new(config.limits.clone(), config.alerts.clone());

        Self {
            inventory,
            monitor,
            coordinator,
            weight_balance,
        }
    }

    // ==========================================
    // 主入口
    // ==========================================

    /// 配载评估: 校验请求 → 协调器全流程
    #[instrument(skip(self, request), fields(cargo_id = %request.cargo.id))]
    pub fn assess_cargo_placement(&self, request: &CargoRequest) -> ApiResult<AssessmentResult> {
        validator::validate_request(request)?;
        Ok(self.coordinator.assess_cargo_placement(request))
    }

    // ==========================================
    // 落位操作(推荐被采纳后的显式提交)
    // ==========================================

    /// 预订货位(软占用)
    pub fn reserve(&self, position_id: &str, cargo: &Cargo) -> ApiResult<()> {
        validator::validate_cargo(cargo)?;
        self.inventory.reserve(position_id, cargo).map_err(ApiError::from)
    }

    /// 占用货位(实装提交; 允许跳过预订直接占用)
    pub fn occupy(&self, position_id: &str, cargo: &Cargo) -> ApiResult<()> {
        validator::validate_cargo(cargo)?;
        self.inventory.occupy(position_id, cargo).map_err(ApiError::from)
    }

    /// 释放货位; 货位本就空闲时按幂等 no-op 处理
    pub fn release(&self, position_id: &str) -> ApiResult<()> {
        match self.inventory.release(position_id) {
            Ok(()) => Ok(()),
            Err(InventoryError::AlreadyAvailable { .. }) => Ok(()), // 幂等释放
            Err(err) => Err(err.into()),
        }
    }

    // ==========================================
    // 只读查询
    // ==========================================

    /// 容量利用率指标
    pub fn get_utilization_metrics(&self) -> UtilizationMetrics {
        self.inventory.utilization_metrics()
    }

    /// 活跃告警汇总
    pub fn get_alert_summary(&self) -> AlertSummary {
        self.monitor.get_alert_summary()
    }

    /// 载重平衡状态
    pub fn get_weight_balance_status(&self) -> WeightBalanceStatus {
        let occupied = self.inventory.occupied_snapshot();
        self.weight_balance.get_current_status(&occupied)
    }

    /// 配载均衡分析
    pub fn get_load_balance_analysis(&self) -> LoadBalanceAnalysis {
        let snapshot = self.inventory.snapshot();
        self.monitor.get_load_balance_analysis(&snapshot)
    }

    /// 优化建议
    pub fn identify_optimization_opportunities(&self) -> Vec<OptimizationOpportunity> {
        let snapshot = self.inventory.snapshot();
        self.monitor.identify_optimization_opportunities(&snapshot)
    }

    /// 容量趋势预测(同时记录一条当前利用率样本)
    pub fn get_capacity_forecast(&self, hours_ahead: f64) -> CapacityForecast {
        let current = self.inventory.utilization_metrics().total_utilization;
        self.monitor.record_sample(current);
        self.monitor.get_capacity_forecast(hours_ahead, current)
    }

    /// 三族约束校验(按货位)
    pub fn coordinate_constraint_validation(
        &self,
        cargo: &Cargo,
        position: &Position,
    ) -> ApiResult<ConstraintValidation> {
        validator::validate_cargo(cargo)?;
        Ok(self.coordinator.coordinate_constraint_validation(cargo, position))
    }

    /// 违规处置(检索替代货位)
    pub fn handle_constraint_violations(
        &self,
        cargo: &Cargo,
        position: &Position,
    ) -> ApiResult<ViolationHandling> {
        validator::validate_cargo(cargo)?;
        Ok(self.coordinator.handle_constraint_violations(cargo, position))
    }

    /// 按编号查询货位(快照克隆)
    pub fn get_position_by_id(&self, position_id: &str) -> ApiResult<Position> {
        self.inventory.get_position_by_id(position_id).map_err(ApiError::from)
    }

    /// 查询空闲货位
    pub fn get_available_positions(
        &self,
        deck: Option<crate::domain::types::DeckType>,
    ) -> Vec<Position> {
        self.inventory.get_available_positions(deck)
    }
}
