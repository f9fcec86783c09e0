// ==========================================
// 宽体货机配载评估系统 - 货位库存
// ==========================================
// 职责: 独占持有全部货位记录,串行化 reserve/occupy/release 状态转换
// 并发: 单把 Mutex 覆盖整个 arena; 两个并发请求竞争同一货位时,
//       恰好一个成功,另一个得到类型化冲突错误(线性一致)
// 红线: 先校验后提交(check-then-commit),不存在部分写入路径
// ==========================================

use crate::config::engine_config::AircraftLimits;
use crate::domain::cargo::Cargo;
use crate::domain::metrics::UtilizationMetrics;
use crate::domain::position::Position;
use crate::domain::types::{DeckType, PositionState};
use crate::inventory::error::{InventoryError, InventoryResult};
use crate::inventory::layout::build_standard_layout;
use std::collections::BTreeMap;
use std::sync::Mutex;
use tracing::{debug, info, warn};

// ==========================================
// PositionInventory - 货位库存
// ==========================================
pub struct PositionInventory {
    // BTreeMap 保证遍历即稳定的编号字典序
    positions: Mutex<BTreeMap<String, Position>>,
    // 载重利用率分母(全机最大业载)
    max_total_weight_kg: f64,
}

impl PositionInventory {
    /// 以标准 56 货位布局创建库存,全部 AVAILABLE
    pub fn new(limits: &AircraftLimits) -> Self {
        Self::with_positions(build_standard_layout(limits), limits.max_total_weight_kg)
    }

    /// 以自定义货位集合创建库存(测试/特殊机型布局)
    pub fn with_positions(positions: Vec<Position>, max_total_weight_kg: f64) -> Self {
        let map: BTreeMap<String, Position> = positions
            .into_iter()
            .map(|p| (p.id.clone(), p))
            .collect();

        info!(position_count = map.len(), "货位库存初始化完成");

        Self {
            positions: Mutex::new(map),
            max_total_weight_kg,
        }
    }

    // ==========================================
    // 读取接口(一致性快照,持锁期间克隆)
    // ==========================================

    /// 查询空闲货位,可按货舱过滤,按编号稳定排序
    pub fn get_available_positions(&self, deck: Option<DeckType>) -> Vec<Position> {
        let guard = self.lock_positions();
        guard
            .values()
            .filter(|p| p.state == PositionState::Available)
            .filter(|p| deck.map_or(true, |d| p.deck_type == d))
            .cloned()
            .collect()
    }

    /// 按编号查询货位
    pub fn get_position_by_id(&self, position_id: &str) -> InventoryResult<Position> {
        let guard = self.lock_positions();
        guard
            .get(position_id)
            .cloned()
            .ok_or_else(|| InventoryError::NotFound {
                position_id: position_id.to_string(),
            })
    }

    /// 全量快照(克隆),供监控/可视化消费
    pub fn snapshot(&self) -> Vec<Position> {
        let guard = self.lock_positions();
        guard.values().cloned().collect()
    }

    /// 已占用货位快照,载重平衡引擎的唯一事实来源
    pub fn occupied_snapshot(&self) -> Vec<Position> {
        let guard = self.lock_positions();
        guard
            .values()
            .filter(|p| p.state == PositionState::Occupied)
            .cloned()
            .collect()
    }

    // ==========================================
    // 状态转换接口(持锁校验后提交)
    // ==========================================

    /// 预订货位: AVAILABLE → RESERVED,绑定占用货物
    ///
    /// # 失败
    /// - NotFound: 货位不存在
    /// - AlreadyOccupied: 货位不处于 AVAILABLE
    pub fn reserve(&self, position_id: &str, cargo: &Cargo) -> InventoryResult<()> {
        let mut guard = self.lock_positions();
        let position = Self::get_mut(&mut guard, position_id)?;

        if position.state != PositionState::Available {
            warn!(
                position_id = %position_id,
                state = %position.state,
                cargo_id = %cargo.id,
                "预订失败: 货位非空闲"
            );
            return Err(InventoryError::AlreadyOccupied {
                position_id: position_id.to_string(),
                state: position.state,
            });
        }

        position.state = PositionState::Reserved;
        position.occupant = Some(cargo.clone());
        info!(position_id = %position_id, cargo_id = %cargo.id, "货位已预订");
        Ok(())
    }

    /// 占用货位: RESERVED → OCCUPIED(同一货物)或 AVAILABLE → OCCUPIED(直接占用)
    ///
    /// # 失败
    /// - OccupantMismatch: RESERVED/OCCUPIED 状态下货物不一致
    pub fn occupy(&self, position_id: &str, cargo: &Cargo) -> InventoryResult<()> {
        let mut guard = self.lock_positions();
        let position = Self::get_mut(&mut guard, position_id)?;

        match position.state {
            PositionState::Available => {
                // 跳过预订直接占用
                position.state = PositionState::Occupied;
                position.occupant = Some(cargo.clone());
                info!(position_id = %position_id, cargo_id = %cargo.id, "货位已占用(直接)");
                Ok(())
            }
            PositionState::Reserved => {
                let occupant_id = position
                    .occupant
                    .as_ref()
                    .map(|c| c.id.clone())
                    .unwrap_or_default();
                if occupant_id != cargo.id {
                    return Err(InventoryError::OccupantMismatch {
                        position_id: position_id.to_string(),
                        occupant_id,
                        requested_id: cargo.id.clone(),
                    });
                }
                position.state = PositionState::Occupied;
                position.occupant = Some(cargo.clone());
                info!(position_id = %position_id, cargo_id = %cargo.id, "货位已占用(预订确认)");
                Ok(())
            }
            PositionState::Occupied => {
                let occupant_id = position
                    .occupant
                    .as_ref()
                    .map(|c| c.id.clone())
                    .unwrap_or_default();
                if occupant_id == cargo.id {
                    // 同一货物重复占用,幂等
                    debug!(position_id = %position_id, cargo_id = %cargo.id, "重复占用,忽略");
                    Ok(())
                } else {
                    Err(InventoryError::OccupantMismatch {
                        position_id: position_id.to_string(),
                        occupant_id,
                        requested_id: cargo.id.clone(),
                    })
                }
            }
        }
    }

    /// 释放货位: RESERVED/OCCUPIED → AVAILABLE,清除占用货物
    ///
    /// # 失败
    /// - AlreadyAvailable: 货位本就空闲(API 层按幂等 no-op 处理)
    pub fn release(&self, position_id: &str) -> InventoryResult<()> {
        let mut guard = self.lock_positions();
        let position = Self::get_mut(&mut guard, position_id)?;

        if position.state == PositionState::Available {
            return Err(InventoryError::AlreadyAvailable {
                position_id: position_id.to_string(),
            });
        }

        position.state = PositionState::Available;
        position.occupant = None;
        info!(position_id = %position_id, "货位已释放");
        Ok(())
    }

    // ==========================================
    // 指标计算
    // ==========================================

    /// 容量利用率指标,O(货位数)单次持锁遍历
    pub fn utilization_metrics(&self) -> UtilizationMetrics {
        let guard = self.lock_positions();

        let mut available = 0usize;
        let mut reserved = 0usize;
        let mut occupied = 0usize;
        let mut lower_total = 0usize;
        let mut lower_occupied = 0usize;
        let mut main_total = 0usize;
        let mut main_occupied = 0usize;
        let mut occupied_weight_kg = 0.0f64;

        for position in guard.values() {
            match position.deck_type {
                DeckType::LowerDeck => lower_total += 1,
                DeckType::MainDeck => main_total += 1,
            }

            match position.state {
                PositionState::Available => available += 1,
                PositionState::Reserved => reserved += 1,
                PositionState::Occupied => {
                    occupied += 1;
                    occupied_weight_kg +=
                        position.occupant.as_ref().map(|c| c.weight_kg).unwrap_or(0.0);
                    match position.deck_type {
                        DeckType::LowerDeck => lower_occupied += 1,
                        DeckType::MainDeck => main_occupied += 1,
                    }
                }
            }
        }

        let total = guard.len();

        UtilizationMetrics {
            total_utilization: percentage(occupied, total),
            lower_deck_utilization: percentage(lower_occupied, lower_total),
            main_deck_utilization: percentage(main_occupied, main_total),
            weight_utilization: if self.max_total_weight_kg > 0.0 {
                (occupied_weight_kg / self.max_total_weight_kg * 100.0).min(100.0)
            } else {
                0.0
            },
            available_positions: available,
            reserved_positions: reserved,
            occupied_positions: occupied,
            total_positions: total,
        }
    }

    /// 占用不变式检查(测试/诊断用): 所有货位 occupant 非空 ⇔ 非 AVAILABLE
    pub fn verify_consistency(&self) -> bool {
        let guard = self.lock_positions();
        guard.values().all(|p| p.occupancy_consistent())
    }

    // ==========================================
    // 内部辅助
    // ==========================================

    fn lock_positions(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, Position>> {
        // 写入路径先校验后提交,锁中毒只可能由 panic 的读取方引起,恢复继续是安全的
        self.positions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn get_mut<'a>(
        guard: &'a mut BTreeMap<String, Position>,
        position_id: &str,
    ) -> InventoryResult<&'a mut Position> {
        guard
            .get_mut(position_id)
            .ok_or_else(|| InventoryError::NotFound {
                position_id: position_id.to_string(),
            })
    }
}

fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        (part as f64 / total as f64 * 100.0).min(100.0)
    }
}
