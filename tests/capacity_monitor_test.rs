// ==========================================
// 容量监控与告警测试
// ==========================================
// 测试范围:
// 1. 连续装载逼近满载时分级容量告警触发
// 2. 告警汇总/均衡分析/优化建议/趋势预测
// ==========================================


use freighter_loadplan::api::AssessmentApi;
use freighter_loadplan::config::engine_config::EngineConfig;
use freighter_loadplan::domain::types::{AlertSeverity, AlertType, CargoType, Priority};
use test_helpers::{create_cargo, create_request, create_small_inventory, create_standard_api};

// ==========================================
// 测试 1: 容量压力场景 (10 货位连续装满)
// ==========================================

#[test]
fn test_sequential_fill_raises_capacity_alerts() {
    // 缩减版 10 货位库存,便于让货位占用率跨越告警阈值
    let inventory = create_small_inventory(10, 110_000.0);
    let api = AssessmentApi::with_inventory(EngineConfig::default(), inventory);

    let mut high_or_critical_seen = false;
    let mut placed = 0;

    for i in 0..10 {
        let cargo = create_cargo(
            &format!("STRESS{:03}", i),
            1.2,
            1.0,
            0.7,
            400.0 + 30.0 * i as f64, // 400 - 670 kg
            CargoType::Textiles,
        );
        let request = create_request(cargo.clone(), None, Priority::Normal);

        let result = api.assess_cargo_placement(&request).unwrap();
        if !result.assessment_successful {
            break;
        }

        for alert in &result.alerts {
            if alert.alert_type == AlertType::Capacity
                && (alert.severity == AlertSeverity::High
                    || alert.severity == AlertSeverity::Critical)
            {
                high_or_critical_seen = true;
            }
        }

        api.occupy(&result.recommended_positions[0].position.id, &cargo)
            .unwrap();
        placed += 1;
    }

    assert_eq!(placed, 10); // 全部放得下
    assert!(high_or_critical_seen); // 跨越 85% 后必有 HIGH/CRITICAL 告警

    let metrics = api.get_utilization_metrics();
    assert_eq!(metrics.total_utilization, 100.0);
    assert_eq!(metrics.available_positions, 0);

    // 活跃告警汇总仍保留容量告警
    let summary = api.get_alert_summary();
    assert!(summary.total_active_alerts > 0);
    assert!(summary.by_severity.high + summary.by_severity.critical > 0);
}

// ==========================================
// 测试 2: 标准布局下低占用不产生告警
// ==========================================

#[test]
fn test_low_utilization_produces_no_capacity_alerts() {
    let api = create_standard_api();

    let cargo = create_cargo("CALM001", 1.2, 1.0, 0.7, 500.0, CargoType::General);
    let request = create_request(cargo, None, Priority::Normal);
    let result = api.assess_cargo_placement(&request).unwrap();

    assert!(result.assessment_successful);
    assert!(result
        .alerts
        .iter()
        .all(|a| a.alert_type != AlertType::Capacity));
    assert_eq!(api.get_alert_summary().total_active_alerts, 0);
}

// ==========================================
// 测试 3: 均衡分析
// ==========================================

#[test]
fn test_load_balance_analysis_empty_is_balanced() {
    let api = create_standard_api();
    let analysis = api.get_load_balance_analysis();
    assert_eq!(analysis.balance_score, 100.0); // 空载完全均衡
    assert!(analysis.is_balanced);
}

#[test]
fn test_forward_heavy_load_lowers_balance_score() {
    let api = create_standard_api();

    // 全部重量压在主货舱最前部
    for (i, position_id) in ["MD-01-01", "MD-01-02", "MD-02-01", "MD-02-02"]
        .iter()
        .enumerate()
    {
        let cargo = create_cargo(
            &format!("FWD{:03}", i),
            2.0,
            1.8,
            1.5,
            2400.0,
            CargoType::Machinery,
        );
        api.occupy(position_id, &cargo).unwrap();
    }

    let analysis = api.get_load_balance_analysis();
    // 前后重量偏差 100% → 评分显著下降
    assert!(analysis.forward_aft_deviation_pct > 99.0);
    assert!(analysis.balance_score < 70.0);
    assert!(!analysis.is_balanced);

    // 纵向失衡且尾部有空位 → 产生向尾部分流建议
    let opportunities = api.identify_optimization_opportunities();
    assert!(opportunities
        .iter()
        .any(|o| o.opportunity_type == "shift_aft"));
}

// ==========================================
// 测试 4: 优化建议 - 小件占大位
// ==========================================

#[test]
fn test_under_filled_positions_trigger_consolidation() {
    let api = create_standard_api();

    // 三件小货分别占用主货舱大货位(装填率 << 30%)
    for (i, position_id) in ["MD-07-01", "MD-08-01", "MD-09-01"].iter().enumerate() {
        let cargo = create_cargo(
            &format!("TINY{:03}", i),
            0.8,
            0.8,
            0.5,
            120.0,
            CargoType::General,
        );
        api.occupy(position_id, &cargo).unwrap();
    }

    let opportunities = api.identify_optimization_opportunities();
    assert!(opportunities
        .iter()
        .any(|o| o.opportunity_type == "consolidation"));
}

// ==========================================
// 测试 5: 容量趋势预测
// ==========================================

#[test]
fn test_capacity_forecast_without_history() {
    let api = create_standard_api();
    let forecast = api.get_capacity_forecast(12.0);
    // 无历史趋势: 预测等于当前利用率
    assert_eq!(forecast.forecast_utilization, forecast.current_utilization);
    assert!(!forecast.will_exceed_capacity);
    assert!(!forecast.recommendation.is_empty());
}
