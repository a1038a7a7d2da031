// ==========================================
// ProductionApi / DashboardApi 集成测试
// ==========================================
// 测试范围:
// 1. 日志上报: 必填校验、缺省值、校验失败不落库
// 2. 日志查询: 倒序、limit 上限
// 3. KPI 聚合: 累计量与缺料订单计数
// ==========================================

mod helpers;

use chrono::{Duration, Utc};
use helpers::api_test_helper::ApiTestEnv;
use helpers::test_data_builder::LogRequestBuilder;
use workshop_mes::api::{ApiError, UpdateStockRequest};

// ==========================================
// 日志上报测试
// ==========================================

#[test]
fn test_create_log_正常上报() {
    for env in ApiTestEnv::all_backends() {
        let log = env
            .production_api
            .create_log(
                LogRequestBuilder::new(1)
                    .workstation("WS-02")
                    .qty_good(50)
                    .qty_reject(2)
                    .downtime_minutes(10)
                    .reason("换模")
                    .build(),
            )
            .expect("上报失败");

        assert!(log.id >= 1, "[{}]", env.backend_name());
        assert_eq!(log.order_id, 1);
        assert_eq!(log.workstation_id, "WS-02");
        assert_eq!(log.qty_good, 50);
        assert_eq!(log.qty_reject, 2);
        assert_eq!(log.downtime_minutes, 10);
        assert_eq!(log.reason.as_deref(), Some("换模"));
    }
}

#[test]
fn test_create_log_缺省值() {
    let env = ApiTestEnv::new_memory();
    let log = env
        .production_api
        .create_log(LogRequestBuilder::new(1).qty_good(5).build())
        .expect("上报失败");

    assert_eq!(log.qty_reject, 0, "qty_reject 缺省为0");
    assert_eq!(log.downtime_minutes, 0, "downtime_minutes 缺省为0");
    assert!(log.reason.is_none());
}

#[test]
fn test_create_log_缺失必填字段不落库() {
    for env in ApiTestEnv::all_backends() {
        let err = env
            .production_api
            .create_log(LogRequestBuilder::new(1).without_qty_good().build())
            .expect_err("缺失qty_good应拒绝");
        assert!(
            matches!(&err, ApiError::InvalidInput(msg) if msg.contains("qty_good")),
            "[{}] 错误应指明字段",
            env.backend_name()
        );

        let err = env
            .production_api
            .create_log(LogRequestBuilder::new(1).without_workstation().build())
            .expect_err("缺失workstation_id应拒绝");
        assert!(matches!(&err, ApiError::InvalidInput(msg) if msg.contains("workstation_id")));

        // 校验失败后不应有任何日志
        let logs = env.production_api.list_logs(None).expect("查询失败");
        assert!(logs.is_empty(), "[{}]", env.backend_name());
    }
}

#[test]
fn test_create_log_负数量拒绝() {
    let env = ApiTestEnv::new_memory();
    let err = env
        .production_api
        .create_log(LogRequestBuilder::new(1).qty_good(-1).build())
        .expect_err("负良品数应拒绝");
    assert!(matches!(&err, ApiError::InvalidInput(msg) if msg.contains("qty_good")));
}

// ==========================================
// 日志查询测试
// ==========================================

#[test]
fn test_list_logs_倒序与limit() {
    for env in ApiTestEnv::all_backends() {
        let base = Utc::now();
        for i in 0..5 {
            env.production_api
                .create_log(
                    LogRequestBuilder::new(1)
                        .qty_good(i)
                        .timestamp(base + Duration::seconds(i))
                        .build(),
                )
                .expect("上报失败");
        }

        let logs = env.production_api.list_logs(Some(3)).expect("查询失败");
        assert_eq!(logs.len(), 3, "[{}]", env.backend_name());
        // 最新在前
        assert_eq!(logs[0].qty_good, 4);
        assert_eq!(logs[1].qty_good, 3);
        assert_eq!(logs[2].qty_good, 2);
    }
}

#[test]
fn test_list_logs_limit超上限收敛() {
    let env = ApiTestEnv::new_memory();
    env.production_api
        .create_log(LogRequestBuilder::new(1).qty_good(1).build())
        .expect("上报失败");

    // 超过上限的limit不报错，按上限收敛
    let logs = env.production_api.list_logs(Some(10_000)).expect("查询失败");
    assert_eq!(logs.len(), 1);
}

// ==========================================
// KPI 聚合测试
// ==========================================

#[test]
fn test_kpi_overview_聚合() {
    for env in ApiTestEnv::all_backends() {
        env.production_api
            .create_log(
                LogRequestBuilder::new(1)
                    .qty_good(90)
                    .qty_reject(10)
                    .downtime_minutes(5)
                    .build(),
            )
            .expect("上报失败");
        env.production_api
            .create_log(
                LogRequestBuilder::new(2)
                    .qty_good(60)
                    .qty_reject(0)
                    .downtime_minutes(15)
                    .build(),
            )
            .expect("上报失败");

        let kpi = env.dashboard_api.kpi_overview().expect("聚合失败");
        assert_eq!(kpi.log_count, 2, "[{}]", env.backend_name());
        assert_eq!(kpi.total_good, 150);
        assert_eq!(kpi.total_reject, 10);
        assert_eq!(kpi.total_downtime_minutes, 20);
        assert!((kpi.reject_rate - 10.0 / 160.0).abs() < 1e-9);

        // 种子订单: #002 缺料
        assert_eq!(kpi.order_count, 2);
        assert_eq!(kpi.shortage_order_count, 1);
    }
}

#[test]
fn test_kpi_overview_空日志不除零() {
    let env = ApiTestEnv::new_memory();
    let kpi = env.dashboard_api.kpi_overview().expect("聚合失败");
    assert_eq!(kpi.log_count, 0);
    assert_eq!(kpi.reject_rate, 0.0);
}

#[test]
fn test_kpi_缺料计数跟随库存变化() {
    let env = ApiTestEnv::new_memory();
    // 铜线补足后订单#002不再缺料
    env.material_api
        .update_stock(3, UpdateStockRequest { stock_qty: Some(100) })
        .expect("库存更新失败");

    let kpi = env.dashboard_api.kpi_overview().expect("聚合失败");
    assert_eq!(kpi.shortage_order_count, 0);
}
