// ==========================================
// MaterialApi 集成测试
// ==========================================
// 测试范围:
// 1. 查询接口: list_materials 排序与内容
// 2. 库存更新: 校验失败不落库、未知物料404、变更事件发布
// ==========================================

mod helpers;

use helpers::api_test_helper::ApiTestEnv;
use workshop_mes::api::{ApiError, UpdateStockRequest};

// ==========================================
// 查询接口测试
// ==========================================

#[test]
fn test_list_materials_正常查询() {
    for env in ApiTestEnv::all_backends() {
        let materials = env.material_api.list_materials().expect("查询失败");
        assert_eq!(materials.len(), 3, "[{}] 种子物料数", env.backend_name());

        // 按名称升序
        let names: Vec<&str> = materials.iter().map(|m| m.material_name.as_str()).collect();
        assert_eq!(names, vec!["Aluminum Sheet", "Copper Wire", "Steel Plate"]);
    }
}

// ==========================================
// 库存更新测试
// ==========================================

#[test]
fn test_update_stock_正常更新() {
    for env in ApiTestEnv::all_backends() {
        let updated = env
            .material_api
            .update_stock(1, UpdateStockRequest { stock_qty: Some(42) })
            .expect("库存更新失败");
        assert_eq!(updated.stock_qty, 42);
        assert!(updated.updated_at >= updated.created_at, "updated_at 应推进");

        // 再查一次确认已落库
        let materials = env.material_api.list_materials().expect("查询失败");
        let steel = materials.iter().find(|m| m.material_id == 1).unwrap();
        assert_eq!(steel.stock_qty, 42, "[{}]", env.backend_name());
    }
}

#[test]
fn test_update_stock_零值合法() {
    let env = ApiTestEnv::new_memory();
    let updated = env
        .material_api
        .update_stock(1, UpdateStockRequest { stock_qty: Some(0) })
        .expect("零库存应合法");
    assert_eq!(updated.stock_qty, 0);
}

#[test]
fn test_update_stock_负值拒绝且不落库() {
    for env in ApiTestEnv::all_backends() {
        let err = env
            .material_api
            .update_stock(1, UpdateStockRequest { stock_qty: Some(-5) })
            .expect_err("负库存应拒绝");
        assert!(
            matches!(&err, ApiError::InvalidInput(msg) if msg.contains("stock_qty")),
            "[{}] 错误应指明字段",
            env.backend_name()
        );

        // 原值保持不变
        let materials = env.material_api.list_materials().expect("查询失败");
        let steel = materials.iter().find(|m| m.material_id == 1).unwrap();
        assert_eq!(steel.stock_qty, 15);
    }
}

#[test]
fn test_update_stock_字段缺失拒绝() {
    let env = ApiTestEnv::new_memory();
    let err = env
        .material_api
        .update_stock(1, UpdateStockRequest { stock_qty: None })
        .expect_err("缺失字段应拒绝");
    assert!(matches!(&err, ApiError::InvalidInput(msg) if msg.contains("stock_qty")));
}

#[test]
fn test_update_stock_未知物料404() {
    for env in ApiTestEnv::all_backends() {
        let err = env
            .material_api
            .update_stock(999, UpdateStockRequest { stock_qty: Some(1) })
            .expect_err("未知物料应404");
        assert!(matches!(err, ApiError::NotFound(_)), "[{}]", env.backend_name());
    }
}

#[test]
fn test_update_stock_发布变更事件() {
    let env = ApiTestEnv::new_memory();
    let mut rx = env.events.subscribe();

    env.material_api
        .update_stock(2, UpdateStockRequest { stock_qty: Some(7) })
        .expect("库存更新失败");

    let payload = rx.try_recv().expect("应收到变更事件");
    assert!(payload.contains(r#""type":"materials:update""#));
    assert!(payload.contains("Aluminum Sheet"));
}

#[test]
fn test_update_stock_校验失败不发布事件() {
    let env = ApiTestEnv::new_memory();
    let mut rx = env.events.subscribe();

    let _ = env
        .material_api
        .update_stock(2, UpdateStockRequest { stock_qty: Some(-1) });

    assert!(rx.try_recv().is_err(), "校验失败不应发布事件");
}
