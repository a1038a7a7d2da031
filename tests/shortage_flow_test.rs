// ==========================================
// 缺料判定流程集成测试
// ==========================================
// 测试范围:
// 1. 订单查询时 bom_items / hasShortage 的实时派生
// 2. 库存变更后的判定翻转（不依赖任何缓存）
// 3. 两种存储后端契约一致
// ==========================================

mod helpers;

use helpers::api_test_helper::ApiTestEnv;
use helpers::test_data_builder::update_order_request;
use workshop_mes::api::{ApiError, UpdateStockRequest};

// ==========================================
// 种子数据基线
// ==========================================

#[test]
fn test_list_orders_种子数据判定基线() {
    for env in ApiTestEnv::all_backends() {
        let orders = env.order_api.list_orders().expect("查询失败");
        assert_eq!(orders.len(), 2, "[{}] 种子订单数", env.backend_name());

        // 订单按 start_date 升序
        let order1 = &orders[0];
        let order2 = &orders[1];
        assert_eq!(order1.order_id, 1);
        assert_eq!(order2.order_id, 2);

        // 订单#001: Steel Plate 15/10 + Aluminum Sheet 8/5 → 齐套
        assert!(
            !order1.has_shortage,
            "[{}] 订单#001 库存充足不应缺料",
            env.backend_name()
        );
        assert_eq!(order1.bom_items.len(), 2);
        assert!(order1.bom_items.iter().all(|item| item.available));

        // 订单#002: Copper Wire 15/20 → 缺料
        assert!(
            order2.has_shortage,
            "[{}] 订单#002 铜线不足应缺料",
            env.backend_name()
        );
        assert_eq!(order2.bom_items.len(), 1);
        assert_eq!(order2.bom_items[0].qty_required, 20);
        assert_eq!(order2.bom_items[0].stock_qty, 15);
        assert!(!order2.bom_items[0].available);
    }
}

// ==========================================
// 库存变更后的判定翻转
// ==========================================

#[test]
fn test_库存下降后缺料标志翻转() {
    for env in ApiTestEnv::all_backends() {
        // Aluminum Sheet: 8 → 3，订单#001 需要 5
        env.material_api
            .update_stock(2, UpdateStockRequest { stock_qty: Some(3) })
            .expect("库存更新失败");

        let order1 = env.order_api.list_orders().expect("查询失败")[0].clone();
        assert!(
            order1.has_shortage,
            "[{}] 铝板降为3后订单#001应缺料",
            env.backend_name()
        );
        let aluminum = order1
            .bom_items
            .iter()
            .find(|item| item.material_id == 2)
            .expect("应包含铝板BOM行");
        assert_eq!(aluminum.stock_qty, 3);
        assert!(!aluminum.available);
    }
}

#[test]
fn test_库存恰好等于需求视为齐套() {
    for env in ApiTestEnv::all_backends() {
        // Copper Wire: 15 → 20，订单#002 需要正好 20
        env.material_api
            .update_stock(3, UpdateStockRequest { stock_qty: Some(20) })
            .expect("库存更新失败");

        let orders = env.order_api.list_orders().expect("查询失败");
        let order2 = orders.iter().find(|o| o.order_id == 2).unwrap();
        assert!(
            !order2.has_shortage,
            "[{}] 库存恰好等于需求不算缺料",
            env.backend_name()
        );
    }
}

#[test]
fn test_重复查询判定结果稳定() {
    for env in ApiTestEnv::all_backends() {
        let first = env.order_api.list_orders().expect("查询失败");
        let second = env.order_api.list_orders().expect("查询失败");

        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.has_shortage, b.has_shortage);
            assert_eq!(a.bom_items, b.bom_items);
        }
    }
}

// ==========================================
// 订单日期更新
// ==========================================

#[test]
fn test_更新订单日期保留派生字段() {
    for env in ApiTestEnv::all_backends() {
        let updated = env
            .order_api
            .update_order_dates(update_order_request(1, "2024-02-01", "2024-02-05"))
            .expect("日期更新失败");

        assert_eq!(updated.start_date.to_string(), "2024-02-01");
        assert_eq!(updated.end_date.to_string(), "2024-02-05");
        // 日期更新不影响BOM派生
        assert_eq!(updated.bom_items.len(), 2);
        assert!(!updated.has_shortage);
    }
}

#[test]
fn test_更新未知订单返回NotFound且不产生变更() {
    for env in ApiTestEnv::all_backends() {
        let before = env.order_api.list_orders().expect("查询失败");

        let err = env
            .order_api
            .update_order_dates(update_order_request(999, "2024-02-01", "2024-02-05"))
            .expect_err("未知订单应失败");
        assert!(matches!(err, ApiError::NotFound(_)), "[{}]", env.backend_name());

        let after = env.order_api.list_orders().expect("查询失败");
        assert_eq!(before.len(), after.len());
        for (a, b) in before.iter().zip(after.iter()) {
            assert_eq!(a.start_date, b.start_date);
            assert_eq!(a.end_date, b.end_date);
        }
    }
}

#[test]
fn test_更新订单日期缺失字段报400级错误() {
    let env = ApiTestEnv::new_memory();

    let mut req = update_order_request(1, "2024-02-01", "2024-02-05");
    req.end_date = None;
    let err = env.order_api.update_order_dates(req).expect_err("应校验失败");
    assert!(matches!(&err, ApiError::InvalidInput(msg) if msg.contains("endDate")));

    let err = env
        .order_api
        .update_order_dates(update_order_request(1, "not-a-date", "2024-02-05"))
        .expect_err("非法日期应校验失败");
    assert!(matches!(&err, ApiError::InvalidInput(msg) if msg.contains("startDate")));
}

// ==========================================
// 无BOM订单与缺失物料行
// ==========================================

#[test]
fn test_BOM行引用未知物料按零库存处理() {
    for env in ApiTestEnv::all_backends() {
        // 给订单#002的BOM追加一条指向不存在物料的行
        env.insert_bom_line(2, 999, 1);

        let orders = env.order_api.list_orders().expect("查询失败");
        let order2 = orders.iter().find(|o| o.order_id == 2).unwrap();
        let ghost = order2
            .bom_items
            .iter()
            .find(|item| item.material_id == 999)
            .expect("未知物料行应保留在视图中");
        assert_eq!(ghost.stock_qty, 0, "[{}]", env.backend_name());
        assert!(!ghost.available);
        assert!(order2.has_shortage);
    }
}

#[test]
fn test_种子数据幂等() {
    for env in ApiTestEnv::all_backends() {
        // 再次种子不应重复写入
        env.storage.seed_demo_data().expect("二次种子失败");
        let materials = env.material_api.list_materials().expect("查询失败");
        assert_eq!(materials.len(), 3, "[{}]", env.backend_name());
        let orders = env.order_api.list_orders().expect("查询失败");
        assert_eq!(orders.len(), 2);
    }
}
