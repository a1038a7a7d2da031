// ==========================================
// ERP 适配器集成测试
// ==========================================
// 测试范围:
// 1. 配置键解析与回落策略（启动时解析一次）
// 2. Mock 适配器的固定演示数据契约
// ==========================================

use workshop_mes::erp::{create_adapter, ErpAdapter, MockErpAdapter};

// ==========================================
// 配置键解析
// ==========================================

#[tokio::test]
async fn test_未知配置键回落mock且可用() {
    // 未知键不报错，回落到 mock 并正常响应
    let adapter = create_adapter("some-future-erp");
    let details = adapter.get_order_details("PO-1").await.expect("查询失败");
    assert_eq!(details.order_name, "MOCK-ORDER-PO-1");
}

#[tokio::test]
async fn test_预留变体当前别名到mock() {
    for key in ["sap", "Dynamics", "ODOO", "mock", ""] {
        let adapter = create_adapter(key);
        let bom = adapter.get_bom("PO-1").await.expect("查询失败");
        assert_eq!(bom.len(), 2, "key={}", key);
    }
}

// ==========================================
// Mock 数据契约
// ==========================================

#[tokio::test]
async fn test_mock_订单详情() {
    let adapter = MockErpAdapter::new();
    let details = adapter.get_order_details("PO-42").await.expect("查询失败");

    assert_eq!(details.order_id, "PO-42");
    assert_eq!(details.order_name, "MOCK-ORDER-PO-42");
    assert_eq!(details.operations.len(), 2);
    assert_eq!(details.operations[0].name, "Cutting");
    assert_eq!(details.operations[1].name, "Assembly");
}

#[tokio::test]
async fn test_mock_BOM与可用性() {
    let adapter = MockErpAdapter::new();

    let bom = adapter.get_bom("PO-1").await.expect("查询失败");
    assert_eq!(bom[0].material_name, "Steel Plate");
    assert_eq!(bom[0].qty_required, 10);
    assert_eq!(bom[1].material_name, "Aluminum Sheet");

    let availability = adapter
        .get_material_availability("PO-1")
        .await
        .expect("查询失败");
    assert_eq!(availability.order_id, "PO-1");
    assert_eq!(availability.items.len(), 2);
    assert!(availability.items.iter().all(|i| i.available_qty >= i.required_qty));
}

#[tokio::test]
async fn test_mock_工序SMV与兜底值() {
    let adapter = MockErpAdapter::new();
    assert_eq!(adapter.get_operation_smv("PO-1", 1).await.unwrap(), 3.5);
    assert_eq!(adapter.get_operation_smv("PO-1", 2).await.unwrap(), 5.2);
    // 未知工序返回兜底 SMV 而不是报错
    assert_eq!(adapter.get_operation_smv("PO-1", 99).await.unwrap(), 4.0);
}
