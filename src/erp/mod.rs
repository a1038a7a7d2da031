// ==========================================
// 车间生产计划与执行系统 - ERP 适配器
// ==========================================
// 职责: 对接外部 ERP 的多态能力接口（策略模式，无内部状态机）
// 约束: 适配器在启动阶段按配置键解析一次，未知/缺省键
//       回落 mock，永不失败、不做逐调用查找
// ==========================================

pub mod mock;

pub use mock::MockErpAdapter;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// ERP 调用结果
pub type ErpResult<T> = anyhow::Result<T>;

// ==========================================
// 数据形状（对外 JSON 契约）
// ==========================================

/// 订单详情（含工序列表）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErpOrderDetails {
    pub order_id: String,
    pub order_name: String,
    pub operations: Vec<ErpOperation>,
}

/// 工序（含标准工时 SMV，分钟）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErpOperation {
    pub operation_id: i64,
    pub name: String,
    pub smv: f64,
}

/// BOM 行
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErpBomLine {
    pub material_id: i64,
    pub material_name: String,
    pub qty_required: i64,
}

/// 物料可用性
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErpMaterialAvailability {
    pub order_id: String,
    pub items: Vec<ErpAvailabilityItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErpAvailabilityItem {
    pub material_id: i64,
    pub available_qty: i64,
    pub required_qty: i64,
}

// ==========================================
// ErpAdapter - 能力接口
// ==========================================
#[async_trait]
pub trait ErpAdapter: Send + Sync {
    /// 查询订单详情
    async fn get_order_details(&self, order_id: &str) -> ErpResult<ErpOrderDetails>;

    /// 查询订单 BOM
    async fn get_bom(&self, order_id: &str) -> ErpResult<Vec<ErpBomLine>>;

    /// 查询物料可用性
    async fn get_material_availability(&self, order_id: &str)
        -> ErpResult<ErpMaterialAvailability>;

    /// 查询工序标准工时（分钟）
    async fn get_operation_smv(&self, order_id: &str, operation_id: i64) -> ErpResult<f64>;
}

// ==========================================
// 变体注册表
// ==========================================

/// ERP 适配器变体
///
/// sap / dynamics / odoo 为未来集成预留，当前别名到 mock。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErpAdapterKind {
    Mock,
    SapStub,
    DynamicsStub,
    OdooStub,
}

impl ErpAdapterKind {
    /// 按配置键解析（大小写不敏感，未知值回落 Mock）
    pub fn from_key(key: &str) -> Self {
        match key.trim().to_lowercase().as_str() {
            "sap" => ErpAdapterKind::SapStub,
            "dynamics" => ErpAdapterKind::DynamicsStub,
            "odoo" => ErpAdapterKind::OdooStub,
            "mock" | "" => ErpAdapterKind::Mock,
            other => {
                tracing::warn!("未知 ERP_ADAPTER 配置值 '{}'，回落 mock", other);
                ErpAdapterKind::Mock
            }
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ErpAdapterKind::Mock => "mock",
            ErpAdapterKind::SapStub => "sap",
            ErpAdapterKind::DynamicsStub => "dynamics",
            ErpAdapterKind::OdooStub => "odoo",
        }
    }
}

/// 解析配置键并构造适配器实例（启动阶段调用一次）
///
/// 当前只有 mock 有真实实现，其余变体别名到 mock。
pub fn create_adapter(key: &str) -> Arc<dyn ErpAdapter> {
    let kind = ErpAdapterKind::from_key(key);
    tracing::info!("ERP 适配器: {}", kind.as_str());
    match kind {
        ErpAdapterKind::Mock
        | ErpAdapterKind::SapStub
        | ErpAdapterKind::DynamicsStub
        | ErpAdapterKind::OdooStub => Arc::new(MockErpAdapter::new()),
    }
}
