// ==========================================
// 车间生产计划与执行系统 - 订单领域模型
// ==========================================
// 红线: hasShortage / bom_items 为派生字段，不落库——
//       每次读取时从当前物料库存实时重算
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::types::OrderStatus;

// ==========================================
// OrderRecord - 生产订单（持久化部分）
// ==========================================
// 对齐: orders 表
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRecord {
    // ===== 主键 =====
    pub order_id: i64, // 订单唯一标识

    // ===== 基础信息 =====
    pub order_name: String,     // 订单名称
    pub start_date: NaiveDate,  // 计划开始日期
    pub end_date: NaiveDate,    // 计划结束日期
    pub bom_id: Option<i64>,    // BOM 标识（无 BOM 的订单为 None）
    pub status: OrderStatus,    // 订单状态
}

// ==========================================
// BomLine - BOM 行（持久化部分）
// ==========================================
// 红线: 核心读路径只读，不提供修改操作
// 对齐: bom 表
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BomLine {
    pub bom_id: i64,       // BOM 标识（同一订单的行共享）
    pub material_id: i64,  // 物料标识
    pub qty_required: i64, // 需求数量
}

// ==========================================
// BomItemView - BOM 行视图（派生）
// ==========================================
// 每行携带实时库存与可用性判定，仅在读取时构建
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BomItemView {
    pub material_id: i64,
    pub material_name: String,
    pub qty_required: i64,
    pub stock_qty: i64,
    pub available: bool, // stock_qty >= qty_required
}

// ==========================================
// OrderView - 订单视图（对外 JSON 形状）
// ==========================================
// 持久化字段 + 派生的 bom_items / hasShortage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderView {
    pub order_id: i64,
    pub order_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub bom_id: Option<i64>,
    pub status: OrderStatus,
    pub bom_items: Vec<BomItemView>,
    /// 缺料标志：任一 BOM 行不可用即为 true（字段名保持前端契约）
    #[serde(rename = "hasShortage")]
    pub has_shortage: bool,
}
