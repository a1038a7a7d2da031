// ==========================================
// 车间生产计划与执行系统 - 齐套/缺料判定引擎
// ==========================================
// 职责: 对订单的 BOM 关联行做可用性判定与缺料聚合
// 红线: 判定只依赖传入的实时库存快照——两种存储后端
//       读取路径共用本模块，保证缺料口径完全一致
// 不变量: has_shortage == 任一 BOM 行 stock_qty < qty_required
// 边界: 无 BOM 行的订单 bom_items=[]，has_shortage=false
// ==========================================

use crate::domain::BomItemView;

/// BOM 关联行（订单 → BOM → 物料 join 后的一行）
///
/// 说明: 物料缺失的 BOM 行由上游以 stock_qty=0 传入（视为不可用），
/// 两种后端处理一致。
#[derive(Debug, Clone)]
pub struct BomJoinRow {
    pub material_id: i64,
    pub material_name: String,
    pub qty_required: i64,
    pub stock_qty: i64,
}

/// 构建 BOM 行视图：逐行判定 available = stock_qty >= qty_required
pub fn build_bom_items(rows: &[BomJoinRow]) -> Vec<BomItemView> {
    rows.iter()
        .map(|r| BomItemView {
            material_id: r.material_id,
            material_name: r.material_name.clone(),
            qty_required: r.qty_required,
            stock_qty: r.stock_qty,
            available: r.stock_qty >= r.qty_required,
        })
        .collect()
}

/// 订单级缺料聚合：任一行不可用即缺料
pub fn has_shortage(items: &[BomItemView]) -> bool {
    items.iter().any(|item| !item.available)
}
