// ==========================================
// 车间生产计划与执行系统 - 订单仓储
// ==========================================
// 职责: 订单读路径（含 BOM 关联与缺料派生）与日期更新
// 红线: bom_items / hasShortage 永远在读取时由当前库存重算，
//       两种后端共用 engine::shortage，口径一致
// ==========================================

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use rusqlite::{params, Result as SqliteResult};

use crate::domain::{OrderRecord, OrderView};
use crate::domain::types::OrderStatus;
use crate::engine::shortage::{build_bom_items, has_shortage, BomJoinRow};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::{lock_conn, lock_store, parse_date};
use crate::storage::StorageBackend;

// ==========================================
// OrderRepository - 订单仓储
// ==========================================
pub struct OrderRepository {
    storage: Arc<StorageBackend>,
}

impl OrderRepository {
    pub fn new(storage: Arc<StorageBackend>) -> Self {
        Self { storage }
    }

    /// 查询全部订单（按 start_date 升序），携带派生的 bom_items 与缺料标志
    pub fn list(&self) -> RepositoryResult<Vec<OrderView>> {
        let records = self.load_records()?;
        let bom_map = self.load_bom_join()?;
        Ok(records
            .into_iter()
            .map(|record| assemble_view(record, &bom_map))
            .collect())
    }

    /// 按 order_id 查询单个订单视图
    pub fn get(&self, order_id: i64) -> RepositoryResult<OrderView> {
        self.list()?
            .into_iter()
            .find(|o| o.order_id == order_id)
            .ok_or_else(|| RepositoryError::not_found("Order", order_id))
    }

    /// 更新订单起止日期（仅这两个字段），返回重算后的完整视图
    pub fn update_dates(
        &self,
        order_id: i64,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> RepositoryResult<OrderView> {
        match self.storage.as_ref() {
            StorageBackend::Sqlite(conn) => {
                let rows = {
                    let conn = lock_conn(conn)?;
                    conn.execute(
                        "UPDATE orders SET start_date = ?1, end_date = ?2 WHERE order_id = ?3",
                        params![start_date.to_string(), end_date.to_string(), order_id],
                    )?
                };
                if rows == 0 {
                    return Err(RepositoryError::not_found("Order", order_id));
                }
            }
            StorageBackend::Memory(store) => {
                let mut orders = lock_store(&store.orders)?;
                let order = orders
                    .iter_mut()
                    .find(|o| o.order_id == order_id)
                    .ok_or_else(|| RepositoryError::not_found("Order", order_id))?;
                order.start_date = start_date;
                order.end_date = end_date;
            }
        }
        self.get(order_id)
    }

    // ==========================================
    // 内部读取
    // ==========================================

    /// 读取订单持久化记录（start_date 升序）
    fn load_records(&self) -> RepositoryResult<Vec<OrderRecord>> {
        match self.storage.as_ref() {
            StorageBackend::Sqlite(conn) => {
                let conn = lock_conn(conn)?;
                let mut stmt = conn.prepare(
                    "SELECT order_id, order_name, start_date, end_date, bom_id, status
                     FROM orders ORDER BY start_date ASC",
                )?;
                let records = stmt
                    .query_map([], |row| {
                        Ok(OrderRecord {
                            order_id: row.get(0)?,
                            order_name: row.get(1)?,
                            start_date: parse_date(row.get::<_, String>(2)?, 2)?,
                            end_date: parse_date(row.get::<_, String>(3)?, 3)?,
                            bom_id: row.get(4)?,
                            status: OrderStatus::from_str(&row.get::<_, String>(5)?),
                        })
                    })?
                    .collect::<SqliteResult<Vec<_>>>()?;
                Ok(records)
            }
            StorageBackend::Memory(store) => {
                let orders = lock_store(&store.orders)?;
                let mut records: Vec<OrderRecord> = orders.clone();
                records.sort_by_key(|o| o.start_date);
                Ok(records)
            }
        }
    }

    /// 读取 BOM 行与当前物料库存的关联结果，按 bom_id 分组
    ///
    /// 物料缺失的行以 stock_qty=0 / 空名称兜底（两种后端一致）。
    fn load_bom_join(&self) -> RepositoryResult<HashMap<i64, Vec<BomJoinRow>>> {
        let mut map: HashMap<i64, Vec<BomJoinRow>> = HashMap::new();
        match self.storage.as_ref() {
            StorageBackend::Sqlite(conn) => {
                let conn = lock_conn(conn)?;
                let mut stmt = conn.prepare(
                    "SELECT b.bom_id, b.material_id,
                            COALESCE(m.material_name, ''), b.qty_required,
                            COALESCE(m.stock_qty, 0)
                     FROM bom b
                     LEFT JOIN materials m ON m.material_id = b.material_id",
                )?;
                let rows = stmt
                    .query_map([], |row| {
                        Ok((
                            row.get::<_, i64>(0)?,
                            BomJoinRow {
                                material_id: row.get(1)?,
                                material_name: row.get(2)?,
                                qty_required: row.get(3)?,
                                stock_qty: row.get(4)?,
                            },
                        ))
                    })?
                    .collect::<SqliteResult<Vec<_>>>()?;
                for (bom_id, row) in rows {
                    map.entry(bom_id).or_default().push(row);
                }
            }
            StorageBackend::Memory(store) => {
                let bom_lines = lock_store(&store.bom_lines)?;
                let materials = lock_store(&store.materials)?;
                for line in bom_lines.iter() {
                    let material = materials.iter().find(|m| m.material_id == line.material_id);
                    map.entry(line.bom_id).or_default().push(BomJoinRow {
                        material_id: line.material_id,
                        material_name: material
                            .map(|m| m.material_name.clone())
                            .unwrap_or_default(),
                        qty_required: line.qty_required,
                        stock_qty: material.map(|m| m.stock_qty).unwrap_or(0),
                    });
                }
            }
        }
        Ok(map)
    }
}

/// 由持久化记录 + BOM 关联结果组装订单视图
fn assemble_view(record: OrderRecord, bom_map: &HashMap<i64, Vec<BomJoinRow>>) -> OrderView {
    let rows = record
        .bom_id
        .and_then(|bom_id| bom_map.get(&bom_id))
        .map(|rows| rows.as_slice())
        .unwrap_or(&[]);
    let bom_items = build_bom_items(rows);
    let shortage = has_shortage(&bom_items);

    OrderView {
        order_id: record.order_id,
        order_name: record.order_name,
        start_date: record.start_date,
        end_date: record.end_date,
        bom_id: record.bom_id,
        status: record.status,
        bom_items,
        has_shortage: shortage,
    }
}
