// ==========================================
// 车间生产计划与执行系统 - 存储后端
// ==========================================
// 职责: 持久化(SQLite)与内存两种后端的显式抽象
// 约束: 后端在进程启动时选择一次，注入各仓储——
//       不做惰性全局单例，不在调用点散落 None 判断
// 约束: 数据库缺省/打开失败不是错误，降级为内存后端继续运行
// ==========================================

pub mod memory;

pub use memory::MemoryStore;

use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::{params, Connection};

use crate::db::{open_sqlite_connection, table_exists};
use crate::domain::types::OrderStatus;
use crate::domain::{BomLine, Material, OrderRecord};

// ==========================================
// 建表语句（幂等，IF NOT EXISTS）
// ==========================================
const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS materials (
    material_id   INTEGER PRIMARY KEY AUTOINCREMENT,
    material_name TEXT NOT NULL,
    stock_qty     INTEGER NOT NULL DEFAULT 0,
    unit          TEXT,
    created_at    TEXT NOT NULL,
    updated_at    TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS orders (
    order_id   INTEGER PRIMARY KEY AUTOINCREMENT,
    order_name TEXT NOT NULL,
    start_date TEXT NOT NULL,
    end_date   TEXT NOT NULL,
    bom_id     INTEGER,
    status     TEXT NOT NULL DEFAULT 'planned'
);

CREATE TABLE IF NOT EXISTS bom (
    bom_id       INTEGER NOT NULL,
    material_id  INTEGER NOT NULL,
    qty_required INTEGER NOT NULL,
    PRIMARY KEY (bom_id, material_id)
);

CREATE TABLE IF NOT EXISTS production_logs (
    id               INTEGER PRIMARY KEY AUTOINCREMENT,
    order_id         INTEGER NOT NULL,
    workstation_id   TEXT NOT NULL,
    qty_good         INTEGER NOT NULL,
    qty_reject       INTEGER NOT NULL DEFAULT 0,
    downtime_minutes INTEGER NOT NULL DEFAULT 0,
    reason           TEXT,
    timestamp        TEXT NOT NULL,
    created_at       TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_production_logs_timestamp ON production_logs(timestamp);

CREATE TABLE IF NOT EXISTS planned_production (
    id             INTEGER PRIMARY KEY AUTOINCREMENT,
    order_id       INTEGER NOT NULL,
    planned_date   TEXT NOT NULL,
    quantity       INTEGER NOT NULL,
    workstation_id TEXT,
    status         TEXT NOT NULL DEFAULT 'planned',
    created_at     TEXT NOT NULL,
    updated_at     TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_planned_production_date ON planned_production(planned_date);

CREATE TABLE IF NOT EXISTS alerts (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    level        TEXT NOT NULL,
    message      TEXT NOT NULL,
    acknowledged INTEGER NOT NULL DEFAULT 0,
    created_at   TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS downtime_logs (
    id             INTEGER PRIMARY KEY AUTOINCREMENT,
    workstation_id TEXT NOT NULL,
    reason         TEXT NOT NULL,
    start_time     TEXT NOT NULL,
    end_time       TEXT,
    created_at     TEXT NOT NULL
);
"#;

// ==========================================
// StorageBackend - 双后端抽象
// ==========================================
/// 存储后端
///
/// 两种变体对外契约完全一致；仓储层按变体分支到
/// 参数化 SQL 或内存集合操作。
pub enum StorageBackend {
    /// 持久化后端（共享连接，busy_timeout 见 db.rs）
    Sqlite(Arc<Mutex<Connection>>),
    /// 内存后端（进程生命周期，重启不保留）
    Memory(Arc<MemoryStore>),
}

impl StorageBackend {
    /// 按配置选择后端（进程启动时调用一次）
    ///
    /// # 降级策略
    /// - DATABASE_PATH 未配置 → 内存后端
    /// - SQLite 打开/建表失败 → 告警后降级内存后端（不中断启动）
    pub fn from_config(database_path: Option<&str>) -> Self {
        match database_path {
            Some(path) => match Self::open_sqlite(path) {
                Ok(backend) => {
                    tracing::info!("使用 SQLite 后端: {}", path);
                    backend
                }
                Err(e) => {
                    tracing::warn!("SQLite 初始化失败({})，降级为内存后端", e);
                    Self::memory()
                }
            },
            None => {
                tracing::info!("未配置 DATABASE_PATH，使用内存后端");
                Self::memory()
            }
        }
    }

    /// 打开 SQLite 后端并初始化 schema
    pub fn open_sqlite(db_path: &str) -> Result<Self> {
        let conn = open_sqlite_connection(db_path)
            .with_context(|| format!("无法打开数据库: {}", db_path))?;
        conn.execute_batch(SCHEMA_SQL).context("schema 初始化失败")?;
        Ok(StorageBackend::Sqlite(Arc::new(Mutex::new(conn))))
    }

    /// 创建空的内存后端
    pub fn memory() -> Self {
        StorageBackend::Memory(Arc::new(MemoryStore::new()))
    }

    /// 写入演示种子数据（幂等：已有物料时跳过）
    ///
    /// 种子内容与演示前端约定一致：
    /// - 物料: Steel Plate=15 / Aluminum Sheet=8 / Copper Wire=15
    /// - 订单: #001 (BOM1: 钢板x10 + 铝板x5), #002 (BOM2: 铜线x20)
    pub fn seed_demo_data(&self) -> Result<()> {
        match self {
            StorageBackend::Sqlite(conn) => {
                let conn = conn.lock().map_err(|e| anyhow::anyhow!("锁获取失败: {}", e))?;
                if !table_exists(&conn, "materials")? {
                    anyhow::bail!("materials 表不存在，schema 未初始化");
                }
                let count: i64 =
                    conn.query_row("SELECT COUNT(*) FROM materials", [], |row| row.get(0))?;
                if count > 0 {
                    return Ok(());
                }

                let now = chrono::Utc::now().to_rfc3339();
                for m in demo_materials() {
                    conn.execute(
                        "INSERT INTO materials (material_id, material_name, stock_qty, unit, created_at, updated_at)
                         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                        params![m.material_id, m.material_name, m.stock_qty, m.unit, now, now],
                    )?;
                }
                for o in demo_orders() {
                    conn.execute(
                        "INSERT INTO orders (order_id, order_name, start_date, end_date, bom_id, status)
                         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                        params![
                            o.order_id,
                            o.order_name,
                            o.start_date.to_string(),
                            o.end_date.to_string(),
                            o.bom_id,
                            o.status.as_str(),
                        ],
                    )?;
                }
                for b in demo_bom_lines() {
                    conn.execute(
                        "INSERT INTO bom (bom_id, material_id, qty_required) VALUES (?1, ?2, ?3)",
                        params![b.bom_id, b.material_id, b.qty_required],
                    )?;
                }
                tracing::info!("SQLite 演示种子数据写入完成");
                Ok(())
            }
            StorageBackend::Memory(store) => {
                let mut materials = store
                    .materials
                    .lock()
                    .map_err(|e| anyhow::anyhow!("锁获取失败: {}", e))?;
                if !materials.is_empty() {
                    return Ok(());
                }
                *materials = demo_materials();
                drop(materials);

                *store
                    .orders
                    .lock()
                    .map_err(|e| anyhow::anyhow!("锁获取失败: {}", e))? = demo_orders();
                *store
                    .bom_lines
                    .lock()
                    .map_err(|e| anyhow::anyhow!("锁获取失败: {}", e))? = demo_bom_lines();
                tracing::info!("内存演示种子数据写入完成");
                Ok(())
            }
        }
    }
}

// ==========================================
// 演示种子数据
// ==========================================

fn demo_materials() -> Vec<Material> {
    vec![
        Material::new(1, "Steel Plate", 15, Some("pieces")),
        Material::new(2, "Aluminum Sheet", 8, Some("pieces")),
        Material::new(3, "Copper Wire", 15, Some("meters")),
    ]
}

fn demo_orders() -> Vec<OrderRecord> {
    vec![
        OrderRecord {
            order_id: 1,
            order_name: "Production Order #001".to_string(),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 1, 20).unwrap(),
            bom_id: Some(1),
            status: OrderStatus::InProgress,
        },
        OrderRecord {
            order_id: 2,
            order_name: "Production Order #002".to_string(),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 22).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 1, 25).unwrap(),
            bom_id: Some(2),
            status: OrderStatus::Planned,
        },
    ]
}

fn demo_bom_lines() -> Vec<BomLine> {
    vec![
        BomLine { bom_id: 1, material_id: 1, qty_required: 10 },
        BomLine { bom_id: 1, material_id: 2, qty_required: 5 },
        BomLine { bom_id: 2, material_id: 3, qty_required: 20 },
    ]
}
