// ==========================================
// 车间生产计划与执行系统 - 内存后端
// ==========================================
// 职责: 无数据库配置时承载全部数据（进程生命周期内有效）
// 形态: 单一结构体持有各实体类型化集合，显式注入仓储层，
//       不使用模块级可变全局
// 已知限制: 各集合独立加锁，跨集合操作无同步——
//           单实例低并发内部工具可接受
// ==========================================

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;

use crate::domain::{
    Alert, BomLine, DowntimeLog, Material, OrderRecord, PlannedProduction, ProductionLog,
};

// ==========================================
// MemoryStore - 进程内数据集合
// ==========================================
#[derive(Default)]
pub struct MemoryStore {
    pub materials: Mutex<Vec<Material>>,
    pub orders: Mutex<Vec<OrderRecord>>,
    pub bom_lines: Mutex<Vec<BomLine>>,
    pub production_logs: Mutex<Vec<ProductionLog>>,
    pub planned: Mutex<Vec<PlannedProduction>>,
    pub alerts: Mutex<Vec<Alert>>,
    pub downtime_logs: Mutex<Vec<DowntimeLog>>,

    // 自增主键计数器（删除后不复用，与 AUTOINCREMENT 语义对齐）
    next_log_id: AtomicI64,
    next_planned_id: AtomicI64,
    next_alert_id: AtomicI64,
    next_downtime_id: AtomicI64,
}

impl MemoryStore {
    /// 创建空的内存存储（启动时集合为空）
    pub fn new() -> Self {
        Self {
            next_log_id: AtomicI64::new(1),
            next_planned_id: AtomicI64::new(1),
            next_alert_id: AtomicI64::new(1),
            next_downtime_id: AtomicI64::new(1),
            ..Default::default()
        }
    }

    pub fn next_log_id(&self) -> i64 {
        self.next_log_id.fetch_add(1, Ordering::SeqCst)
    }

    pub fn next_planned_id(&self) -> i64 {
        self.next_planned_id.fetch_add(1, Ordering::SeqCst)
    }

    pub fn next_alert_id(&self) -> i64 {
        self.next_alert_id.fetch_add(1, Ordering::SeqCst)
    }

    pub fn next_downtime_id(&self) -> i64 {
        self.next_downtime_id.fetch_add(1, Ordering::SeqCst)
    }
}
