// ==========================================
// 车间生产计划与执行系统 - 数据仓储层
// ==========================================
// 职责: 提供数据访问接口,屏蔽存储后端差异
// 红线: Repository 不含业务校验（边界层职责），
//       仅在未知标识时抛 NotFound
// 约束: 所有 SQL 查询使用参数化,防止 SQL 注入
// ==========================================

pub mod alert_repo;
pub mod downtime_repo;
pub mod error;
pub mod material_repo;
pub mod order_repo;
pub mod planned_repo;
pub mod production_log_repo;

// 重导出核心仓储
pub use alert_repo::AlertRepository;
pub use downtime_repo::{DowntimeLogRepository, NewDowntimeLog};
pub use error::{RepositoryError, RepositoryResult};
pub use material_repo::MaterialRepository;
pub use order_repo::OrderRepository;
pub use planned_repo::{NewPlannedProduction, PlannedProductionRepository};
pub use production_log_repo::{NewProductionLog, ProductionLogRepository};

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::Connection;
use std::sync::{Mutex, MutexGuard};

/// 获取 SQLite 连接（锁中毒转为 LockError）
pub(crate) fn lock_conn(conn: &Mutex<Connection>) -> RepositoryResult<MutexGuard<'_, Connection>> {
    conn.lock()
        .map_err(|e| RepositoryError::LockError(e.to_string()))
}

/// 获取内存集合锁（锁中毒转为 LockError）
pub(crate) fn lock_store<T>(collection: &Mutex<T>) -> RepositoryResult<MutexGuard<'_, T>> {
    collection
        .lock()
        .map_err(|e| RepositoryError::LockError(e.to_string()))
}

/// 解析 TEXT 列中的 RFC3339 时间戳（行映射闭包内使用）
pub(crate) fn parse_datetime(s: String, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(&s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
        })
}

/// 解析 TEXT 列中的 ISO 日期（行映射闭包内使用）
pub(crate) fn parse_date(s: String, idx: usize) -> rusqlite::Result<NaiveDate> {
    s.parse::<NaiveDate>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}
