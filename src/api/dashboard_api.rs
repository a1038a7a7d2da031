// ==========================================
// 车间生产计划与执行系统 - 看板 API
// ==========================================
// 职责: KPI 总览聚合（生产日志累计值 + 订单缺料统计）
// 说明: 同一入口供 HTTP 查询与周期广播复用
// ==========================================

use std::sync::Arc;

use crate::api::error::ApiResult;
use crate::engine::kpi::{build_overview, KpiOverview};
use crate::repository::{OrderRepository, ProductionLogRepository};

// ==========================================
// DashboardApi - 看板 API
// ==========================================
pub struct DashboardApi {
    log_repo: Arc<ProductionLogRepository>,
    order_repo: Arc<OrderRepository>,
}

impl DashboardApi {
    pub fn new(log_repo: Arc<ProductionLogRepository>, order_repo: Arc<OrderRepository>) -> Self {
        Self {
            log_repo,
            order_repo,
        }
    }

    /// KPI 总览
    ///
    /// 指标: 日志数/良品/不良品/停机分钟累计、不良率、
    ///       订单总数与当前缺料订单数（实时重算口径）
    pub fn kpi_overview(&self) -> ApiResult<KpiOverview> {
        let totals = self.log_repo.totals()?;
        let orders = self.order_repo.list()?;
        let order_count = orders.len() as i64;
        let shortage_order_count = orders.iter().filter(|o| o.has_shortage).count() as i64;
        Ok(build_overview(totals, order_count, shortage_order_count))
    }
}
