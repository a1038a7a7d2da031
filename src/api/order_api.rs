// ==========================================
// 车间生产计划与执行系统 - 订单 API
// ==========================================
// 职责: 订单查询（含缺料派生）、排产日期更新（看板拖拽落库）
// 约束: 日期必填与格式校验在此边界完成；
//       不做任何排程优化——日期由人工拖拽决定
// ==========================================

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::debug;

use crate::api::error::{ApiError, ApiResult};
use crate::domain::OrderView;
use crate::repository::OrderRepository;
use crate::services::events::{EventBus, WsEvent};

/// 订单日期更新请求（字段名保持前端契约）
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateOrderRequest {
    #[serde(rename = "orderId")]
    pub order_id: Option<i64>,
    #[serde(rename = "startDate")]
    pub start_date: Option<String>,
    #[serde(rename = "endDate")]
    pub end_date: Option<String>,
}

// ==========================================
// OrderApi - 订单 API
// ==========================================
pub struct OrderApi {
    order_repo: Arc<OrderRepository>,
    events: EventBus,
}

impl OrderApi {
    pub fn new(order_repo: Arc<OrderRepository>, events: EventBus) -> Self {
        Self { order_repo, events }
    }

    /// 查询全部订单（start_date 升序，bom_items / hasShortage 实时重算）
    pub fn list_orders(&self) -> ApiResult<Vec<OrderView>> {
        Ok(self.order_repo.list()?)
    }

    /// 更新订单起止日期
    ///
    /// # 校验
    /// - orderId / startDate / endDate 均必填，缺失即 InvalidInput（400）
    /// - 日期必须为 ISO 格式（YYYY-MM-DD）
    /// - 未知 orderId → NotFound（404），所有订单保持不变
    pub fn update_order_dates(&self, req: UpdateOrderRequest) -> ApiResult<OrderView> {
        let order_id = req
            .order_id
            .ok_or_else(|| ApiError::InvalidInput("orderId 字段缺失".to_string()))?;
        let start_date = parse_required_date(req.start_date.as_deref(), "startDate")?;
        let end_date = parse_required_date(req.end_date.as_deref(), "endDate")?;

        let order = self.order_repo.update_dates(order_id, start_date, end_date)?;
        debug!(
            "订单日期更新: order_id={} start={} end={}",
            order_id, start_date, end_date
        );
        self.events.publish(&WsEvent::OrdersUpdate {
            order: order.clone(),
        });
        Ok(order)
    }
}

/// 必填日期字段解析（缺失/空串/格式错误均为 InvalidInput）
fn parse_required_date(value: Option<&str>, field: &str) -> ApiResult<NaiveDate> {
    let raw = value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::InvalidInput(format!("{} 字段缺失", field)))?;
    raw.parse::<NaiveDate>()
        .map_err(|_| ApiError::InvalidInput(format!("{} 不是有效日期(YYYY-MM-DD): {}", field, raw)))
}
