// ==========================================
// 测试数据构建器
// ==========================================
// 职责: 用链式方式构造API层请求对象，减少用例样板
// ==========================================

use chrono::{DateTime, NaiveDate, Utc};

use workshop_mes::api::{CreatePlannedRequest, CreateProductionLogRequest, UpdateOrderRequest};

// ==========================================
// 生产日志请求构建器
// ==========================================
pub struct LogRequestBuilder {
    request: CreateProductionLogRequest,
}

impl LogRequestBuilder {
    /// 最小合法请求（order_id=1, 工位 WS-01, 良品 0）
    pub fn new(order_id: i64) -> Self {
        Self {
            request: CreateProductionLogRequest {
                order_id: Some(order_id),
                workstation_id: Some("WS-01".to_string()),
                qty_good: Some(0),
                qty_reject: None,
                downtime_minutes: None,
                reason: None,
                timestamp: None,
            },
        }
    }

    pub fn workstation(mut self, id: &str) -> Self {
        self.request.workstation_id = Some(id.to_string());
        self
    }

    pub fn qty_good(mut self, qty: i64) -> Self {
        self.request.qty_good = Some(qty);
        self
    }

    pub fn qty_reject(mut self, qty: i64) -> Self {
        self.request.qty_reject = Some(qty);
        self
    }

    pub fn downtime_minutes(mut self, minutes: i64) -> Self {
        self.request.downtime_minutes = Some(minutes);
        self
    }

    pub fn reason(mut self, reason: &str) -> Self {
        self.request.reason = Some(reason.to_string());
        self
    }

    pub fn timestamp(mut self, ts: DateTime<Utc>) -> Self {
        self.request.timestamp = Some(ts);
        self
    }

    /// 清除必填字段（校验用例）
    pub fn without_qty_good(mut self) -> Self {
        self.request.qty_good = None;
        self
    }

    pub fn without_workstation(mut self) -> Self {
        self.request.workstation_id = None;
        self
    }

    pub fn build(self) -> CreateProductionLogRequest {
        self.request
    }
}

// ==========================================
// 计划生产请求构建器
// ==========================================
pub struct PlannedRequestBuilder {
    request: CreatePlannedRequest,
}

impl PlannedRequestBuilder {
    pub fn new(order_id: i64, planned_date: NaiveDate, quantity: i64) -> Self {
        Self {
            request: CreatePlannedRequest {
                order_id: Some(order_id),
                planned_date: Some(planned_date),
                quantity: Some(quantity),
                workstation_id: None,
                status: None,
            },
        }
    }

    pub fn workstation(mut self, id: &str) -> Self {
        self.request.workstation_id = Some(id.to_string());
        self
    }

    pub fn without_quantity(mut self) -> Self {
        self.request.quantity = None;
        self
    }

    pub fn build(self) -> CreatePlannedRequest {
        self.request
    }
}

// ==========================================
// 订单日期更新请求
// ==========================================
pub fn update_order_request(order_id: i64, start: &str, end: &str) -> UpdateOrderRequest {
    UpdateOrderRequest {
        order_id: Some(order_id),
        start_date: Some(start.to_string()),
        end_date: Some(end.to_string()),
    }
}
