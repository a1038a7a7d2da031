// ==========================================
// 车间生产计划与执行系统 - KPI 聚合
// ==========================================
// 职责: 由生产日志累计值与订单缺料情况组装总览指标
// 约束: 纯计算，数据由仓储层提供
// ==========================================

use serde::{Deserialize, Serialize};

/// 生产日志累计值（仓储层聚合结果）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProductionTotals {
    pub log_count: i64,
    pub total_good: i64,
    pub total_reject: i64,
    pub total_downtime_minutes: i64,
}

/// KPI 总览（对外 JSON 形状）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KpiOverview {
    pub log_count: i64,
    pub total_good: i64,
    pub total_reject: i64,
    pub total_downtime_minutes: i64,
    /// 不良率 = reject / (good + reject)，无产量时为 0
    pub reject_rate: f64,
    pub order_count: i64,
    pub shortage_order_count: i64,
}

/// 组装 KPI 总览
pub fn build_overview(
    totals: ProductionTotals,
    order_count: i64,
    shortage_order_count: i64,
) -> KpiOverview {
    let produced = totals.total_good + totals.total_reject;
    let reject_rate = if produced > 0 {
        totals.total_reject as f64 / produced as f64
    } else {
        0.0
    };

    KpiOverview {
        log_count: totals.log_count,
        total_good: totals.total_good,
        total_reject: totals.total_reject,
        total_downtime_minutes: totals.total_downtime_minutes,
        reject_rate,
        order_count,
        shortage_order_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_无日志时不良率为零() {
        let overview = build_overview(ProductionTotals::default(), 2, 1);
        assert_eq!(overview.reject_rate, 0.0);
        assert_eq!(overview.order_count, 2);
        assert_eq!(overview.shortage_order_count, 1);
    }

    #[test]
    fn test_不良率计算() {
        let totals = ProductionTotals {
            log_count: 2,
            total_good: 90,
            total_reject: 10,
            total_downtime_minutes: 15,
        };
        let overview = build_overview(totals, 0, 0);
        assert!((overview.reject_rate - 0.1).abs() < 1e-9);
    }
}
