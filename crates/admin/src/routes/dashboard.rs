//! Dashboard statistics.
//!
//! Aggregation runs server-side over the full order set so the SPA renders
//! one response instead of re-deriving figures client-side. The numbers are
//! computed by a pure function over the orders with an injected clock,
//! which keeps the month boundary logic unit-testable.

use axum::{Json, Router, extract::State, routing::get};
use chrono::{DateTime, Datelike, Utc};
use rust_decimal::{Decimal, prelude::ToPrimitive};
use serde::Serialize;

use crate::{
    db::OrderRepository, error::AppError, middleware::RequireAuth, models::Order, state::AppState,
};

/// Number of trailing months in the revenue series, current month included.
const MONTHLY_SERIES_LEN: u32 = 6;

/// Number of orders in the recent-orders panel.
const RECENT_ORDERS_LEN: usize = 5;

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Build the dashboard router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/dashboard/stats", get(stats))
}

/// Revenue for one month of the trailing series.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct MonthlyRevenue {
    /// Short month name, e.g. "Aug".
    pub label: String,
    /// Revenue for that month.
    pub revenue: Decimal,
}

/// The full dashboard payload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Lifetime revenue across all orders.
    pub total_sales: Decimal,
    /// Number of orders ever placed.
    pub total_orders: usize,
    /// Revenue of the previous calendar month.
    pub last_month_revenue: Decimal,
    /// Current month's revenue versus the previous month, in percent.
    pub revenue_change: f64,
    /// Lifetime revenue divided by order count.
    pub average_order_value: Decimal,
    /// The five most recent orders.
    pub recent_orders: Vec<Order>,
    /// Trailing six months of revenue, oldest first.
    pub monthly_sales: Vec<MonthlyRevenue>,
}

/// GET /api/dashboard/stats
async fn stats(
    RequireAuth(_): RequireAuth,
    State(state): State<AppState>,
) -> Result<Json<DashboardStats>, AppError> {
    let orders: Vec<Order> = OrderRepository::new(state.pool())
        .list_all()
        .await?
        .into_iter()
        .map(|o| o.order)
        .collect();

    Ok(Json(compute_stats(&orders, Utc::now())))
}

/// Step back `back` whole months from (year, month).
fn months_back(year: i32, month: u32, back: u32) -> (i32, u32) {
    let total = year * 12 + i32::try_from(month).unwrap_or(1) - 1 - i32::try_from(back).unwrap_or(0);
    let m = u32::try_from(total.rem_euclid(12)).unwrap_or(0) + 1;
    (total.div_euclid(12), m)
}

fn revenue_in_month(orders: &[Order], year: i32, month: u32) -> Decimal {
    orders
        .iter()
        .filter(|o| o.created_at.year() == year && o.created_at.month() == month)
        .map(|o| o.total_amount)
        .sum()
}

/// Aggregate the dashboard figures from the full order set.
///
/// `now` decides where the month boundaries fall; handlers pass
/// `Utc::now()`.
#[must_use]
pub fn compute_stats(orders: &[Order], now: DateTime<Utc>) -> DashboardStats {
    let total_sales: Decimal = orders.iter().map(|o| o.total_amount).sum();
    let total_orders = orders.len();

    let (this_year, this_month) = (now.year(), now.month());
    let (last_year, last_month) = months_back(this_year, this_month, 1);

    let this_month_revenue = revenue_in_month(orders, this_year, this_month);
    let last_month_revenue = revenue_in_month(orders, last_year, last_month);

    // Month-over-month change; a month with no baseline revenue reads as 0.
    let revenue_change = if last_month_revenue.is_zero() {
        0.0
    } else {
        ((this_month_revenue - last_month_revenue) / last_month_revenue * Decimal::from(100))
            .to_f64()
            .unwrap_or(0.0)
    };

    let average_order_value = if total_orders == 0 {
        Decimal::ZERO
    } else {
        total_sales / Decimal::from(total_orders as u64)
    };

    let mut recent: Vec<Order> = orders.to_vec();
    recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    recent.truncate(RECENT_ORDERS_LEN);

    let monthly_sales = (0..MONTHLY_SERIES_LEN)
        .rev()
        .map(|back| {
            let (year, month) = months_back(this_year, this_month, back);
            MonthlyRevenue {
                label: MONTH_LABELS[month as usize - 1].to_owned(),
                revenue: revenue_in_month(orders, year, month),
            }
        })
        .collect();

    DashboardStats {
        total_sales,
        total_orders,
        last_month_revenue,
        revenue_change,
        average_order_value,
        recent_orders: recent,
        monthly_sales,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use prism_core::{OrderId, OrderStatus};

    fn order(id: i32, amount: &str, created_at: DateTime<Utc>) -> Order {
        Order {
            id: OrderId::new(id),
            customer_name: format!("Customer {id}"),
            customer_email: format!("customer{id}@example.com"),
            status: OrderStatus::Delivered,
            total_amount: amount.parse().unwrap(),
            created_at,
        }
    }

    fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_empty_order_set() {
        let stats = compute_stats(&[], at(2026, 8, 30));

        assert_eq!(stats.total_sales, Decimal::ZERO);
        assert_eq!(stats.total_orders, 0);
        assert_eq!(stats.last_month_revenue, Decimal::ZERO);
        assert!((stats.revenue_change - 0.0).abs() < f64::EPSILON);
        assert_eq!(stats.average_order_value, Decimal::ZERO);
        assert!(stats.recent_orders.is_empty());
        assert_eq!(stats.monthly_sales.len(), 6);
        assert!(stats.monthly_sales.iter().all(|m| m.revenue.is_zero()));
    }

    #[test]
    fn test_month_over_month_change() {
        let orders = vec![
            order(1, "100.00", at(2026, 7, 10)),
            order(2, "150.00", at(2026, 8, 5)),
        ];
        let stats = compute_stats(&orders, at(2026, 8, 30));

        assert_eq!(stats.total_sales, "250.00".parse::<Decimal>().unwrap());
        assert_eq!(stats.last_month_revenue, "100.00".parse::<Decimal>().unwrap());
        assert!((stats.revenue_change - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_change_with_zero_baseline_is_zero() {
        // Revenue this month but none last month: the change reads 0, there
        // is no baseline to compare against.
        let orders = vec![order(1, "42.00", at(2026, 8, 1))];
        let stats = compute_stats(&orders, at(2026, 8, 30));

        assert!(stats.revenue_change.abs() < f64::EPSILON);
        assert_eq!(stats.last_month_revenue, Decimal::ZERO);
    }

    #[test]
    fn test_recent_orders_capped_and_newest_first() {
        let orders: Vec<Order> = (1..=7)
            .map(|i| order(i, "10.00", at(2026, 8, u32::try_from(i).unwrap())))
            .collect();
        let stats = compute_stats(&orders, at(2026, 8, 30));

        assert_eq!(stats.recent_orders.len(), 5);
        assert_eq!(stats.recent_orders[0].id, OrderId::new(7));
        assert_eq!(stats.recent_orders[4].id, OrderId::new(3));
    }

    #[test]
    fn test_monthly_series_crosses_year_boundary() {
        let orders = vec![
            order(1, "80.00", at(2025, 11, 20)),
            order(2, "20.00", at(2026, 2, 14)),
        ];
        let stats = compute_stats(&orders, at(2026, 2, 28));

        let labels: Vec<&str> = stats.monthly_sales.iter().map(|m| m.label.as_str()).collect();
        assert_eq!(labels, vec!["Sep", "Oct", "Nov", "Dec", "Jan", "Feb"]);
        assert_eq!(stats.monthly_sales[2].revenue, "80.00".parse::<Decimal>().unwrap());
        assert_eq!(stats.monthly_sales[5].revenue, "20.00".parse::<Decimal>().unwrap());
    }

    #[test]
    fn test_average_order_value() {
        let orders = vec![
            order(1, "10.00", at(2026, 8, 1)),
            order(2, "20.00", at(2026, 8, 2)),
        ];
        let stats = compute_stats(&orders, at(2026, 8, 30));

        assert_eq!(stats.average_order_value, "15.00".parse::<Decimal>().unwrap());
    }

    #[test]
    fn test_months_back_wraps_year() {
        assert_eq!(months_back(2026, 2, 1), (2026, 1));
        assert_eq!(months_back(2026, 2, 2), (2025, 12));
        assert_eq!(months_back(2026, 1, 1), (2025, 12));
        assert_eq!(months_back(2026, 8, 0), (2026, 8));
    }
}
