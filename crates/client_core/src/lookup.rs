//! Public order-status lookup by order code or customer email.

use chrono::{DateTime, Utc};
use shared::{
    domain::OrderProgress,
    protocol::{DataEnvelope, OrderRecord},
};

use crate::{error::ClientError, transport::ApiTransport};

/// Customer-facing view of one order, statuses projected into the
/// customer vocabulary.
#[derive(Debug, Clone)]
pub struct OrderStatusView {
    pub order_code: String,
    pub package_name: String,
    pub customer_name: String,
    pub customer_email: String,
    pub event_date: Option<DateTime<Utc>>,
    pub total_price: i64,
    pub progress: OrderProgress,
}

impl From<OrderRecord> for OrderStatusView {
    fn from(order: OrderRecord) -> Self {
        Self {
            order_code: order.order_code,
            package_name: order
                .package
                .map(|package| package.name)
                .unwrap_or_else(|| "Paket".to_string()),
            customer_name: order.customer_name,
            customer_email: order.customer_email,
            event_date: order.event_date,
            total_price: order.total_price,
            progress: order.status.into(),
        }
    }
}

impl ApiTransport {
    /// `None` when no order matches the code.
    pub async fn check_order_by_code(
        &self,
        code: &str,
    ) -> Result<Option<OrderStatusView>, ClientError> {
        let envelope: DataEnvelope<Vec<OrderRecord>> = self
            .get_json(
                "/orders/check",
                &[
                    ("code".to_string(), code.trim().to_string()),
                    ("page".to_string(), "1".to_string()),
                    ("limit".to_string(), "1".to_string()),
                ],
            )
            .await?;
        Ok(envelope.data.into_iter().next().map(Into::into))
    }

    pub async fn check_orders_by_email(
        &self,
        email: &str,
    ) -> Result<Vec<OrderStatusView>, ClientError> {
        let envelope: DataEnvelope<Vec<OrderRecord>> = self
            .get_json(
                "/orders/check",
                &[
                    ("email".to_string(), email.trim().to_string()),
                    ("page".to_string(), "1".to_string()),
                    ("limit".to_string(), "50".to_string()),
                ],
            )
            .await?;
        Ok(envelope.data.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::domain::{OrderId, OrderStatus, PackageId};
    use shared::protocol::PackageBrief;

    fn order(status: OrderStatus, package: Option<PackageBrief>) -> OrderRecord {
        OrderRecord {
            id: OrderId::from("ord_1"),
            order_code: "WO-2025-0001".to_string(),
            package_id: PackageId::from("pkg_1"),
            customer_name: "Rina".to_string(),
            customer_email: "rina@example.com".to_string(),
            customer_phone: "081234567890".to_string(),
            event_date: None,
            venue: Some("Bandung".to_string()),
            status,
            total_price: 25_000_000,
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            package,
        }
    }

    #[test]
    fn projects_status_into_customer_vocabulary() {
        let view = OrderStatusView::from(order(OrderStatus::Approved, None));
        assert_eq!(view.progress, OrderProgress::Dikonfirmasi);
        assert_eq!(view.progress.step_percent(), 100);
        // Missing embedded package falls back to a generic label.
        assert_eq!(view.package_name, "Paket");
    }

    #[test]
    fn uses_embedded_package_name_when_present() {
        let brief = PackageBrief {
            id: PackageId::from("pkg_1"),
            name: "Paket Gold".to_string(),
            price: 25_000_000,
            image_url: None,
        };
        let view = OrderStatusView::from(order(OrderStatus::Pending, Some(brief)));
        assert_eq!(view.package_name, "Paket Gold");
        assert_eq!(view.progress, OrderProgress::MenungguKonfirmasi);
        assert_eq!(view.progress.step_percent(), 50);
    }
}
