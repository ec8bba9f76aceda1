//! Dashboard report endpoints and the one-shot CSV export.

use shared::protocol::{DataEnvelope, OrderSummary, RevenueSummary, TopPackage};

use crate::{
    error::ClientError,
    transport::{ApiTransport, CsvDownload},
};

impl ApiTransport {
    pub async fn order_summary(&self) -> Result<OrderSummary, ClientError> {
        let envelope: DataEnvelope<OrderSummary> =
            self.get_json("/reports/orders/summary", &[]).await?;
        Ok(envelope.data)
    }

    pub async fn revenue_summary(&self) -> Result<RevenueSummary, ClientError> {
        let envelope: DataEnvelope<RevenueSummary> =
            self.get_json("/reports/revenue/summary", &[]).await?;
        Ok(envelope.data)
    }

    pub async fn top_packages(&self, limit: u32) -> Result<Vec<TopPackage>, ClientError> {
        let envelope: DataEnvelope<Vec<TopPackage>> = self
            .get_json(
                "/reports/packages/top",
                &[("limit".to_string(), limit.to_string())],
            )
            .await?;
        Ok(envelope.data)
    }

    /// Downloads the order report as CSV. This is a side-effecting one-shot
    /// outside the list controller's state machine.
    pub async fn export_orders_csv(&self) -> Result<CsvDownload, ClientError> {
        self.download("/reports/orders/export/csv", "orders.csv")
            .await
    }
}
