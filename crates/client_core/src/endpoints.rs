//! Typed wrappers over the per-entity REST endpoints.

use shared::{
    domain::{ContactId, ContactStatus, OrderId, OrderStatus, PackageId},
    protocol::{
        ContactRecord, CreateContactRequest, CreateOrderRequest, CreatePackageRequest,
        DataEnvelope, OrderRecord, PackageRecord, SetStatusRequest,
    },
};

use crate::{error::ClientError, paged::PagedQueryClient, transport::ApiTransport};

impl ApiTransport {
    /// Public catalog: only active packages.
    pub fn public_packages(&self) -> PagedQueryClient<PackageRecord> {
        PagedQueryClient::new(self.clone(), "/packages", "search")
    }

    /// Admin catalog: every package, active or not.
    pub fn admin_packages(&self) -> PagedQueryClient<PackageRecord> {
        PagedQueryClient::new(self.clone(), "/packages/admin/all", "search")
    }

    pub fn orders(&self) -> PagedQueryClient<OrderRecord> {
        PagedQueryClient::new(self.clone(), "/orders", "q")
    }

    pub fn contacts(&self) -> PagedQueryClient<ContactRecord> {
        PagedQueryClient::new(self.clone(), "/contacts", "q")
    }

    pub async fn fetch_package(&self, id: &PackageId) -> Result<PackageRecord, ClientError> {
        let envelope: DataEnvelope<PackageRecord> =
            self.get_json(&format!("/packages/{id}"), &[]).await?;
        Ok(envelope.data)
    }

    pub async fn create_package(
        &self,
        request: &CreatePackageRequest,
    ) -> Result<PackageRecord, ClientError> {
        let envelope: DataEnvelope<PackageRecord> = self.post_json("/packages", request).await?;
        Ok(envelope.data)
    }

    pub async fn update_package(
        &self,
        id: &PackageId,
        request: &CreatePackageRequest,
    ) -> Result<PackageRecord, ClientError> {
        let envelope: DataEnvelope<PackageRecord> =
            self.put_json(&format!("/packages/{id}"), request).await?;
        Ok(envelope.data)
    }

    pub async fn delete_package(&self, id: &PackageId) -> Result<(), ClientError> {
        self.delete(&format!("/packages/{id}")).await
    }

    pub async fn create_order(
        &self,
        request: &CreateOrderRequest,
    ) -> Result<OrderRecord, ClientError> {
        let envelope: DataEnvelope<OrderRecord> = self.post_json("/orders", request).await?;
        Ok(envelope.data)
    }

    pub async fn set_order_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
    ) -> Result<(), ClientError> {
        self.patch_unit(&format!("/orders/{id}/status"), &SetStatusRequest { status })
            .await
    }

    pub async fn create_contact(
        &self,
        request: &CreateContactRequest,
    ) -> Result<ContactRecord, ClientError> {
        let envelope: DataEnvelope<ContactRecord> = self.post_json("/contacts", request).await?;
        Ok(envelope.data)
    }

    pub async fn set_contact_status(
        &self,
        id: &ContactId,
        status: ContactStatus,
    ) -> Result<(), ClientError> {
        self.patch_unit(
            &format!("/contacts/{id}/status"),
            &SetStatusRequest { status },
        )
        .await
    }
}
