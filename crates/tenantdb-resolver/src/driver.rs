use async_trait::async_trait;
use tenantdb_core::ConnectionProperties;

use crate::error::DriverError;

#[async_trait]
pub trait Driver: Send + Sync {
    /// Handle returned for an opened connection. Owned by the caller once returned.
    type Connection: Send;

    /// Identity of the driver, used in spans and error messages.
    fn name(&self) -> &str;

    /// Open a raw connection for `url` with the given properties.
    ///
    /// `Ok(None)` means the driver accepted the call but has no connection
    /// for this URL, which callers treat as a misconfigured URL/driver pair.
    async fn connect(
        &self,
        url: &str,
        properties: &ConnectionProperties,
    ) -> Result<Option<Self::Connection>, DriverError>;
}
