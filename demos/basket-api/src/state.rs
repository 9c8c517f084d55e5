use std::sync::Arc;
use std::time::Duration;

use shuk_sdk::{AsyncShukSdk, ChpSource, Result, ShukSdkBuilder};

/// Shared application state: the async SDK handle for catalog queries plus
/// a live comparison source for basket endpoints.
#[derive(Clone)]
pub struct AppState {
    pub sdk: AsyncShukSdk,
    pub chp: Arc<ChpSource>,
}

impl AppState {
    pub async fn new() -> Result<Self> {
        let sdk = AsyncShukSdk::from_builder(ShukSdkBuilder::new()).await?;
        let chp = Arc::new(ChpSource::new(Duration::from_secs(30), false)?);
        Ok(Self { sdk, chp })
    }
}
