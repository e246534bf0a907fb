use async_trait::async_trait;

use crate::error::Result;
use crate::models::RawProfile;

/// Anything that can produce the raw profile for a username.
#[async_trait]
pub trait ProfileSource: Send + Sync {
    async fn fetch_profile(&self, username: &str) -> Result<RawProfile>;
    fn name(&self) -> &str;
}
