//! Unit tests for startup seeding.


use crate::relay::ports::{SiteApiResult, SiteConfigSource, SiteRelay};
use async_trait::async_trait;
use mockall::mock;

mock! {
    pub SiteSource {}

    #[async_trait]
    impl SiteConfigSource for SiteSource {
        async fn list_relays(&self) -> SiteApiResult<Vec<SiteRelay>>;
    }
}
