use constellation_core::{Client, graphql::execute};
use tracing::debug;

use crate::{
    Connection, ContentError, ContentNode, GetContentNodes,
    feed::{ContentFeed, ContentPageSource},
    query::GetContentNodesVariables,
};

/// Subclient for reading the admin content tree.
#[derive(Clone)]
pub struct ContentClient {
    pub(crate) client: Client,
}

impl ContentClient {
    /// Constructs a new `ContentClient` with the given `Client`.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Fetch up to `first` nodes following the cursor `after`, or the first page when `after` is
    /// `None`.
    pub async fn fetch_page(
        &self,
        first: u32,
        after: Option<String>,
    ) -> Result<Connection<ContentNode>, ContentError> {
        debug!(first, after = after.as_deref(), "Fetching content nodes");
        let data = execute::<GetContentNodes>(
            self.client.internal.get_api_configuration(),
            &GetContentNodesVariables { first, after },
            true,
        )
        .await?;

        Ok(data.admin.tree.get_content_nodes)
    }

    /// A feed starting with nothing loaded.
    pub fn feed(&self) -> ContentFeed<ContentClient> {
        ContentFeed::new(self.clone())
    }
}

#[async_trait::async_trait]
impl ContentPageSource for ContentClient {
    async fn fetch_page(
        &self,
        first: u32,
        after: Option<String>,
    ) -> Result<Connection<ContentNode>, ContentError> {
        ContentClient::fetch_page(self, first, after).await
    }
}

/// Extension trait for `Client` to provide access to the `ContentClient`.
pub trait ContentClientExt {
    /// Creates a new `ContentClient` instance.
    fn content(&self) -> ContentClient;
}

impl ContentClientExt for Client {
    fn content(&self) -> ContentClient {
        ContentClient::new(self.clone())
    }
}
