//! Infinite-scroll style pagination over the content tree.

use std::sync::Arc;

use constellation_state::{Repository, Setting, SettingItem, register_setting_key};
use tracing::debug;

use crate::{Connection, ContentError, ContentNode, Edge, SortableList, merge_connections};

/// Number of nodes requested per page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

register_setting_key!(pub const SORTABLE_LIST: Vec<Edge<ContentNode>> = "sortableList");

/// Anything that can produce pages of content nodes.
#[async_trait::async_trait]
pub trait ContentPageSource: Send + Sync {
    /// Fetch up to `first` nodes following `after`.
    async fn fetch_page(
        &self,
        first: u32,
        after: Option<String>,
    ) -> Result<Connection<ContentNode>, ContentError>;
}

#[async_trait::async_trait]
impl<T: ContentPageSource + ?Sized> ContentPageSource for Arc<T> {
    async fn fetch_page(
        &self,
        first: u32,
        after: Option<String>,
    ) -> Result<Connection<ContentNode>, ContentError> {
        (**self).fetch_page(first, after).await
    }
}

/// What a [ContentFeed::load_more] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMore {
    /// The feed is logged out, nothing was fetched.
    Skipped,
    /// A page was fetched; holds the number of edges it contained.
    Loaded(usize),
    /// The server reported no further page, nothing was fetched.
    Exhausted,
}

/// Paginated content list plus the user's ordering of the loaded nodes.
///
/// The merged connection mirrors what the server returned, in server order. The sortable list
/// holds the same nodes in the order the user arranged them; newly loaded nodes are appended to
/// its end.
pub struct ContentFeed<S> {
    source: S,
    page_size: u32,
    connection: Option<Connection<ContentNode>>,
    list: SortableList<Edge<ContentNode>>,
    logged_out: bool,
    persistence: Option<Setting<Vec<Edge<ContentNode>>>>,
}

impl<S: ContentPageSource> ContentFeed<S> {
    /// A feed with nothing loaded, using [DEFAULT_PAGE_SIZE] and no persistence.
    pub fn new(source: S) -> Self {
        Self {
            source,
            page_size: DEFAULT_PAGE_SIZE,
            connection: None,
            list: SortableList::default(),
            logged_out: false,
            persistence: None,
        }
    }

    #[allow(missing_docs)]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Persist the sortable list to `setting` after every change.
    pub fn with_persistence(mut self, setting: Setting<Vec<Edge<ContentNode>>>) -> Self {
        self.persistence = Some(setting);
        self
    }

    /// Load the previously persisted order, if any. Returns the number of restored items.
    pub async fn restore(&mut self) -> Result<usize, ContentError> {
        let Some(setting) = &self.persistence else {
            return Ok(0);
        };

        let restored = setting.get().await?.unwrap_or_default();
        debug!(items = restored.len(), "Restored content order");
        let count = restored.len();
        self.list.set(restored);
        Ok(count)
    }

    /// The nodes in the user's order.
    pub fn items(&self) -> &[Edge<ContentNode>] {
        self.list.items()
    }

    /// Everything fetched so far, in server order.
    pub fn connection(&self) -> Option<&Connection<ContentNode>> {
        self.connection.as_ref()
    }

    #[allow(missing_docs)]
    pub fn is_logged_out(&self) -> bool {
        self.logged_out
    }

    /// Fetch the next page, if there is one.
    ///
    /// The first call fetches the first page. Later calls fetch the page after the current end
    /// cursor while the server reports `hasNextPage` and the cursor is known; otherwise nothing is
    /// fetched and [LoadMore::Exhausted] is returned. A logged out feed never fetches.
    pub async fn load_more(&mut self) -> Result<LoadMore, ContentError> {
        if self.logged_out {
            return Ok(LoadMore::Skipped);
        }

        let after = match &self.connection {
            None => None,
            Some(Connection { page_info, .. }) => {
                match (&page_info.end_cursor, page_info.has_next_page) {
                    (Some(cursor), true) => Some(cursor.clone()),
                    _ => return Ok(LoadMore::Exhausted),
                }
            }
        };

        let page = self.source.fetch_page(self.page_size, after).await?;
        let loaded = page.edges.len();
        debug!(loaded, has_next_page = page.page_info.has_next_page, "Loaded content page");

        let new_edges = self.unseen(&page.edges);
        self.connection = Some(match self.connection.take() {
            Some(previous) => merge_connections(previous, page),
            None => page,
        });

        self.list.extend(new_edges);
        self.persist().await?;

        Ok(LoadMore::Loaded(loaded))
    }

    /// Keep loading until the server has no further page. Returns the number of edges loaded.
    pub async fn load_all(&mut self) -> Result<usize, ContentError> {
        let mut total = 0;
        while let LoadMore::Loaded(count) = self.load_more().await? {
            total += count;
        }
        Ok(total)
    }

    /// Move the item at `from` to `to` in the user's order and persist the result.
    pub async fn move_item(&mut self, from: usize, to: usize) -> Result<(), ContentError> {
        self.list.move_item(from, to)?;
        self.persist().await
    }

    /// Stop fetching and forget everything loaded. The persisted order is kept for the next
    /// session.
    pub fn log_out(&mut self) {
        self.logged_out = true;
        self.connection = None;
        self.list.clear();
    }

    /// Edges whose node is not in the sortable list yet. Restored orders already contain nodes
    /// that the server will send again.
    fn unseen(&self, edges: &[Edge<ContentNode>]) -> Vec<Edge<ContentNode>> {
        edges
            .iter()
            .filter(|edge| !self.list.items().iter().any(|e| e.node.id == edge.node.id))
            .cloned()
            .collect()
    }

    async fn persist(&self) -> Result<(), ContentError> {
        if let Some(setting) = &self.persistence {
            setting.update(self.list.items().to_vec()).await?;
        }
        Ok(())
    }
}

/// The setting the feed persists to, on top of `repository`.
pub fn sortable_list_setting(
    repository: Arc<dyn Repository<SettingItem>>,
) -> Setting<Vec<Edge<ContentNode>>> {
    Setting::new(repository, SORTABLE_LIST)
}
