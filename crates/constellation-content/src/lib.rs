#![doc = include_str!("../README.md")]

mod connection;
mod content_client;
mod error;
mod feed;
mod query;
mod sortable_list;

pub use connection::{
    Connection, ContentNode, Edge, PageInfo, StructureDefinition, merge_connections,
};
pub use content_client::{ContentClient, ContentClientExt};
pub use error::ContentError;
pub use feed::{
    ContentFeed, ContentPageSource, DEFAULT_PAGE_SIZE, LoadMore, SORTABLE_LIST, sortable_list_setting,
};
pub use query::GetContentNodes;
pub use sortable_list::{MoveError, SortableList};
