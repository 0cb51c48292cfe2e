//! A deliberately small GraphQL-over-HTTP client: typed operations are posted as JSON and the
//! response envelope is decoded into data or a classified error.

mod execute;
mod operation;
mod response;

pub use execute::{GRAPHQL_PATH, execute};
pub use operation::{GraphQlOperation, GraphQlRequest};
pub use response::{
    GraphQlError, GraphQlErrorExtensions, GraphQlResponse, UNAUTHENTICATED_CODE,
    has_unauthenticated_error,
};
