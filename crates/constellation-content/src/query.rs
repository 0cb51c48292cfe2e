use constellation_core::graphql::GraphQlOperation;
use serde::{Deserialize, Serialize};

use crate::{Connection, ContentNode};

/// The `GetContentNodes` query of the admin tree.
pub struct GetContentNodes;

impl GraphQlOperation for GetContentNodes {
    type Variables = GetContentNodesVariables;
    type Data = GetContentNodesData;

    const OPERATION_NAME: &'static str = "GetContentNodes";
    const QUERY: &'static str = r#"query GetContentNodes($first: Int, $after: String) {
  Admin {
    Tree {
      GetContentNodes(first: $first, after: $after) {
        edges {
          cursor
          node {
            id
            structureDefinition {
              title
            }
          }
        }
        pageInfo {
          hasNextPage
          endCursor
        }
      }
    }
  }
}"#;
}

/// Page size and starting cursor. `after: None` asks for the first page.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GetContentNodesVariables {
    pub first: u32,
    pub after: Option<String>,
}

#[allow(missing_docs)]
#[derive(Debug, Deserialize)]
pub struct GetContentNodesData {
    #[serde(rename = "Admin")]
    pub admin: AdminQueries,
}

#[allow(missing_docs)]
#[derive(Debug, Deserialize)]
pub struct AdminQueries {
    #[serde(rename = "Tree")]
    pub tree: TreeQueries,
}

#[allow(missing_docs)]
#[derive(Debug, Deserialize)]
pub struct TreeQueries {
    #[serde(rename = "GetContentNodes")]
    pub get_content_nodes: Connection<ContentNode>,
}
