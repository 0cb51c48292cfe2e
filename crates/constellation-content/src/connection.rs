use serde::{Deserialize, Serialize};

/// One page of a cursor-paginated list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection<T> {
    #[allow(missing_docs)]
    pub edges: Vec<Edge<T>>,
    #[allow(missing_docs)]
    pub page_info: PageInfo,
}

/// A node together with the cursor that points at it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge<T> {
    #[allow(missing_docs)]
    #[serde(default)]
    pub cursor: Option<String>,
    #[allow(missing_docs)]
    pub node: T,
}

/// Where a page ends and whether another one follows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    #[allow(missing_docs)]
    pub has_next_page: bool,
    /// Cursor of the last edge of the page. Absent on an empty page.
    #[serde(default)]
    pub end_cursor: Option<String>,
}

/// A node of the admin content tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentNode {
    #[allow(missing_docs)]
    pub id: String,
    #[allow(missing_docs)]
    #[serde(default)]
    pub structure_definition: Option<StructureDefinition>,
}

impl ContentNode {
    /// The title of the node's structure definition, if it has one.
    pub fn title(&self) -> Option<&str> {
        self.structure_definition.as_ref().map(|d| d.title.as_str())
    }
}

#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureDefinition {
    pub title: String,
}

/// Appends `next` to `previous`: edges are concatenated in order and the page info of `next`
/// replaces that of `previous`.
pub fn merge_connections<T>(previous: Connection<T>, next: Connection<T>) -> Connection<T> {
    let mut edges = previous.edges;
    edges.extend(next.edges);

    Connection {
        edges,
        page_info: next.page_info,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(ids: &[&str], has_next_page: bool) -> Connection<String> {
        Connection {
            edges: ids
                .iter()
                .map(|id| Edge {
                    cursor: Some(format!("c-{id}")),
                    node: id.to_string(),
                })
                .collect(),
            page_info: PageInfo {
                has_next_page,
                end_cursor: ids.last().map(|id| format!("c-{id}")),
            },
        }
    }

    #[test]
    fn merge_concatenates_and_takes_new_page_info() {
        let merged = merge_connections(page(&["e1", "e2"], true), page(&["e3"], false));

        let nodes: Vec<_> = merged.edges.iter().map(|e| e.node.as_str()).collect();
        assert_eq!(nodes, ["e1", "e2", "e3"]);
        assert_eq!(
            merged.page_info,
            PageInfo {
                has_next_page: false,
                end_cursor: Some("c-e3".to_string()),
            }
        );
    }

    #[test]
    fn merge_with_empty_page_keeps_edges() {
        let merged = merge_connections(page(&["e1"], true), page(&[], false));

        assert_eq!(merged.edges.len(), 1);
        assert_eq!(merged.page_info.end_cursor, None);
    }

    #[test]
    fn node_deserializes_from_api_shape() {
        let edge: Edge<ContentNode> = serde_json::from_str(
            r#"{"cursor": "c1", "node": {"id": "n1", "structureDefinition": {"title": "Course"}}}"#,
        )
        .unwrap();
        assert_eq!(edge.node.title(), Some("Course"));

        let edge: Edge<ContentNode> =
            serde_json::from_str(r#"{"node": {"id": "n2", "structureDefinition": null}}"#).unwrap();
        assert_eq!(edge.cursor, None);
        assert_eq!(edge.node.title(), None);
    }
}
