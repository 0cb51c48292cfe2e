use serde::{Serialize, de::DeserializeOwned};

/// A GraphQL operation known at compile time.
///
/// ```
/// use constellation_core::graphql::GraphQlOperation;
/// use serde::{Deserialize, Serialize};
///
/// struct Ping;
///
/// #[derive(Serialize)]
/// struct PingVariables {}
///
/// #[derive(Deserialize)]
/// struct PingData {
///     ping: String,
/// }
///
/// impl GraphQlOperation for Ping {
///     type Variables = PingVariables;
///     type Data = PingData;
///
///     const OPERATION_NAME: &'static str = "Ping";
///     const QUERY: &'static str = "query Ping { ping }";
/// }
/// ```
pub trait GraphQlOperation {
    /// Variables sent with the operation.
    type Variables: Serialize + Send + Sync;
    /// Shape of the `data` member of a successful response.
    type Data: DeserializeOwned;

    /// Name of the operation inside [Self::QUERY].
    const OPERATION_NAME: &'static str;
    /// The GraphQL document.
    const QUERY: &'static str;
}

/// Request body of a GraphQL-over-HTTP POST.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQlRequest<'a, V> {
    /// The GraphQL document.
    pub query: &'static str,
    /// Operation to execute.
    pub operation_name: &'static str,
    /// Variables for the operation.
    pub variables: &'a V,
}

impl<'a, V: Serialize> GraphQlRequest<'a, V> {
    /// Builds the request body for operation `O`.
    pub fn new<O: GraphQlOperation<Variables = V>>(variables: &'a V) -> Self {
        Self {
            query: O::QUERY,
            operation_name: O::OPERATION_NAME,
            variables,
        }
    }
}
