//! MCP server exposing the discovery tools over stdio.

use crate::discovery::{DiscoveryEngine, DiscoveryProvider};
use crate::tools::discover::{
    DiscoverByCategoryRequest, DiscoverByConceptRequest, DiscoverRequest,
    handle_discover, handle_discover_by_category, handle_discover_by_concept,
};
use crate::tools::find::{FindResourcesRequest, handle_find_resources};
use rmcp::{
    ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::*,
    schemars::{self, JsonSchema, generate::SchemaSettings},
    tool, tool_handler, tool_router,
};
use std::sync::Arc;

/// MCP server for Java learning-resource discovery
#[derive(Clone)]
pub struct DiscoveryServer {
    /// Ranked search over the shared engine
    provider: DiscoveryProvider,

    /// Tool router for handling MCP tool calls
    tool_router: ToolRouter<Self>,
}

impl std::fmt::Debug for DiscoveryServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscoveryServer")
            .field("resources", &self.engine().store().len())
            .finish()
    }
}

#[tool_router]
impl DiscoveryServer {
    pub fn new(engine: Arc<DiscoveryEngine>) -> Self {
        Self {
            provider: DiscoveryProvider::new(engine),
            tool_router: Self::tool_router(),
        }
    }

    pub const fn engine(&self) -> &Arc<DiscoveryEngine> {
        self.provider.engine()
    }

    #[tool(
        description = "Discover Java learning resources for a free-text query. The query is classified as specific (a named resource, quoted title, URL or versioned name), vague (a topic) or exploratory (a request for recommendations) and ranked accordingly. An empty query returns general recommendations.",
        input_schema = inline_schema_for_type::<DiscoverRequest>()
    )]
    async fn discover(
        &self,
        Parameters(request): Parameters<DiscoverRequest>,
    ) -> std::result::Result<String, String> {
        handle_discover(&self.provider, request).map_err(|e| format!("{e:#}"))
    }

    #[tool(
        description = "Rank the resources that teach one concept (e.g. concurrency, generics, testing), optionally favoring a difficulty range.",
        input_schema = inline_schema_for_type::<DiscoverByConceptRequest>()
    )]
    async fn discover_by_concept(
        &self,
        Parameters(request): Parameters<DiscoverByConceptRequest>,
    ) -> std::result::Result<String, String> {
        handle_discover_by_concept(&self.provider, request).map_err(|e| format!("{e:#}"))
    }

    #[tool(
        description = "Explore one category (java, spring, jakarta, testing, build, jvm, architecture, data, cloud, community) with beginner-friendly resources first.",
        input_schema = inline_schema_for_type::<DiscoverByCategoryRequest>()
    )]
    async fn discover_by_category(
        &self,
        Parameters(request): Parameters<DiscoverByCategoryRequest>,
    ) -> std::result::Result<String, String> {
        handle_discover_by_category(&self.provider, request).map_err(|e| format!("{e:#}"))
    }

    #[tool(
        description = "List catalog resources matching exact filters (text, type, category, difficulty, tags, free only), ordered by title. No ranking is applied.",
        input_schema = inline_schema_for_type::<FindResourcesRequest>()
    )]
    async fn find_resources(
        &self,
        Parameters(request): Parameters<FindResourcesRequest>,
    ) -> std::result::Result<String, String> {
        handle_find_resources(self.engine().store(), &request).map_err(|e| format!("{e:#}"))
    }
}

#[tool_handler]
impl ServerHandler for DiscoveryServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo::new(ServerCapabilities::builder().enable_tools().build())
            .with_protocol_version(ProtocolVersion::V_2024_11_05)
            .with_server_info(Implementation::from_build_env())
            .with_instructions(
                "resource-discovery: ranked discovery of Java ecosystem learning resources. \
                 Use discover for free-text questions, discover_by_concept or discover_by_category \
                 to browse a subject, and find_resources for exact catalog filters.",
            )
    }
}

/// Generate an inline JSON schema for MCP tools
///
/// Unlike rmcp's default `schema_for_type()`, this function sets `inline_subschemas = true`
/// so enum parameters such as the discover mode render as dropdowns instead of `$ref`s.
pub fn inline_schema_for_type<T: JsonSchema>() -> Arc<JsonObject> {
    let mut settings = SchemaSettings::draft07();
    settings.transforms = vec![Box::new(schemars::transform::AddNullable::default())];
    settings.inline_subschemas = true;

    let generator = settings.into_generator();
    let schema = generator.into_root_schema_for::<T>();
    let object = serde_json::to_value(schema).expect("failed to serialize schema");

    let serde_json::Value::Object(json_object) = object else {
        panic!("Schema serialization produced non-object value");
    };

    Arc::new(json_object)
}
