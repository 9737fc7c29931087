//! MCP Server handler for the Insightly API.

use rmcp::{
    handler::server::ServerHandler,
    model::{
        CallToolRequestParam, CallToolResult, Content, ErrorData as McpError, Implementation,
        ListToolsResult, PaginatedRequestParam, ServerCapabilities, ServerInfo, Tool,
        ToolsCapability,
    },
    service::RequestContext,
    RoleServer,
};
use schemars::JsonSchema;
use serde::Serialize;
use std::sync::Arc;

use crate::{
    mcp::{DeleteParams, EntityType, GetParams, ListParams, UpdateParams},
    CollectionFilter, Contact, Delete, Get, InsightlyClient, InsightlyError, Instance, List,
    Opportunity, PaginationParams, PipelineStage, TeamMember, Update,
};

/// Largest page the `list` tool will request.
const MAX_TOP: u32 = 500;

/// Insightly MCP Server.
///
/// Implements the MCP ServerHandler trait, providing tools to interact
/// with the Insightly API through the Model Context Protocol.
///
/// # Tools
///
/// - `get` - Fetch a single entity by ID
/// - `list` - List entities, all pages or a single page
/// - `update` - Update an entity (Opportunity only)
/// - `delete` - Delete an entity
#[derive(Clone)]
pub struct InsightlyServer {
    client: Arc<InsightlyClient>,
}

impl InsightlyServer {
    /// Create a new InsightlyServer from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `INSIGHTLY_API_KEY` is not set.
    pub fn from_env() -> crate::Result<Self> {
        let client = InsightlyClient::from_env()?;
        Ok(Self::new(client))
    }

    /// Create a new InsightlyServer with an existing client.
    pub fn new(client: InsightlyClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    /// Generate JSON Schema for a type.
    fn schema<T: JsonSchema>() -> Arc<serde_json::Map<String, serde_json::Value>> {
        let schema = schemars::schema_for!(T);
        let value = serde_json::to_value(&schema).unwrap_or(serde_json::json!({}));
        match value {
            serde_json::Value::Object(map) => Arc::new(map),
            _ => Arc::new(serde_json::Map::new()),
        }
    }

    /// Convert InsightlyError to McpError.
    fn to_mcp_error(err: InsightlyError) -> McpError {
        match &err {
            InsightlyError::NotFound { entity_type, id } => {
                McpError::resource_not_found(format!("{entity_type} '{id}' not found"), None)
            }
            InsightlyError::ConfigMissing(msg) | InsightlyError::InvalidArgument(msg) => {
                McpError::invalid_params(msg.clone(), None)
            }
            _ => McpError::internal_error(err.to_string(), None),
        }
    }

    /// Serialize a value as the pretty-printed text of a successful result.
    fn json_result<T: Serialize + ?Sized>(value: &T) -> Result<CallToolResult, McpError> {
        let text = serde_json::to_string_pretty(value)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    fn require_id(entity: EntityType, id: Option<u64>) -> Result<u64, McpError> {
        id.ok_or_else(|| McpError::invalid_params(format!("id is required for {entity:?}"), None))
    }

    /// Handle the `get` tool.
    ///
    /// # Errors
    ///
    /// Returns an MCP error if the id is missing or the API call fails.
    pub async fn handle_get(&self, params: GetParams) -> Result<CallToolResult, McpError> {
        let client = self.client.as_ref();
        match params.entity {
            EntityType::Opportunity => {
                let id = Self::require_id(params.entity, params.id)?;
                let item = Opportunity::get(client, id).await.map_err(Self::to_mcp_error)?;
                Self::json_result(&item)
            }
            EntityType::Contact => {
                let id = Self::require_id(params.entity, params.id)?;
                let item = Contact::get(client, id).await.map_err(Self::to_mcp_error)?;
                Self::json_result(&item)
            }
            EntityType::PipelineStage => {
                let id = Self::require_id(params.entity, params.id)?;
                let item = PipelineStage::get(client, id)
                    .await
                    .map_err(Self::to_mcp_error)?;
                Self::json_result(&item)
            }
            EntityType::TeamMember => {
                let id = Self::require_id(params.entity, params.id)?;
                let item = TeamMember::get(client, id).await.map_err(Self::to_mcp_error)?;
                Self::json_result(&item)
            }
            EntityType::Instance => {
                let item = Instance::get(client).await.map_err(Self::to_mcp_error)?;
                Self::json_result(&item)
            }
        }
    }

    /// Handle the `list` tool.
    pub async fn handle_list(&self, params: ListParams) -> Result<CallToolResult, McpError> {
        let filter = params.filter().map_err(Self::to_mcp_error)?;

        match params.entity {
            EntityType::Opportunity => self.list::<Opportunity>(&params, &filter).await,
            EntityType::Contact => self.list::<Contact>(&params, &filter).await,
            EntityType::PipelineStage => self.list::<PipelineStage>(&params, &filter).await,
            EntityType::TeamMember => self.list::<TeamMember>(&params, &filter).await,
            EntityType::Instance => Err(McpError::invalid_params(
                "Instance does not support list. Use get without an id.",
                None,
            )),
        }
    }

    async fn list<T: List>(
        &self,
        params: &ListParams,
        filter: &CollectionFilter,
    ) -> Result<CallToolResult, McpError> {
        let client = self.client.as_ref();

        if params.is_single_page() {
            let requested = PaginationParams {
                skip: params.skip,
                top: params.top,
            };
            let (skip, top) = requested.resolve(T::PAGE_SIZE);
            let top = top.clamp(1, MAX_TOP);
            let page = T::list_page(client, filter, skip, top)
                .await
                .map_err(Self::to_mcp_error)?;
            return Self::json_result(&page);
        }

        let items = T::list_all(client, filter)
            .await
            .map_err(Self::to_mcp_error)?;
        Self::json_result(&items)
    }

    /// Handle the `update` tool.
    pub async fn handle_update(&self, params: UpdateParams) -> Result<CallToolResult, McpError> {
        match params.entity {
            EntityType::Opportunity => {
                let client = self.client.as_ref();
                let mut opportunity = Opportunity::get(client, params.id)
                    .await
                    .map_err(Self::to_mcp_error)?;
                if let Some(name) = params.name {
                    opportunity.opportunity_name = name;
                }
                if let Some(state) = params.state {
                    opportunity.opportunity_state = Some(state.to_uppercase());
                }
                let updated = Opportunity::update(client, Some(&opportunity))
                    .await
                    .map_err(Self::to_mcp_error)?;
                Self::json_result(&updated)
            }
            other => Err(McpError::invalid_params(
                format!("Update not supported for {other:?}"),
                None,
            )),
        }
    }

    /// Handle the `delete` tool.
    pub async fn handle_delete(&self, params: DeleteParams) -> Result<CallToolResult, McpError> {
        let client = self.client.as_ref();
        let result = match params.entity {
            EntityType::Opportunity => Opportunity::delete(client, params.id).await,
            EntityType::Contact => Contact::delete(client, params.id).await,
            EntityType::TeamMember => TeamMember::delete(client, params.id).await,
            other => {
                return Err(McpError::invalid_params(
                    format!("Delete not supported for {other:?}"),
                    None,
                ))
            }
        };
        result.map_err(Self::to_mcp_error)?;

        Ok(CallToolResult::success(vec![Content::text(format!(
            "Deleted {:?} {}",
            params.entity, params.id
        ))]))
    }
}

impl ServerHandler for InsightlyServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: Some(false),
                }),
                ..Default::default()
            },
            server_info: Implementation {
                name: "insightly".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            instructions: Some(
                "Insightly CRM MCP Server - Read and maintain opportunities, contacts, \
                 pipeline stages and team members."
                    .to_string(),
            ),
        }
    }

    async fn list_tools(
        &self,
        _request: PaginatedRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        let tools = vec![
            Tool::new(
                "get",
                "Fetch a single Insightly record by numeric ID. \
                 Supports: opportunity, contact, pipeline_stage, team_member. \
                 instance takes no id.",
                Self::schema::<GetParams>(),
            ),
            Tool::new(
                "list",
                "List Insightly records. Returns every record unless skip/top is given. \
                 Optional filters: updated_after (RFC 3339) and a single \
                 field_name/field_value equality.",
                Self::schema::<ListParams>(),
            ),
            Tool::new(
                "update",
                "Update an Insightly record. Currently only opportunity is supported. \
                 Can update: name, state.",
                Self::schema::<UpdateParams>(),
            ),
            Tool::new(
                "delete",
                "Delete an opportunity, contact or team_member by ID.",
                Self::schema::<DeleteParams>(),
            ),
        ];

        Ok(ListToolsResult {
            tools,
            next_cursor: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let args = request
            .arguments
            .map(serde_json::Value::Object)
            .unwrap_or(serde_json::json!({}));

        match request.name.as_ref() {
            "get" => {
                let params: GetParams = serde_json::from_value(args)
                    .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                self.handle_get(params).await
            }
            "list" => {
                let params: ListParams = serde_json::from_value(args)
                    .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                self.handle_list(params).await
            }
            "update" => {
                let params: UpdateParams = serde_json::from_value(args)
                    .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                self.handle_update(params).await
            }
            "delete" => {
                let params: DeleteParams = serde_json::from_value(args)
                    .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                self.handle_delete(params).await
            }
            other => Err(McpError::invalid_params(
                format!("Unknown tool: {other}"),
                None,
            )),
        }
    }
}
