//! AP1 antipattern tools.

use rmcp::{
    handler::server::wrapper::Parameters,
    model::CallToolResult,
    schemars::{self, JsonSchema},
    tool, tool_router, ErrorData as McpError,
};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::mcp::protocol::{OutputFormat, Response};
use crate::mcp::server::McpServer;
use crate::models::{Directions, EntityId, HypotheticalStatement};
use crate::repositories::LabelRepository;
use crate::services::AntipatternService;

// ============================================================================
// Parameter Types
// ============================================================================

/// Directions covered by a check.
#[derive(Debug, Clone, Copy, Default, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DirectionParam {
    /// Classes the entity is both an instance and a subclass of.
    Up,
    /// Subclasses of the entity that are also its instances.
    Down,
    /// Both of the above.
    #[default]
    Both,
}

impl From<DirectionParam> for Directions {
    fn from(param: DirectionParam) -> Self {
        match param {
            DirectionParam::Up => Directions::Up,
            DirectionParam::Down => Directions::Down,
            DirectionParam::Both => Directions::Both,
        }
    }
}

/// Parameters for check_antipattern tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct CheckAntipatternParams {
    /// Focal entity id (e.g. "Q5").
    pub entity: String,

    /// Relation of a hypothetical statement: "P31"/"instance_of" or
    /// "P279"/"subclass_of". Must be given together with `object`.
    #[serde(default)]
    pub relation: Option<String>,

    /// Object entity of the hypothetical statement.
    #[serde(default)]
    pub object: Option<String>,

    /// Directions to analyze (default: both).
    #[serde(default)]
    pub direction: Option<DirectionParam>,

    /// Resolve labels for every entity in the result (default: false).
    #[serde(default)]
    pub include_labels: Option<bool>,

    /// Output format: json (default) or toon.
    #[serde(default)]
    pub output_format: Option<OutputFormat>,
}

/// Parameters for get_labels tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetLabelsParams {
    /// Entity ids to resolve.
    pub entities: Vec<String>,
}

// ============================================================================
// Response Types
// ============================================================================

/// One resolved label.
#[derive(Debug, Serialize)]
pub struct LabelResult {
    pub id: EntityId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Response for get_labels tool.
#[derive(Debug, Serialize)]
pub struct GetLabelsResult {
    /// Labels in request order.
    pub labels: Vec<LabelResult>,
}

// ============================================================================
// Tool Router
// ============================================================================

#[tool_router(router = antipattern_tools, vis = "pub(crate)")]
impl McpServer {
    /// Check an entity for AP1 violations.
    ///
    /// Reports classes the entity is both an instance and a subclass of (up)
    /// and subclasses that are also its instances (down). With a relation and
    /// object, also reports the violations that statement would introduce.
    #[tool(
        description = "Check whether an entity is both INSTANCE_OF and SUBCLASS_OF the same class (AP1), optionally against a hypothetical new statement."
    )]
    pub async fn check_antipattern(
        &self,
        Parameters(params): Parameters<CheckAntipatternParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(
            entity = %params.entity,
            relation = ?params.relation,
            object = ?params.object,
            "Running check_antipattern tool"
        );

        let vocabulary = &self.context().config.vocabulary;
        let focal = EntityId::normalize(&params.entity).map_err(McpError::from)?;
        let hypothesis = HypotheticalStatement::from_parts(
            params.relation.as_deref(),
            params.object.as_deref(),
            vocabulary,
        )
        .map_err(McpError::from)?;
        let directions = params.direction.unwrap_or_default().into();

        let service = self.resolve::<AntipatternService>();
        let mut check = service
            .check(&focal, hypothesis.as_ref(), directions)
            .await
            .map_err(|e: AppError| {
                tracing::error!(error = %e, "check_antipattern failed");
                McpError::from(e)
            })?;

        if params.include_labels.unwrap_or(false) {
            let items: Vec<_> = check.mentioned_entities().into_iter().map(Some).collect();
            check.labels = self
                .resolve::<LabelRepository>()
                .labels(&items)
                .await
                .map_err(McpError::from)?
                .into_iter()
                .collect();
        }

        Response(check, params.output_format).into()
    }

    /// Resolve display labels for entity ids.
    #[tool(description = "Get display labels of entities in the configured language.")]
    pub async fn get_labels(
        &self,
        Parameters(params): Parameters<GetLabelsParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(count = params.entities.len(), "Running get_labels tool");

        let ids = params
            .entities
            .iter()
            .map(|e| EntityId::normalize(e))
            .collect::<Result<Vec<_>, AppError>>()
            .map_err(McpError::from)?;
        let items: Vec<_> = ids.iter().cloned().map(Some).collect();

        let labels = self
            .resolve::<LabelRepository>()
            .labels(&items)
            .await
            .map_err(McpError::from)?;

        let response = GetLabelsResult {
            labels: ids
                .into_iter()
                .map(|id| LabelResult {
                    label: labels.get(&id).cloned(),
                    id,
                })
                .collect(),
        };

        Response(response, None).into()
    }
}
