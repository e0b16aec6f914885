//! One market query, end to end.

use grocywise_core::{rank_comparisons, AppConfig, FilterSet, LocationSelector, QueryResult};
use grocywise_gemini::{
    GeminiClient, GeminiError, GenerationRequest, GenerationService, JSON_MIME_TYPE,
};

use crate::error::ServiceError;
use crate::grounding::extract_grounding;
use crate::prompt::{build_request, SYSTEM_INSTRUCTION};
use crate::validate::validate_response;

/// Capabilities requested from the generation service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Attach the web-search grounding tool.
    pub web_search_enabled: bool,
    /// Pass the response schema as a generation constraint.
    pub schema_constraint_enabled: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            web_search_enabled: true,
            schema_constraint_enabled: true,
        }
    }
}

impl PipelineOptions {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            web_search_enabled: config.web_search_enabled,
            schema_constraint_enabled: config.schema_constraint_enabled,
        }
    }
}

/// Runs market queries against a [`GenerationService`].
pub struct QueryPipeline<S> {
    service: S,
    options: PipelineOptions,
}

impl<S: GenerationService> QueryPipeline<S> {
    #[must_use]
    pub fn new(service: S, options: PipelineOptions) -> Self {
        Self { service, options }
    }

    #[must_use]
    pub fn service(&self) -> &S {
        &self.service
    }

    #[must_use]
    pub fn options(&self) -> PipelineOptions {
        self.options
    }

    /// Run one market query.
    ///
    /// 1. Build the task prompt and output schema.
    /// 2. Call the generation service exactly once.
    /// 3. Validate the structured payload.
    /// 4. Extract citations and the search affordance.
    /// 5. Re-rank the shopping comparison when a list was supplied.
    ///
    /// A comparison returned without a shopping list is discarded.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError`] with the generic message for every failure;
    /// the underlying cause is logged, not returned.
    pub async fn run(
        &self,
        location: &LocationSelector,
        shopping_list: Option<&str>,
        filters: Option<&FilterSet>,
    ) -> Result<QueryResult, ServiceError> {
        let shopping_list = shopping_list.map(str::trim).filter(|l| !l.is_empty());
        let market_request = build_request(location, shopping_list, filters);

        let request = GenerationRequest {
            prompt: market_request.task_prompt,
            system_instruction: SYSTEM_INSTRUCTION.to_string(),
            web_search_enabled: self.options.web_search_enabled,
            output_mime_type: JSON_MIME_TYPE.to_string(),
            output_schema: self
                .options
                .schema_constraint_enabled
                .then_some(market_request.output_schema),
        };

        tracing::info!(
            country = location.country(),
            city = location.city(),
            has_shopping_list = shopping_list.is_some(),
            filtered = filters.is_some_and(|f| !f.is_empty()),
            "running market query"
        );

        let response = self.service.generate(&request).await.map_err(|e| {
            tracing::error!(error = %e, "generation service call failed");
            ServiceError::generic()
        })?;

        let raw = response.text.as_deref().unwrap_or_default();
        let report = validate_response(raw).map_err(|e| {
            tracing::error!(error = %e, "generation response rejected");
            ServiceError::generic()
        })?;

        let grounding = extract_grounding(response.grounding_metadata.as_ref());

        let shopping_comparison = match (shopping_list, report.shopping_comparison) {
            (Some(_), Some(comparisons)) => Some(rank_comparisons(comparisons)),
            (None, Some(_)) => {
                tracing::debug!("discarding shopping comparison returned without a list");
                None
            }
            (_, None) => None,
        };

        tracing::info!(
            produce = report.produce.len(),
            stores = report.stores.len(),
            sources = grounding.sources.len(),
            comparisons = shopping_comparison.as_ref().map_or(0, Vec::len),
            "market query complete"
        );

        Ok(QueryResult {
            summary: report.summary,
            produce: report.produce,
            stores: report.stores,
            sources: grounding.sources,
            search_affordance: grounding.search_affordance,
            shopping_comparison,
        })
    }
}

impl QueryPipeline<GeminiClient> {
    /// A pipeline backed by the Gemini API as configured in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`GeminiError`] if the HTTP client cannot be built or the
    /// configured base URL is invalid.
    pub fn from_config(config: &AppConfig) -> Result<Self, GeminiError> {
        let client = GeminiClient::with_base_url(
            config.gemini_api_key.as_deref(),
            &config.gemini_model,
            &config.gemini_base_url,
        )?;
        Ok(Self::new(client, PipelineOptions::from_config(config)))
    }
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
