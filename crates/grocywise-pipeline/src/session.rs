//! Lifecycle of a query as seen by a presentation layer.

use grocywise_core::{FilterSet, LocationSelector, QueryResult};
use grocywise_gemini::GenerationService;
use thiserror::Error;

use crate::error::ServiceError;
use crate::pipeline::QueryPipeline;

#[derive(Debug, Clone, PartialEq)]
pub enum QueryState {
    Idle,
    Loading,
    Succeeded(QueryResult),
    Failed(ServiceError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("a query is already in flight")]
    Busy,

    #[error("no query is in flight")]
    NotLoading,
}

/// Tracks one query at a time: `Idle -> Loading -> Succeeded | Failed`,
/// and back to `Loading` on the next submit.
///
/// Entering `Loading` drops any previous result or error, so a stale
/// result is never shown next to a new failure.
#[derive(Debug, Clone, PartialEq)]
pub struct QuerySession {
    state: QueryState,
}

impl Default for QuerySession {
    fn default() -> Self {
        Self::new()
    }
}

impl QuerySession {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: QueryState::Idle,
        }
    }

    #[must_use]
    pub fn state(&self) -> &QueryState {
        &self.state
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self.state, QueryState::Loading)
    }

    #[must_use]
    pub fn result(&self) -> Option<&QueryResult> {
        match &self.state {
            QueryState::Succeeded(result) => Some(result),
            _ => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&ServiceError> {
        match &self.state {
            QueryState::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// Enter `Loading`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Busy`] if a query is already in flight.
    pub fn begin(&mut self) -> Result<(), SessionError> {
        if self.is_loading() {
            return Err(SessionError::Busy);
        }
        self.state = QueryState::Loading;
        Ok(())
    }

    /// Record the outcome of the in-flight query.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotLoading`] if no query was started.
    pub fn settle(
        &mut self,
        outcome: Result<QueryResult, ServiceError>,
    ) -> Result<&QueryState, SessionError> {
        if !self.is_loading() {
            return Err(SessionError::NotLoading);
        }
        self.state = match outcome {
            Ok(result) => QueryState::Succeeded(result),
            Err(err) => QueryState::Failed(err),
        };
        Ok(&self.state)
    }

    /// Begin, run the pipeline and settle in one step.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Busy`] if a query is already in flight. A
    /// pipeline failure is not an error here; it lands in
    /// [`QueryState::Failed`].
    pub async fn submit<S: GenerationService>(
        &mut self,
        pipeline: &QueryPipeline<S>,
        location: &LocationSelector,
        shopping_list: Option<&str>,
        filters: Option<&FilterSet>,
    ) -> Result<&QueryState, SessionError> {
        self.begin()?;
        let outcome = pipeline.run(location, shopping_list, filters).await;
        self.settle(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(summary: &str) -> QueryResult {
        QueryResult {
            summary: summary.to_string(),
            produce: vec![],
            stores: vec![],
            sources: vec![],
            search_affordance: None,
            shopping_comparison: None,
        }
    }

    #[test]
    fn starts_idle() {
        let session = QuerySession::new();
        assert_eq!(session.state(), &QueryState::Idle);
        assert!(session.result().is_none());
        assert!(session.error().is_none());
    }

    #[test]
    fn success_holds_result() {
        let mut session = QuerySession::new();
        session.begin().unwrap();
        assert!(session.is_loading());
        session.settle(Ok(result("cheap berries"))).unwrap();
        assert_eq!(session.result().unwrap().summary, "cheap berries");
    }

    #[test]
    fn second_begin_while_loading_is_busy() {
        let mut session = QuerySession::new();
        session.begin().unwrap();
        assert_eq!(session.begin(), Err(SessionError::Busy));
    }

    #[test]
    fn new_query_clears_previous_result() {
        let mut session = QuerySession::new();
        session.begin().unwrap();
        session.settle(Ok(result("first"))).unwrap();

        session.begin().unwrap();
        assert!(session.result().is_none());
        session.settle(Err(ServiceError::generic())).unwrap();

        assert!(session.result().is_none());
        assert_eq!(
            session.error().map(ServiceError::message),
            Some(ServiceError::GENERIC_MESSAGE)
        );
    }

    #[test]
    fn failure_can_be_retried() {
        let mut session = QuerySession::new();
        session.begin().unwrap();
        session.settle(Err(ServiceError::generic())).unwrap();
        session.begin().unwrap();
        session.settle(Ok(result("retry worked"))).unwrap();
        assert!(session.error().is_none());
        assert_eq!(session.result().unwrap().summary, "retry worked");
    }

    #[test]
    fn settle_without_begin_is_rejected() {
        let mut session = QuerySession::new();
        assert_eq!(
            session.settle(Ok(result("x"))).unwrap_err(),
            SessionError::NotLoading
        );
        assert_eq!(session.state(), &QueryState::Idle);
    }
}
