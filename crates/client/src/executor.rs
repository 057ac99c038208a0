use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::types::{GraphQLRequest, GraphQLResponse};
use hub_validator::QueryValidator;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use serde_json::Value;
use std::time::Instant;

/// Successful upstream call
#[derive(Debug, Clone)]
pub struct ExecutionOutcome {
    pub response: GraphQLResponse,
    /// Attempts beyond the first one
    pub retries: u32,
}

/// Posts GraphQL documents to the configured endpoint
#[derive(Debug, Clone)]
pub struct GraphQLExecutor {
    http: reqwest::Client,
    config: ClientConfig,
    url: String,
    validator: QueryValidator,
}

impl GraphQLExecutor {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(token) = config.token.as_deref().filter(|t| !t.is_empty()) {
            let value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| {
                ClientError::InvalidRequest("Token contains characters not allowed in a header".into())
            })?;
            headers.insert(AUTHORIZATION, value);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;
        let url = config.graphql_url();

        Ok(Self {
            http,
            config,
            url,
            validator: QueryValidator::default(),
        })
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Send `request` with the retry policy and no local validation
    pub async fn execute(&self, request: &GraphQLRequest) -> Result<ExecutionOutcome> {
        let started = Instant::now();
        let mut retries = 0;

        loop {
            let attempt = tokio::time::timeout(self.config.timeout, self.send_once(request))
                .await
                .unwrap_or_else(|_| Err(ClientError::Timeout(self.config.timeout)));

            match attempt {
                Ok(response) => {
                    log::debug!(
                        "GraphQL request completed in {:?} after {retries} retries, complexity: {}",
                        started.elapsed(),
                        response.query_complexity()
                    );
                    return Ok(ExecutionOutcome { response, retries });
                }
                Err(err) if err.is_retryable() && retries < self.config.max_retries => {
                    let delay = self.config.backoff_for(retries);
                    retries += 1;
                    log::warn!("Retrying GraphQL request, attempt {retries} in {delay:?}: {err}");
                    tokio::time::sleep(delay).await;
                }
                Err(err) => {
                    log::warn!("GraphQL request failed after {retries} retries: {err}");
                    return Err(err);
                }
            }
        }
    }

    /// Reject obviously malformed documents locally, then [`execute`](Self::execute)
    ///
    /// Entry point for library callers that hold no schema: only syntax and
    /// operation shape are checked. The MCP tools validate against the cached
    /// schema through `SchemaService` first and call [`execute`](Self::execute)
    /// directly.
    pub async fn execute_query(&self, request: &GraphQLRequest) -> Result<ExecutionOutcome> {
        log::debug!("Executing GraphQL query: {}", truncate(&request.query));
        let validation = self.validator.validate(&request.query, None);
        if !validation.valid {
            return Err(ClientError::InvalidRequest(validation.error_summary()));
        }
        self.execute(request).await
    }

    /// Like [`execute_query`](Self::execute_query), but the document must be a mutation
    ///
    /// Schema-less like `execute_query`; no destructive-keyword guard is applied here.
    pub async fn execute_mutation(&self, request: &GraphQLRequest) -> Result<ExecutionOutcome> {
        log::info!("Executing GraphQL mutation: {}", truncate(&request.query));
        let validation = self.validator.validate_mutation(&request.query, None);
        if !validation.valid {
            return Err(ClientError::InvalidRequest(validation.error_summary()));
        }
        self.execute(request).await
    }

    /// Run an introspection document and return its `data`
    pub async fn introspect(&self, query: &str) -> Result<Value> {
        log::info!("Performing schema introspection");
        let outcome = self.execute(&GraphQLRequest::new(query)).await?;
        outcome
            .response
            .data
            .ok_or_else(|| ClientError::Decode("introspection response carried no data".into()))
    }

    async fn send_once(&self, request: &GraphQLRequest) -> Result<GraphQLResponse> {
        log::debug!("GraphQL Request: POST {}", self.url);
        let response = self.http.post(&self.url).json(request).send().await?;
        let status = response.status();
        log::debug!("GraphQL Response: {status}");

        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    log::warn!("Could not read body of HTTP {status} response: {e}");
                    String::new()
                }
            };
            return Err(ClientError::upstream(status.as_u16(), &body));
        }

        let body = response.bytes().await?;
        let parsed: GraphQLResponse =
            serde_json::from_slice(&body).map_err(|e| ClientError::Decode(e.to_string()))?;

        if parsed.has_errors() {
            let errors = parsed.errors.unwrap_or_default();
            log::warn!("GraphQL response contains {} errors", errors.len());
            return Err(ClientError::GraphQl { errors });
        }

        Ok(parsed)
    }
}

fn truncate(query: &str) -> String {
    const MAX: usize = 100;
    let compact: String = query.split_whitespace().collect::<Vec<_>>().join(" ");
    if compact.chars().count() <= MAX {
        return compact;
    }
    let head: String = compact.chars().take(MAX).collect();
    format!("{head}...")
}
