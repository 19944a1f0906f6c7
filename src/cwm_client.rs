//! HTTP client for the ConnectWise Manage API.
//!
//! This module provides the `CwmClient` struct for making authenticated
//! requests to the Manage REST API.
//!
//! # Error Handling
//!
//! Every operation issues exactly one HTTP request. Failures are classified
//! (authentication, not-found, rate limit, timeout, ...) but never retried;
//! a failed call is terminal for that operation and the caller decides what
//! to do next.
//!
//! # Security
//!
//! The private API key is never logged. All error messages are sanitized
//! before logging.

use std::time::Duration;

use reqwest::{Client, Method, StatusCode};
use url::Url;

use crate::config::Config;
use crate::error::AnvilError;
use crate::models::{
    ApiError, Company, Member, NewNote, NewTicket, NewTimeEntry, SystemInfo, Ticket, TicketNote,
    TimeEntry,
};

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Versioned Accept header required by the Manage API.
const CWM_ACCEPT_HEADER: &str = "application/vnd.connectwise.com+json; version=2022.1";

/// Path prefix of the versioned REST API on every Manage server.
const API_BASE_PATH: &str = "/v4_6_release/apis/3.0";

/// Default page size for list operations when none is requested.
const DEFAULT_PAGE_SIZE: u32 = 25;

/// Maximum length for HTTP error response bodies to avoid leaking verbose
/// server internals.
const MAX_ERROR_BODY_LEN: usize = 500;

/// HTTP client for the ConnectWise Manage API.
///
/// Handles authentication, request formatting, and response parsing
/// for all Manage API operations.
///
/// # Example
///
/// ```ignore
/// let config = Config::from_env()?;
/// let client = CwmClient::new(&config)?;
///
/// let tickets = client.list_tickets(ListParams::new().with_page_size(5)).await?;
/// ```
#[derive(Clone)]
pub struct CwmClient {
    /// The underlying HTTP client (cloning is cheap).
    http: Client,

    /// Manage server host (e.g. `na.myconnectwise.net`).
    server: String,

    /// Base URL for the REST API (host + versioned path).
    base_url: String,

    /// Precomputed `Basic ...` Authorization header value.
    /// SECURITY: Contains the encoded private key - never log this value!
    auth_header: String,

    /// Vendor-issued client ID, sent on every request.
    client_id: String,

    /// Company identifier, used for web deep links.
    company: String,

    /// Private key kept only for sanitizing error messages.
    /// SECURITY: Never log this value!
    private_key: String,
}

impl CwmClient {
    /// Creates a new Manage client from configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Configuration containing server host, company and keys
    ///
    /// # Errors
    ///
    /// Returns `AnvilError::HttpClient` if the HTTP client fails to
    /// initialize, or `AnvilError::Config` if the server host does not form
    /// a valid URL.
    pub fn new(config: &Config) -> Result<Self, AnvilError> {
        Self::with_endpoint(config, Self::api_base_url(&config.server))
    }

    /// Creates a Manage client against an explicit API endpoint.
    ///
    /// [`CwmClient::new`] derives the endpoint from the configured server
    /// host; this constructor takes it verbatim. Useful for instances
    /// fronted by a proxy and for tests against a local mock server.
    ///
    /// # Errors
    ///
    /// Returns `AnvilError::HttpClient` if the HTTP client fails to
    /// initialize, or `AnvilError::Config` if the endpoint is not a valid
    /// URL.
    pub fn with_endpoint(
        config: &Config,
        base_url: impl Into<String>,
    ) -> Result<Self, AnvilError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(AnvilError::HttpClient)?;

        let base_url = base_url.into().trim_end_matches('/').to_string();

        // The endpoint came from configuration; make sure it forms a real
        // URL before it gets interpolated into every request.
        Url::parse(&base_url).map_err(|e| {
            AnvilError::invalid_config(format!("API endpoint is not a valid URL: {}", e))
        })?;

        Ok(Self {
            http,
            server: config.server.clone(),
            base_url,
            auth_header: format!("Basic {}", config.auth_token()),
            client_id: config.client_id.clone(),
            company: config.company.clone(),
            private_key: config.private_key.clone(),
        })
    }

    /// Builds the versioned API base URL for a server host.
    fn api_base_url(server: &str) -> String {
        format!("https://{}{}", server, API_BASE_PATH)
    }

    /// Returns the web URL for viewing a ticket in the Manage UI.
    ///
    /// # Arguments
    ///
    /// * `ticket_id` - The unique ticket id
    ///
    /// # Returns
    ///
    /// A URL string that can be used to view the ticket in a browser.
    pub fn ticket_web_url(&self, ticket_id: i32) -> String {
        format!(
            "https://{}/v4_6_release/services/system_io/Service/fv_sr100_request.rala?service_recid={}&companyName={}",
            self.server,
            ticket_id,
            urlencoding::encode(&self.company)
        )
    }

    /// Tests connectivity to the Manage server.
    ///
    /// Retrieves the system info endpoint to verify the server is reachable
    /// and authentication is working.
    ///
    /// # Errors
    ///
    /// Returns `AnvilError::ConnectionTest` if the connection fails,
    /// with details about the failure reason.
    pub async fn test_connection(&self) -> Result<SystemInfo, AnvilError> {
        tracing::debug!("Testing connection to ConnectWise Manage");

        match self.system_info().await {
            Ok(info) => {
                tracing::info!(version = info.display_version(), "Connection test successful");
                Ok(info)
            }
            Err(AnvilError::Authentication) => Err(AnvilError::connection_test(
                "authentication failed - verify CWM_COMPANY, CWM_PUBLIC_KEY and CWM_PRIVATE_KEY",
            )),
            Err(AnvilError::Timeout { duration, .. }) => {
                Err(AnvilError::connection_test(format!(
                    "connection timed out after {:?} - verify CWM_SERVER is correct and the server is reachable",
                    duration
                )))
            }
            Err(AnvilError::Http(e)) => {
                let message = AnvilError::sanitize_message(&e.to_string(), &self.private_key);
                Err(AnvilError::connection_test(format!(
                    "HTTP error: {} - verify CWM_SERVER is correct",
                    message
                )))
            }
            Err(e) => {
                let message = AnvilError::sanitize_message(&e.to_string(), &self.private_key);
                Err(AnvilError::connection_test(message))
            }
        }
    }

    /// Retrieves server version information.
    pub async fn system_info(&self) -> Result<SystemInfo, AnvilError> {
        self.get("/system/info", None).await
    }

    /// Makes a request to the Manage API.
    ///
    /// Handles authentication headers, query parameters, body encoding and
    /// response parsing. Exactly one HTTP request per call.
    ///
    /// # Arguments
    ///
    /// * `method` - HTTP method
    /// * `path` - API endpoint path
    /// * `query` - Optional query parameters
    /// * `body` - Optional JSON body (POST)
    ///
    /// # Type Parameters
    ///
    /// * `T` - The expected response data type
    async fn request<T>(
        &self,
        method: Method,
        path: &str,
        query: Option<&[(&str, String)]>,
        body: Option<serde_json::Value>,
    ) -> Result<T, AnvilError>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);

        tracing::debug!(
            method = %method,
            path = %path,
            "Making Manage API request"
        );

        let mut req = self
            .http
            .request(method.clone(), &url)
            .header("Authorization", &self.auth_header)
            .header("clientId", &self.client_id)
            .header("Content-Type", "application/json")
            .header("Accept", CWM_ACCEPT_HEADER);

        if let Some(params) = query {
            req = req.query(params);
        }

        if let Some(data) = body {
            req = req.json(&data);
        }

        let response = req.send().await.map_err(|e| {
            // Check for timeout specifically
            if e.is_timeout() {
                return AnvilError::Timeout {
                    duration: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
                    operation: format!("{} {}", method, path),
                };
            }
            AnvilError::Http(e)
        })?;
        let status = response.status();

        if !status.is_success() {
            return Err(self.handle_http_error(status, response).await);
        }

        let body = response.text().await.map_err(AnvilError::Http)?;

        tracing::trace!(body = %body, "Manage API response");

        serde_json::from_str(&body).map_err(AnvilError::Serialization)
    }

    /// Handles HTTP-level errors and converts them to AnvilError.
    async fn handle_http_error(&self, status: StatusCode, response: reqwest::Response) -> AnvilError {
        // Rate limit responses may carry a retry-after hint
        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs);

        let body = response.text().await.unwrap_or_default();
        // Sanitize the body to ensure no key leakage
        let body = AnvilError::sanitize_message(&body, &self.private_key);

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AnvilError::Authentication,
            StatusCode::NOT_FOUND => AnvilError::NotFound {
                resource: "resource".to_string(),
            },
            StatusCode::TOO_MANY_REQUESTS => {
                tracing::warn!("Rate limited by Manage server");
                AnvilError::RateLimited { retry_after }
            }
            StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT => {
                tracing::warn!(status = %status, "Manage server temporarily unavailable");
                AnvilError::ServiceUnavailable { status }
            }
            _ => {
                // Prefer the structured vendor envelope when the body carries one
                if let Some(api_error) = ApiError::from_body(&body) {
                    return AnvilError::Api {
                        code: api_error.code.unwrap_or_else(|| status.to_string()),
                        message: api_error.message.unwrap_or_default(),
                    };
                }

                // Truncate to avoid dumping verbose server internals
                let body = if body.len() > MAX_ERROR_BODY_LEN {
                    format!("{}...[truncated]", &body[..MAX_ERROR_BODY_LEN])
                } else {
                    body
                };
                AnvilError::HttpStatus { status, body }
            }
        }
    }

    /// Makes a GET request to the Manage API.
    async fn get<T>(&self, path: &str, query: Option<&[(&str, String)]>) -> Result<T, AnvilError>
    where
        T: serde::de::DeserializeOwned,
    {
        self.request(Method::GET, path, query, None).await
    }

    /// Makes a POST request to the Manage API.
    async fn post<T, B>(&self, path: &str, payload: &B) -> Result<T, AnvilError>
    where
        T: serde::de::DeserializeOwned,
        B: serde::Serialize,
    {
        let body = serde_json::to_value(payload).map_err(AnvilError::Serialization)?;
        self.request(Method::POST, path, None, Some(body)).await
    }

    // ========================================================================
    // Read operations
    // ========================================================================

    /// Lists companies with optional filtering and pagination.
    ///
    /// # Arguments
    ///
    /// * `params` - Condition string and pagination
    ///
    /// # Example
    ///
    /// ```ignore
    /// // First 5 companies
    /// let companies = client.list_companies(ListParams::new().with_page_size(5)).await?;
    /// ```
    pub async fn list_companies(&self, params: ListParams) -> Result<Vec<Company>, AnvilError> {
        self.get("/company/companies", Some(&params.to_query())).await
    }

    /// Gets a single company by id.
    ///
    /// # Errors
    ///
    /// Returns `AnvilError::NotFound` if the company doesn't exist.
    pub async fn get_company(&self, company_id: i32) -> Result<Company, AnvilError> {
        let path = format!("/company/companies/{}", company_id);

        self.get(&path, None).await.map_err(|e| {
            // Convert generic NotFound to one naming the specific company
            if matches!(e, AnvilError::NotFound { .. }) {
                AnvilError::not_found(format!("company {}", company_id))
            } else {
                e
            }
        })
    }

    /// Lists service tickets with optional filtering and pagination.
    ///
    /// # Arguments
    ///
    /// * `params` - Condition string and pagination
    ///
    /// # Example
    ///
    /// ```ignore
    /// // Recent service tickets
    /// let params = ListParams::new()
    ///     .with_conditions("recordType='ServiceTicket'")
    ///     .with_page_size(5);
    /// let tickets = client.list_tickets(params).await?;
    /// ```
    pub async fn list_tickets(&self, params: ListParams) -> Result<Vec<Ticket>, AnvilError> {
        self.get("/service/tickets", Some(&params.to_query())).await
    }

    /// Lists the notes on a ticket.
    ///
    /// # Errors
    ///
    /// Returns `AnvilError::NotFound` if the ticket doesn't exist.
    pub async fn list_ticket_notes(&self, ticket_id: i32) -> Result<Vec<TicketNote>, AnvilError> {
        let path = format!("/service/tickets/{}/notes", ticket_id);

        self.get(&path, None).await.map_err(|e| {
            if matches!(e, AnvilError::NotFound { .. }) {
                AnvilError::not_found(format!("ticket {}", ticket_id))
            } else {
                e
            }
        })
    }

    /// Lists time entries with optional filtering and pagination.
    pub async fn list_time_entries(&self, params: ListParams) -> Result<Vec<TimeEntry>, AnvilError> {
        self.get("/time/entries", Some(&params.to_query())).await
    }

    /// Lists members with optional filtering and pagination.
    ///
    /// # Example
    ///
    /// ```ignore
    /// // Active members only
    /// let params = ListParams::new().with_conditions("inactiveFlag=false");
    /// let members = client.list_members(params).await?;
    /// ```
    pub async fn list_members(&self, params: ListParams) -> Result<Vec<Member>, AnvilError> {
        self.get("/system/members", Some(&params.to_query())).await
    }

    /// Gets the member record of the authenticated API account.
    pub async fn my_account(&self) -> Result<Member, AnvilError> {
        self.get("/system/myaccount", None).await
    }

    // ========================================================================
    // Write operations
    // ========================================================================

    /// Creates a new service ticket.
    ///
    /// # Arguments
    ///
    /// * `ticket` - The ticket payload (summary, company, board, optionals)
    ///
    /// # Returns
    ///
    /// The created ticket with its assigned id.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let ticket = client
    ///     .create_ticket(
    ///         &NewTicket::new("Printer not working", company_id, board_id)
    ///             .with_initial_description("Reported by the front desk."),
    ///     )
    ///     .await?;
    /// println!("Created ticket #{}", ticket.id);
    /// ```
    pub async fn create_ticket(&self, ticket: &NewTicket) -> Result<Ticket, AnvilError> {
        if ticket.summary.trim().is_empty() {
            return Err(AnvilError::validation("ticket summary is required"));
        }

        let created: Ticket = self.post("/service/tickets", ticket).await?;

        tracing::info!(ticket_id = created.id, "Created ticket");

        Ok(created)
    }

    /// Adds a note to an existing ticket.
    ///
    /// # Arguments
    ///
    /// * `ticket_id` - The unique ticket id
    /// * `note` - The note payload (text and flags)
    ///
    /// # Returns
    ///
    /// The created note.
    pub async fn add_ticket_note(
        &self,
        ticket_id: i32,
        note: &NewNote,
    ) -> Result<TicketNote, AnvilError> {
        if note.text.trim().is_empty() {
            return Err(AnvilError::validation("note text is required"));
        }

        let path = format!("/service/tickets/{}/notes", ticket_id);

        let created: TicketNote = self.post(&path, note).await.map_err(|e| {
            if matches!(e, AnvilError::NotFound { .. }) {
                AnvilError::not_found(format!("ticket {}", ticket_id))
            } else {
                e
            }
        })?;

        tracing::info!(ticket_id, note_id = created.id, "Added ticket note");

        Ok(created)
    }

    /// Creates a new time entry.
    ///
    /// # Arguments
    ///
    /// * `entry` - The time entry payload
    ///
    /// # Returns
    ///
    /// The created time entry with its assigned id.
    pub async fn create_time_entry(&self, entry: &NewTimeEntry) -> Result<TimeEntry, AnvilError> {
        let created: TimeEntry = self.post("/time/entries", entry).await?;

        tracing::info!(time_entry_id = created.id, "Created time entry");

        Ok(created)
    }
}

/// Parameters for list operations.
///
/// The condition string is a vendor filter expression passed through to the
/// API verbatim, with no local validation.
#[derive(Debug, Clone, Default)]
pub struct ListParams {
    /// Vendor condition string (e.g. `recordType='ServiceTicket'`).
    conditions: Option<String>,

    /// Maximum number of rows per page.
    page_size: Option<u32>,

    /// 1-based page number.
    page: Option<u32>,

    /// Field to order by (e.g. `id desc`).
    order_by: Option<String>,
}

impl ListParams {
    /// Creates empty list parameters (default page size, no filter).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the condition string, passed through to the API verbatim.
    pub fn with_conditions(mut self, conditions: impl Into<String>) -> Self {
        self.conditions = Some(conditions.into());
        self
    }

    /// Sets the maximum number of rows to return.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Sets the 1-based page number.
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Sets the ordering expression (e.g. `id desc`).
    pub fn with_order_by(mut self, order_by: impl Into<String>) -> Self {
        self.order_by = Some(order_by.into());
        self
    }

    /// Converts the parameters to query pairs.
    ///
    /// `pageSize` is always sent (defaulting when unset); `conditions` is
    /// only sent when non-empty.
    fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();

        if let Some(conditions) = self.conditions.as_deref() {
            if !conditions.is_empty() {
                query.push(("conditions", conditions.to_string()));
            }
        }

        query.push((
            "pageSize",
            self.page_size.unwrap_or(DEFAULT_PAGE_SIZE).to_string(),
        ));

        if let Some(page) = self.page {
            query.push(("page", page.to_string()));
        }

        if let Some(order_by) = self.order_by.as_deref() {
            query.push(("orderBy", order_by.to_string()));
        }

        query
    }
}
