// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod routes;
mod session;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use clap::Parser;
use mapd::InMemorySessionStore;
use mapd_api::AuthConfig;
use mapd_pda::{MockProviderDataApi, RetryPolicy, RetryingProviderData};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::routes::{
    handle_add_bank_account, handle_add_contract_manager, handle_apply_hold_to_offices,
    handle_apply_intervention_to_offices, handle_assign_bank_account, handle_assign_chambers,
    handle_assign_office_contract_manager, handle_change_advocate_details,
    handle_change_firm_liaison_manager, handle_change_firm_name, handle_change_lsp_details,
    handle_change_office_liaison_manager, handle_change_office_vat, handle_change_payment_method,
    handle_commit_new_office, handle_get_new_office, handle_get_office, handle_get_provider,
    handle_get_wizard_step, handle_health, handle_list_contract_managers, handle_login,
    handle_logout, handle_reassign_head_office, handle_remove_contract_managers,
    handle_remove_intervention_from_offices, handle_search_bank_accounts, handle_search_chambers,
    handle_search_providers, handle_set_firm_active, handle_set_firm_debt_recovery,
    handle_set_firm_false_balance, handle_set_firm_hold_payments, handle_set_firm_intervened,
    handle_set_office_active, handle_set_office_debt_recovery, handle_set_office_false_balance,
    handle_set_office_hold_payments, handle_set_office_intervened, handle_start_new_office,
    handle_submit_wizard_step,
};
use crate::session::{purge_expired_sessions, session_layer};

/// Manage a Provider's Data - HTTP server for maintaining legal aid provider records
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to bind the server to
    #[arg(short, long, env = "MAPD_PORT", default_value_t = 3000)]
    port: u16,

    /// Address to bind the server to
    #[arg(short, long, env = "MAPD_BIND", default_value = "127.0.0.1")]
    bind: String,

    /// Path to a Provider Data fixture file. If not provided, uses the bundled fixture.
    #[arg(short, long, env = "MAPD_FIXTURES")]
    fixtures: Option<PathBuf>,

    /// Password that logs a caseworker in
    #[arg(long, env = "MAPD_PASSWORD")]
    password: Option<String>,

    /// Password that logs an administrator in
    #[arg(long, env = "MAPD_ADMIN_PASSWORD")]
    admin_password: Option<String>,

    /// Disable the login guard. Every request acts as an administrator.
    #[arg(long, env = "MAPD_SKIP_AUTH")]
    skip_auth: bool,

    /// Minutes a session may stay idle before its answers are dropped
    #[arg(long, env = "MAPD_SESSION_TIMEOUT_MINUTES", default_value_t = 30)]
    session_timeout_minutes: i64,
}

/// Provider Data client used by the server.
pub type ProviderData = RetryingProviderData<MockProviderDataApi>;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// The Provider Data API client, retrying failed reads.
    pub provider_data: Arc<Mutex<ProviderData>>,
    /// Wizard answers, logins and the contract manager directory.
    pub sessions: Arc<Mutex<InMemorySessionStore>>,
    /// Login configuration.
    pub auth: Arc<AuthConfig>,
}

impl AppState {
    fn new(client: MockProviderDataApi, sessions: InMemorySessionStore, auth: AuthConfig) -> Self {
        Self {
            provider_data: Arc::new(Mutex::new(RetryingProviderData::new(
                client,
                RetryPolicy::default(),
            ))),
            sessions: Arc::new(Mutex::new(sessions)),
            auth: Arc::new(auth),
        }
    }
}

/// Build the application router with all routes.
fn build_router(app_state: AppState) -> Router {
    let provider_routes: Router<AppState> = Router::new()
        .route("/", get(handle_get_provider))
        .route("/name", post(handle_change_firm_name))
        .route("/lsp-details", post(handle_change_lsp_details))
        .route("/advocate-details", post(handle_change_advocate_details))
        .route("/chambers", post(handle_assign_chambers))
        .route("/liaison-manager", post(handle_change_firm_liaison_manager))
        .route("/head-office", post(handle_reassign_head_office))
        .route("/bank-accounts", get(handle_search_bank_accounts))
        .route("/active", post(handle_set_firm_active))
        .route("/hold-payments", post(handle_set_firm_hold_payments))
        .route("/intervened", post(handle_set_firm_intervened))
        .route("/false-balance", post(handle_set_firm_false_balance))
        .route("/debt-recovery", post(handle_set_firm_debt_recovery))
        .route("/offices/hold-payments", post(handle_apply_hold_to_offices))
        .route("/offices/intervene", post(handle_apply_intervention_to_offices))
        .route(
            "/offices/remove-intervention",
            post(handle_remove_intervention_from_offices),
        )
        .route("/new-office", post(handle_start_new_office))
        .route(
            "/new-office/contact-details",
            get(handle_get_new_office).post(handle_commit_new_office),
        );

    let office_routes: Router<AppState> = Router::new()
        .route("/", get(handle_get_office))
        .route("/active", post(handle_set_office_active))
        .route("/hold-payments", post(handle_set_office_hold_payments))
        .route("/intervened", post(handle_set_office_intervened))
        .route("/false-balance", post(handle_set_office_false_balance))
        .route("/debt-recovery", post(handle_set_office_debt_recovery))
        .route("/contract-manager", post(handle_assign_office_contract_manager))
        .route("/liaison-manager", post(handle_change_office_liaison_manager))
        .route("/payment-method", post(handle_change_payment_method))
        .route("/vat-number", post(handle_change_office_vat))
        .route("/bank-account", post(handle_add_bank_account))
        .route("/bank-account/assign", post(handle_assign_bank_account));

    Router::new()
        .route("/health", get(handle_health))
        .route("/login", post(handle_login))
        .route("/logout", post(handle_logout))
        .route(
            "/add-provider/{step}",
            get(handle_get_wizard_step).post(handle_submit_wizard_step),
        )
        .route("/providers", get(handle_search_providers))
        .route("/chambers", get(handle_search_chambers))
        .route(
            "/contract-managers",
            get(handle_list_contract_managers).post(handle_add_contract_manager),
        )
        .route(
            "/contract-managers/remove",
            post(handle_remove_contract_managers),
        )
        .nest("/provider/{firm_id}/office/{office_code}", office_routes)
        .nest("/provider/{firm_id}", provider_routes)
        .layer(middleware::from_fn_with_state(
            app_state.clone(),
            session_layer,
        ))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Manage a Provider's Data");

    let client: MockProviderDataApi = if let Some(path) = &args.fixtures {
        info!("Using Provider Data fixture at: {}", path.display());
        MockProviderDataApi::from_fixture_file(path)?
    } else {
        info!("Using bundled Provider Data fixture");
        MockProviderDataApi::with_default_fixture()?
    };

    if args.skip_auth {
        warn!("Login guard disabled; every request acts as an administrator");
    } else if args.password.is_none() && args.admin_password.is_none() {
        warn!("No password configured; nobody will be able to log in");
    }

    let auth: AuthConfig = AuthConfig {
        password: args.password,
        admin_password: args.admin_password,
        skip_auth: args.skip_auth,
    };
    let sessions: InMemorySessionStore =
        InMemorySessionStore::new(time::Duration::minutes(args.session_timeout_minutes));
    let app_state: AppState = AppState::new(client, sessions, auth);

    // Drop idle sessions once a minute
    let purge_state: AppState = app_state.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(std::time::Duration::from_secs(60));
        loop {
            interval.tick().await;
            purge_expired_sessions(&purge_state).await;
        }
    });

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests;
