//! Core services for the FIX gateway.
//!
//! This crate holds the gateway's business logic: the status mapper that
//! translates vendor codes into the canonical order status, the
//! reconciliation service that folds inbound execution reports into the
//! stores, the order and market-data services behind the HTTP layer, and the
//! engine that wires everything together and drives the inbound report loop.

/// Engine wiring and the inbound report loop.
pub mod engine;
/// Market data service.
pub mod market;
/// Order creation and lookup service.
pub mod orders;
/// Execution report reconciliation.
pub mod reconcile;
/// Vendor status-code mapping.
pub mod status_map;

pub use engine::{EngineError, GatewayEngine};
pub use market::{MarketDataService, QuoteError};
pub use orders::{OrderError, OrderService};
pub use reconcile::ReconciliationService;
pub use status_map::map_status;
