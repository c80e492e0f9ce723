pub mod change;
pub mod client;
pub mod error;
pub mod extract;
pub mod normalize;
pub mod state;
pub mod summary;
pub mod types;

pub use change::has_changed;
pub use client::FulfillmentClient;
pub use error::{ExtractionError, ScraperError};
pub use extract::{decode_document, extract_payload};
pub use normalize::{normalize_report, normalize_stock};
pub use state::StateFile;
pub use summary::{
    DeliveryAvailability, PickupStatus, StockLine, StockReport, StockSummary, StoreAvailability,
};
