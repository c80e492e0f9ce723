//! Normalized availability facts and their deterministic text rendering.
//!
//! Identical facts must always render to identical text: the rendered
//! summary is what gets compared against the last known state.

use std::fmt;

use stockwatch_core::ModelSpec;

/// Separator between rendered lines and between report sections.
pub const LINE_SEPARATOR: &str = "\n\n";

/// Pickup availability of one model at one store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickupStatus {
    Available,
    Unavailable,
    /// No entry for the model at this store.
    Unknown,
}

impl PickupStatus {
    /// Only the literal `"available"` counts as available.
    #[must_use]
    pub fn from_display(display: Option<&str>) -> Self {
        match display {
            Some("available") => PickupStatus::Available,
            Some(_) => PickupStatus::Unavailable,
            None => PickupStatus::Unknown,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreAvailability {
    pub store_number: Option<String>,
    pub name: String,
    pub address_lines: Vec<String>,
    pub phone: Option<String>,
    pub reservation_url: Option<String>,
    pub status: PickupStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryAvailability {
    pub is_buyable: bool,
    pub estimated_date: Option<String>,
}

/// One rendered hit in a [`StockSummary`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StockLine {
    Pickup(StoreAvailability),
    Delivery(DeliveryAvailability),
}

impl fmt::Display for StockLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StockLine::Pickup(store) => {
                write!(f, "✅ In-store pickup: {}", store.name)?;
                if !store.address_lines.is_empty() {
                    write!(f, "\nAddress: {}", store.address_lines.join(", "))?;
                }
                if let Some(phone) = &store.phone {
                    write!(f, "\nPhone: {phone}")?;
                }
                if let Some(url) = &store.reservation_url {
                    write!(f, "\nReservation: {url}")?;
                }
                Ok(())
            }
            StockLine::Delivery(delivery) => match &delivery.estimated_date {
                Some(date) => write!(f, "📦 Delivery available, estimated arrival: {date}"),
                None => write!(f, "📦 Delivery available"),
            },
        }
    }
}

/// Availability hits for one model: pickup lines in store order, then delivery.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StockSummary {
    lines: Vec<StockLine>,
}

impl StockSummary {
    #[must_use]
    pub fn new(lines: Vec<StockLine>) -> Self {
        Self { lines }
    }

    #[must_use]
    pub fn lines(&self) -> &[StockLine] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Renders the summary text; empty when there are no hits.
    #[must_use]
    pub fn render(&self) -> String {
        self.lines
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(LINE_SEPARATOR)
    }
}

impl fmt::Display for StockSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Summaries for every watched model of one check cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StockReport {
    sections: Vec<(ModelSpec, StockSummary)>,
}

impl StockReport {
    #[must_use]
    pub fn new(sections: Vec<(ModelSpec, StockSummary)>) -> Self {
        Self { sections }
    }

    #[must_use]
    pub fn sections(&self) -> &[(ModelSpec, StockSummary)] {
        &self.sections
    }

    /// `true` when no model has any hit.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.iter().all(|(_, summary)| summary.is_empty())
    }

    /// Renders `"{name} ({id})\n{summary}"` for each model with hits, in
    /// section order. Empty when no model has hits.
    #[must_use]
    pub fn render(&self) -> String {
        self.sections
            .iter()
            .filter(|(_, summary)| !summary.is_empty())
            .map(|(model, summary)| format!("{} ({})\n{}", model.name, model.id, summary.render()))
            .collect::<Vec<_>>()
            .join(LINE_SEPARATOR)
    }
}
