//! Invoice document hosted by the invoice tool.
//!
//! # Responsibility
//! - Own the editable line items and header fields of one invoice.
//! - Compute subtotal/tax/total from the current items on every query.
//!
//! # Invariants
//! - Totals are never stored; `totals()` always reflects current items.
//! - `quantity` and `rate` are never negative or non-finite.
//! - `rate` is capped at `MAX_LINE_ITEM_RATE`, so amounts and totals stay
//!   finite.
//! - Field edits never fail; unparseable numbers become zero.

use crate::model::entity::EntityId;
use chrono::{Local, NaiveDate};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Tax rate applied to the invoice subtotal.
pub const INVOICE_TAX_RATE: f64 = 0.10;

/// Largest accepted rate per unit.
pub const MAX_LINE_ITEM_RATE: f64 = 1e12;

const INVOICE_NUMBER_PREFIX: &str = "INV-";

/// One billable row of an invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceLineItem {
    pub id: EntityId,
    pub description: String,
    pub quantity: u32,
    pub rate: f64,
}

impl InvoiceLineItem {
    fn blank(id: EntityId) -> Self {
        Self {
            id,
            description: String::new(),
            quantity: 1,
            rate: 0.0,
        }
    }

    /// `quantity × rate` for this row.
    pub fn amount(&self) -> f64 {
        f64::from(self.quantity) * self.rate
    }
}

/// Editable column of a line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineItemField {
    Description,
    Quantity,
    Rate,
}

impl LineItemField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Description => "description",
            Self::Quantity => "quantity",
            Self::Rate => "rate",
        }
    }
}

/// Error returned when a line item column name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFieldError(pub String);

impl Display for UnknownFieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown line item field `{}`", self.0)
    }
}

impl std::error::Error for UnknownFieldError {}

impl FromStr for LineItemField {
    type Err = UnknownFieldError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "description" => Ok(Self::Description),
            "quantity" | "qty" => Ok(Self::Quantity),
            "rate" => Ok(Self::Rate),
            _ => Err(UnknownFieldError(value.trim().to_string())),
        }
    }
}

/// Derived money summary of an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InvoiceTotals {
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
}

impl InvoiceTotals {
    fn from_subtotal(subtotal: f64) -> Self {
        let tax = subtotal * INVOICE_TAX_RATE;
        Self {
            subtotal,
            tax,
            total: subtotal + tax,
        }
    }
}

/// Free-form header fields printed at the top of the invoice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceHeader {
    pub client_name: String,
    pub invoice_number: String,
    pub invoice_date: NaiveDate,
}

impl Default for InvoiceHeader {
    fn default() -> Self {
        Self {
            client_name: String::new(),
            invoice_number: generate_invoice_number(),
            invoice_date: Local::now().date_naive(),
        }
    }
}

/// In-memory invoice with live totals. Not persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceDocument {
    pub header: InvoiceHeader,
    items: Vec<InvoiceLineItem>,
}

impl Default for InvoiceDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl InvoiceDocument {
    /// Creates a document with default header fields and one blank row.
    pub fn new() -> Self {
        Self::with_header(InvoiceHeader::default())
    }

    pub fn with_header(header: InvoiceHeader) -> Self {
        let mut document = Self {
            header,
            items: Vec::new(),
        };
        document.add_item();
        document
    }

    pub fn items(&self) -> &[InvoiceLineItem] {
        &self.items
    }

    pub fn item(&self, id: &str) -> Option<&InvoiceLineItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Appends a blank row (quantity 1, rate 0) and returns its id.
    pub fn add_item(&mut self) -> EntityId {
        let id = self.fresh_item_id();
        self.items.push(InvoiceLineItem::blank(id.clone()));
        id
    }

    /// Edits one column of one row from raw text input.
    ///
    /// Returns `false` when no row has `id`.
    pub fn update_item(&mut self, id: &str, field: LineItemField, value: &str) -> bool {
        let Some(item) = self.items.iter_mut().find(|item| item.id == id) else {
            return false;
        };
        let coerced_to_zero = match field {
            LineItemField::Description => {
                item.description = value.to_string();
                false
            }
            LineItemField::Quantity => {
                item.quantity = coerce_quantity(value);
                item.quantity == 0
            }
            LineItemField::Rate => {
                item.rate = coerce_rate(value);
                item.rate == 0.0
            }
        };
        if coerced_to_zero && !is_zero_input(value) {
            debug!(
                "event=invoice_item_edit module=model status=coerced field={} value=zero",
                field.as_str()
            );
        }
        true
    }

    /// Removes the row with `id`; returns whether a row was removed.
    pub fn remove_item(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }

    pub fn totals(&self) -> InvoiceTotals {
        InvoiceTotals::from_subtotal(self.items.iter().map(InvoiceLineItem::amount).sum())
    }

    fn fresh_item_id(&self) -> EntityId {
        loop {
            let candidate = Uuid::new_v4().to_string();
            if self.item(&candidate).is_none() {
                return candidate;
            }
        }
    }
}

/// Parses a quantity; fractions truncate, anything invalid or negative is 0.
pub fn coerce_quantity(raw: &str) -> u32 {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => {
            if value >= f64::from(u32::MAX) {
                u32::MAX
            } else {
                value.trunc() as u32
            }
        }
        _ => 0,
    }
}

/// Parses a rate; anything invalid, negative or non-finite is 0. Rates above
/// `MAX_LINE_ITEM_RATE` are capped.
pub fn coerce_rate(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => value.min(MAX_LINE_ITEM_RATE),
        _ => 0.0,
    }
}

fn is_zero_input(raw: &str) -> bool {
    raw.trim().parse::<f64>().is_ok_and(|value| value == 0.0)
}

fn generate_invoice_number() -> String {
    let millis = Local::now().timestamp_millis().unsigned_abs();
    format!("{INVOICE_NUMBER_PREFIX}{:06}", millis % 1_000_000)
}

#[cfg(test)]
mod tests {
    use super::{
        coerce_quantity, coerce_rate, InvoiceDocument, LineItemField, MAX_LINE_ITEM_RATE,
    };

    #[test]
    fn quantity_coercion_truncates_and_clamps() {
        assert_eq!(coerce_quantity("3"), 3);
        assert_eq!(coerce_quantity(" 2.9 "), 2);
        assert_eq!(coerce_quantity("-4"), 0);
        assert_eq!(coerce_quantity("abc"), 0);
        assert_eq!(coerce_quantity(""), 0);
        assert_eq!(coerce_quantity("1e12"), u32::MAX);
    }

    #[test]
    fn rate_coercion_rejects_non_finite_values() {
        assert_eq!(coerce_rate("12.5"), 12.5);
        assert_eq!(coerce_rate("NaN"), 0.0);
        assert_eq!(coerce_rate("inf"), 0.0);
        assert_eq!(coerce_rate("-1"), 0.0);
    }

    #[test]
    fn huge_rates_are_capped_so_totals_stay_finite() {
        assert_eq!(coerce_rate("1e308"), MAX_LINE_ITEM_RATE);

        let mut document = InvoiceDocument::new();
        let id = document.items()[0].id.clone();
        document.update_item(&id, LineItemField::Quantity, "4294967295");
        document.update_item(&id, LineItemField::Rate, "1e308");
        for _ in 0..50 {
            let extra = document.add_item();
            document.update_item(&extra, LineItemField::Quantity, "1e12");
            document.update_item(&extra, LineItemField::Rate, "1e308");
        }

        let totals = document.totals();
        assert!(totals.subtotal.is_finite());
        assert!(totals.tax.is_finite());
        assert!(totals.total.is_finite());
    }

    #[test]
    fn new_document_has_generated_header_and_one_blank_row() {
        let document = InvoiceDocument::new();
        assert!(document.header.invoice_number.starts_with("INV-"));
        assert_eq!(document.header.invoice_number.len(), 10);
        assert!(document.header.client_name.is_empty());
        assert_eq!(document.items().len(), 1);
        assert_eq!(document.items()[0].quantity, 1);
        assert_eq!(document.items()[0].rate, 0.0);
    }

    #[test]
    fn field_names_parse_from_text() {
        assert_eq!("Rate".parse::<LineItemField>().unwrap(), LineItemField::Rate);
        assert_eq!(
            "quantity".parse::<LineItemField>().unwrap(),
            LineItemField::Quantity
        );
        assert!("amount".parse::<LineItemField>().is_err());
        for field in [
            LineItemField::Description,
            LineItemField::Quantity,
            LineItemField::Rate,
        ] {
            assert_eq!(field.as_str().parse::<LineItemField>().unwrap(), field);
        }
    }
}
