use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::domain::{round_to, TenderId};

/// Goods and services tax applied to every bill of quantities.
pub const GST_RATE: f64 = 0.18;

/// Line item priced into a bill of quantities. Unrecognized fields are carried through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoqItem {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub quantity: f64,
    #[serde(default)]
    pub unit_price: f64,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl BoqItem {
    pub fn new(description: impl Into<String>, quantity: f64, unit_price: f64) -> Self {
        Self {
            description: description.into(),
            quantity,
            unit_price,
            extra: BTreeMap::new(),
        }
    }

    pub fn line_total(&self) -> f64 {
        self.quantity * self.unit_price
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillOfQuantities {
    pub tender_id: TenderId,
    pub items: Vec<BoqItem>,
    pub total_cost: f64,
    pub gst_amount: f64,
    pub grand_total: f64,
}

impl BillOfQuantities {
    pub fn price(tender_id: TenderId, items: Vec<BoqItem>) -> Self {
        let total_cost: f64 = items.iter().map(BoqItem::line_total).sum();
        let gst_amount = total_cost * GST_RATE;
        let grand_total = total_cost + gst_amount;

        Self {
            tender_id,
            items,
            total_cost: round_to(total_cost, 2),
            gst_amount: round_to(gst_amount, 2),
            grand_total: round_to(grand_total, 2),
        }
    }
}
