//! The core record types: one `DailyRecord` per logged day, the `Records`
//! collection they live in, and the normalization path that turns raw input
//! into canonical records.

use crate::model::{Filter, Num};
use crate::utils::generate_record_id;
use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One logged day of a driver's activity.
///
/// Days are not unique: several records may carry the same date. Numeric
/// fields are `Num` values, so "no entry" is explicit and distinct from zero.
/// The serialized field names are what the datastore file uses.
#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DailyRecord {
    /// Opaque unique identifier, assigned at creation and never changed.
    pub id: String,
    /// Calendar date as an ISO `YYYY-MM-DD` string.
    pub date: String,
    /// Odometer reading at the start of the day, kilometers.
    pub odometer_start: Num,
    /// Odometer reading at the end of the day, kilometers.
    pub odometer_end: Num,
    /// Manually entered total distance. When positive it wins over the
    /// odometer difference.
    pub distance_total: Num,
    /// Total revenue for the day, EUR.
    pub revenue_total: Num,
    /// Fuel bought, liters.
    pub fuel_liters: Num,
    /// Fuel cost, EUR.
    pub fuel_cost: Num,
    /// Number of card-payment transfers.
    pub transfer_count: Num,
    /// Total taken in card payments, EUR.
    pub card_payments_total: Num,
    /// Free-text notes, trimmed.
    pub notes: String,
}

impl DailyRecord {
    /// The day's travelled distance. See [`derive_distance`].
    pub fn distance(&self) -> Decimal {
        derive_distance(self.odometer_start, self.odometer_end, self.distance_total)
    }
}

/// Computes the day's travelled distance.
///
/// A manually entered positive `distance_total` always wins. Otherwise, when
/// both odometer readings are present and `odometer_end >= odometer_start`,
/// the difference is used. In every other case the result is zero.
///
/// Reversed readings (`odometer_end < odometer_start`, e.g. an odometer
/// rollover or a typo) deliberately yield zero rather than a negative
/// distance or an error. The stored readings are kept as entered; only the
/// derived value is clamped. See DESIGN.md for why this stays as-is.
pub fn derive_distance(odometer_start: Num, odometer_end: Num, distance_total: Num) -> Decimal {
    if let Some(manual) = distance_total.value() {
        if manual > Decimal::ZERO {
            return manual;
        }
    }
    match (odometer_start.value(), odometer_end.value()) {
        (Some(start), Some(end)) if end >= start => end - start,
        _ => Decimal::ZERO,
    }
}

/// Raw field input collected from the user, before normalization.
///
/// Numeric fields are kept as the strings the user typed. `normalize` is the
/// single path for both create and edit: a draft without an `id` becomes a
/// new record, a draft carrying one becomes a full replacement.
#[derive(Default, Debug, Clone)]
pub struct RecordDraft {
    pub id: Option<String>,
    pub date: Option<NaiveDate>,
    pub odometer_start: Option<String>,
    pub odometer_end: Option<String>,
    pub distance_total: Option<String>,
    pub revenue_total: Option<String>,
    pub fuel_liters: Option<String>,
    pub fuel_cost: Option<String>,
    pub transfer_count: Option<String>,
    pub card_payments_total: Option<String>,
    pub notes: Option<String>,
}

impl RecordDraft {
    /// Produces a canonical `DailyRecord`.
    ///
    /// Every numeric field goes through loose parsing independently; a new id
    /// is minted only when the draft has none; `notes` is trimmed; a missing
    /// date defaults to the current local date. There is no cross-field
    /// validation — `odometer_end < odometer_start` is stored as given.
    pub fn normalize(self) -> DailyRecord {
        DailyRecord {
            id: self
                .id
                .filter(|id| !id.is_empty())
                .unwrap_or_else(generate_record_id),
            date: self
                .date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(today_iso),
            odometer_start: parse_field(self.odometer_start),
            odometer_end: parse_field(self.odometer_end),
            distance_total: parse_field(self.distance_total),
            revenue_total: parse_field(self.revenue_total),
            fuel_liters: parse_field(self.fuel_liters),
            fuel_cost: parse_field(self.fuel_cost),
            transfer_count: parse_field(self.transfer_count),
            card_payments_total: parse_field(self.card_payments_total),
            notes: self.notes.unwrap_or_default().trim().to_string(),
        }
    }
}

fn parse_field(raw: Option<String>) -> Num {
    raw.map(|s| Num::parse_loose(&s)).unwrap_or(Num::EMPTY)
}

/// Today's local date in ISO format.
fn today_iso() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

/// The ordered collection of all records, exactly as persisted.
///
/// New records are appended; display order is produced on read. The
/// serialized form is a bare JSON array.
#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Records(Vec<DailyRecord>);

impl Records {
    pub fn new(records: Vec<DailyRecord>) -> Self {
        Self(records)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DailyRecord> {
        self.0.iter()
    }

    /// Finds a record by id.
    pub fn get(&self, id: &str) -> Option<&DailyRecord> {
        self.0.iter().find(|r| r.id == id)
    }

    /// Replaces the record with the same id, or appends. Returns true when an
    /// existing record was replaced.
    pub fn upsert(&mut self, record: DailyRecord) -> bool {
        match self.0.iter_mut().find(|r| r.id == record.id) {
            Some(existing) => {
                *existing = record;
                true
            }
            None => {
                self.0.push(record);
                false
            }
        }
    }

    /// Removes and returns the record with the given id. Unknown ids return
    /// `None` and leave the collection untouched.
    pub fn remove(&mut self, id: &str) -> Option<DailyRecord> {
        let index = self.0.iter().position(|r| r.id == id)?;
        Some(self.0.remove(index))
    }

    /// The display subset: records matching `filter`, newest date first.
    /// The sort is stable, so records sharing a date keep insertion order.
    pub fn filtered(&self, filter: &Filter) -> Vec<&DailyRecord> {
        let mut rows: Vec<&DailyRecord> = self.0.iter().filter(|r| filter.matches(r)).collect();
        rows.sort_by(|a, b| b.date.cmp(&a.date));
        rows
    }
}

impl FromIterator<DailyRecord> for Records {
    fn from_iter<T: IntoIterator<Item = DailyRecord>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
