//! mindscreen-instruments
//!
//! Questionnaire definitions and scoring. Pure data and arithmetic: the
//! question catalog, the response tracker, the scorer, the severity
//! classifier and the advisory text.

pub mod error;
pub mod feedback;
pub mod instruments;
pub mod scoring;

use mindscreen_core::models::outcome::ItemSummary;
use mindscreen_core::models::score::Score;

use error::InstrumentError;
use scoring::{Item, ResponseSet};

/// Trait implemented by each self-report questionnaire.
pub trait Instrument: Send + Sync {
    /// Unique identifier for this instrument (e.g., "bdi2").
    fn id(&self) -> &str;

    /// Human-readable name (e.g., "BDI-II").
    fn name(&self) -> &str;

    /// The items in presentation order.
    fn items(&self) -> &[Item];

    /// Stable id of the item whose non-zero answer raises the crisis flag.
    fn crisis_item_id(&self) -> Option<&str> {
        None
    }

    fn item(&self, position: usize) -> Option<&Item> {
        self.items().get(position)
    }

    fn position_of(&self, item_id: &str) -> Option<usize> {
        self.items().iter().position(|i| i.id == item_id)
    }

    fn max_score(&self) -> u8 {
        self.items().iter().map(Item::max_ordinal).sum()
    }

    /// An empty response set sized for this instrument.
    fn new_responses(&self) -> ResponseSet {
        ResponseSet::new(self.items().len())
    }

    /// Record `ordinal` at `position`, checking it against that item's options.
    fn record(
        &self,
        responses: &mut ResponseSet,
        position: usize,
        ordinal: u8,
    ) -> Result<(), InstrumentError> {
        let item = self
            .item(position)
            .ok_or(InstrumentError::PositionOutOfRange {
                position,
                len: self.items().len(),
            })?;
        if ordinal > item.max_ordinal() {
            return Err(InstrumentError::OrdinalOutOfRange {
                item_id: item.id.clone(),
                ordinal,
                max: item.max_ordinal(),
            });
        }
        responses.set(position, ordinal)
    }

    /// Whether this answer on its own raises the crisis flag.
    fn is_crisis_answer(&self, position: usize, ordinal: u8) -> bool {
        ordinal >= 1
            && self
                .crisis_item_id()
                .and_then(|id| self.position_of(id))
                .is_some_and(|p| p == position)
    }

    /// Sum a complete response set for this instrument.
    fn score(&self, responses: &ResponseSet) -> Result<Score, InstrumentError> {
        if responses.len() != self.items().len() {
            return Err(InstrumentError::LengthMismatch {
                instrument_id: self.id().to_string(),
                expected: self.items().len(),
                actual: responses.len(),
            });
        }
        scoring::score(responses, self.max_score())
    }

    /// The chosen statement of every answered item, in presentation order.
    fn summarize(&self, responses: &ResponseSet) -> Vec<ItemSummary> {
        self.items()
            .iter()
            .enumerate()
            .filter_map(|(position, item)| {
                let ordinal = responses.get(position)?;
                let statement = item.options.get(usize::from(ordinal))?;
                Some(ItemSummary {
                    number: position + 1,
                    title: item.title.clone(),
                    statement: statement.clone(),
                    ordinal,
                })
            })
            .collect()
    }
}

/// Return all registered instruments.
pub fn all_instruments() -> Vec<Box<dyn Instrument>> {
    vec![Box::new(instruments::bdi2::Bdi2)]
}

/// Look up an instrument by ID.
pub fn get_instrument(id: &str) -> Result<Box<dyn Instrument>, InstrumentError> {
    all_instruments()
        .into_iter()
        .find(|i| i.id() == id)
        .ok_or_else(|| InstrumentError::UnknownInstrument(id.to_string()))
}
