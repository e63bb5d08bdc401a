use serde::Serialize;

use mindscreen_core::models::outcome::Outcome;
use mindscreen_core::models::patient::PatientRecord;

use crate::event::{Phase, PresentationMode};

/// An item as the client should render it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemView {
    pub position: usize,
    /// 1-based number shown to the respondent.
    pub number: usize,
    pub title: String,
    pub options: Vec<String>,
    pub selected: Option<u8>,
}

/// Serialisable snapshot of a session, including which affordances are
/// currently enabled.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub phase: Phase,
    pub mode: PresentationMode,
    pub narration: bool,
    pub instrument: String,
    pub patient: Option<PatientRecord>,

    pub total_items: usize,
    pub answered: usize,
    pub position: usize,
    /// Items to render: the current one in step-by-step mode, all of them
    /// otherwise. Empty outside the answering phase.
    pub items: Vec<ItemView>,

    pub can_back: bool,
    pub can_next: bool,
    pub can_submit: bool,

    pub crisis_flag: bool,
    pub outcome: Option<Outcome>,
    pub crisis_advisory: Option<&'static str>,
    pub report_available: bool,
}
