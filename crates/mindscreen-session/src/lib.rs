//! mindscreen-session
//!
//! The screening session as an explicit state machine:
//! intake → answering → submitted, with restarts back to answering or
//! intake. Every user action is an [`Event`]; rendering is left to the
//! caller through [`SessionView`].

pub mod error;
pub mod event;
pub mod view;

use std::sync::Arc;

use jiff::civil::Date;
use tracing::info;

use mindscreen_core::models::outcome::Outcome;
use mindscreen_core::models::patient::PatientRecord;
use mindscreen_export::{DEFAULT_TITLE, ReportInput};
use mindscreen_instruments::Instrument;
use mindscreen_instruments::feedback::{self, CRISIS_ADVISORY};
use mindscreen_instruments::scoring::{ResponseSet, classify};

use crate::error::SessionError;
use crate::event::{Event, Phase, PresentationMode, Transition};
use crate::view::{ItemView, SessionView};

pub struct Session {
    instrument: Arc<dyn Instrument>,
    phase: Phase,
    mode: PresentationMode,
    narration: bool,
    patient: Option<PatientRecord>,
    responses: ResponseSet,
    position: usize,
    crisis_flag: bool,
    outcome: Option<Outcome>,
}

impl Session {
    pub fn new(instrument: Arc<dyn Instrument>, mode: PresentationMode, narration: bool) -> Self {
        let responses = instrument.new_responses();
        Self {
            instrument,
            phase: Phase::Intake,
            mode,
            narration,
            patient: None,
            responses,
            position: 0,
            crisis_flag: false,
            outcome: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn mode(&self) -> PresentationMode {
        self.mode
    }

    pub fn narration(&self) -> bool {
        self.narration
    }

    pub fn patient(&self) -> Option<&PatientRecord> {
        self.patient.as_ref()
    }

    pub fn responses(&self) -> &ResponseSet {
        &self.responses
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn crisis_flag(&self) -> bool {
        self.crisis_flag
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    fn is_step_answering(&self) -> bool {
        self.phase == Phase::Answering && self.mode == PresentationMode::StepByStep
    }

    pub fn can_back(&self) -> bool {
        self.is_step_answering() && self.position > 0
    }

    pub fn can_next(&self) -> bool {
        self.is_step_answering()
            && self.position + 1 < self.responses.len()
            && self.responses.is_answered(self.position)
    }

    pub fn can_submit(&self) -> bool {
        self.phase == Phase::Answering && self.responses.is_complete()
    }

    /// Apply one event. On error the session is left unchanged.
    ///
    /// `today` is the default assessment date for intake.
    pub fn apply(&mut self, event: Event, today: Date) -> Result<Transition, SessionError> {
        let from = self.phase;
        let name = event.name();

        match event {
            Event::SubmitIntake {
                name: patient_name,
                age,
                assessment_date,
            } => {
                self.require(name, Phase::Intake)?;
                let patient = PatientRecord::from_intake(
                    &patient_name,
                    &age,
                    assessment_date.as_deref(),
                    today,
                )?;
                self.patient = Some(patient);
                self.clear_answers();
                self.phase = Phase::Answering;
            }
            Event::SetMode { mode } => {
                self.mode = mode;
            }
            Event::SetNarration { enabled } => {
                self.narration = enabled;
            }
            Event::SelectAnswer { position, ordinal } => {
                self.require(name, Phase::Answering)?;
                if self.mode == PresentationMode::StepByStep && position != self.position {
                    return Err(SessionError::NotCurrentQuestion {
                        position,
                        current: self.position,
                    });
                }
                self.instrument
                    .record(&mut self.responses, position, ordinal)?;
                if self.instrument.is_crisis_answer(position, ordinal) && !self.crisis_flag {
                    self.crisis_flag = true;
                    info!(position, "crisis flag raised");
                }
            }
            Event::Next => {
                self.require_step(name)?;
                if !self.can_next() {
                    return Err(SessionError::NextUnavailable);
                }
                self.position += 1;
            }
            Event::Back => {
                self.require_step(name)?;
                if !self.can_back() {
                    return Err(SessionError::BackUnavailable);
                }
                self.position -= 1;
            }
            Event::Submit => {
                self.require(name, Phase::Answering)?;
                self.outcome = Some(self.evaluate()?);
                self.phase = Phase::Submitted;
            }
            Event::TakeAgain => {
                self.require(name, Phase::Submitted)?;
                self.clear_answers();
                self.phase = Phase::Answering;
            }
            Event::StartOver => {
                self.require(name, Phase::Submitted)?;
                self.clear_answers();
                self.patient = None;
                self.phase = Phase::Intake;
            }
        }

        if from != self.phase {
            info!(event = name, from = %from, to = %self.phase, "session transition");
        }

        Ok(Transition {
            from,
            to: self.phase,
            narration: self.narration_requests(),
        })
    }

    fn require(&self, event: &'static str, phase: Phase) -> Result<(), SessionError> {
        if self.phase == phase {
            Ok(())
        } else {
            Err(SessionError::InvalidEvent {
                event,
                phase: self.phase,
            })
        }
    }

    fn require_step(&self, event: &'static str) -> Result<(), SessionError> {
        if self.is_step_answering() {
            Ok(())
        } else {
            Err(SessionError::InvalidEvent {
                event,
                phase: self.phase,
            })
        }
    }

    fn clear_answers(&mut self) {
        self.responses.reset();
        self.position = 0;
        self.crisis_flag = false;
        self.outcome = None;
    }

    /// Score, classify and attach advisory text. Pure with respect to the
    /// session: an unchanged response set always yields the same outcome.
    pub fn evaluate(&self) -> Result<Outcome, SessionError> {
        let score = self.instrument.score(&self.responses)?;
        let severity = classify(score.total());
        Ok(Outcome {
            score,
            severity,
            advisory: feedback::advisory(severity).to_string(),
            show_crisis_advisory: feedback::show_crisis_advisory(severity, self.crisis_flag),
        })
    }

    /// Spoken prompt for the item at `position`.
    pub fn question_prompt(&self, position: usize) -> Option<String> {
        let item = self.instrument.item(position)?;
        Some(format!(
            "Question {} of {}. {}.",
            position + 1,
            self.responses.len(),
            item.title
        ))
    }

    fn narration_requests(&self) -> Vec<String> {
        if !self.narration {
            return Vec::new();
        }
        match self.phase {
            Phase::Answering if self.mode == PresentationMode::StepByStep => {
                self.question_prompt(self.position).into_iter().collect()
            }
            Phase::Submitted => self
                .outcome
                .iter()
                .map(|o| o.advisory.clone())
                .collect(),
            _ => Vec::new(),
        }
    }

    fn item_view(&self, position: usize) -> Option<ItemView> {
        let item = self.instrument.item(position)?;
        Some(ItemView {
            position,
            number: position + 1,
            title: item.title.clone(),
            options: item.options.clone(),
            selected: self.responses.get(position),
        })
    }

    pub fn view(&self) -> SessionView {
        let items = match (self.phase, self.mode) {
            (Phase::Answering, PresentationMode::StepByStep) => {
                self.item_view(self.position).into_iter().collect()
            }
            (Phase::Answering, PresentationMode::AllAtOnce) => (0..self.responses.len())
                .filter_map(|p| self.item_view(p))
                .collect(),
            _ => Vec::new(),
        };

        let crisis_advisory = self
            .outcome
            .as_ref()
            .filter(|o| o.show_crisis_advisory)
            .map(|_| CRISIS_ADVISORY);

        SessionView {
            phase: self.phase,
            mode: self.mode,
            narration: self.narration,
            instrument: self.instrument.name().to_string(),
            patient: self.patient.clone(),
            total_items: self.responses.len(),
            answered: self.responses.answered_count(),
            position: self.position,
            items,
            can_back: self.can_back(),
            can_next: self.can_next(),
            can_submit: self.can_submit(),
            crisis_flag: self.crisis_flag,
            outcome: self.outcome.clone(),
            crisis_advisory,
            report_available: self.outcome.is_some() && self.patient.is_some(),
        }
    }

    /// Exporter input for a submitted session; `None` before submission.
    pub fn report_input(&self, generated_at: jiff::Timestamp) -> Option<ReportInput> {
        let outcome = self.outcome.as_ref()?;
        let patient = self.patient.clone()?;
        Some(ReportInput {
            title: DEFAULT_TITLE.to_string(),
            patient,
            score: outcome.score,
            severity: outcome.severity,
            advisory: outcome.advisory.clone(),
            crisis_advisory: outcome
                .show_crisis_advisory
                .then(|| CRISIS_ADVISORY.to_string()),
            items: self.instrument.summarize(&self.responses),
            generated_at,
        })
    }
}
