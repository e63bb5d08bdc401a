use std::fmt;

use serde::{Deserialize, Serialize};

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Intake,
    Answering,
    Submitted,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::Intake => "collecting intake",
            Phase::Answering => "answering",
            Phase::Submitted => "submitted",
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresentationMode {
    /// Every item on one page, answered in any order.
    #[default]
    AllAtOnce,
    /// One item at a time with Next/Back navigation.
    StepByStep,
}

/// A discrete user action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    SubmitIntake {
        name: String,
        age: String,
        /// `YYYY-MM-DD`; today when absent.
        #[serde(default)]
        assessment_date: Option<String>,
    },
    SetMode {
        mode: PresentationMode,
    },
    SetNarration {
        enabled: bool,
    },
    SelectAnswer {
        position: usize,
        ordinal: u8,
    },
    Next,
    Back,
    Submit,
    TakeAgain,
    StartOver,
}

impl Event {
    pub fn name(&self) -> &'static str {
        match self {
            Event::SubmitIntake { .. } => "submit_intake",
            Event::SetMode { .. } => "set_mode",
            Event::SetNarration { .. } => "set_narration",
            Event::SelectAnswer { .. } => "select_answer",
            Event::Next => "next",
            Event::Back => "back",
            Event::Submit => "submit",
            Event::TakeAgain => "take_again",
            Event::StartOver => "start_over",
        }
    }
}

/// The result of applying an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub from: Phase,
    pub to: Phase,
    /// Text the presentation layer should narrate, in order. Empty when
    /// narration is off.
    pub narration: Vec<String>,
}
