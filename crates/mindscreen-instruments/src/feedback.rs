//! Canned advisory text per severity band and the crisis-resources message.

use mindscreen_core::models::severity::Severity;

pub const CRISIS_ADVISORY: &str = "If you are experiencing suicidal thoughts or are in crisis, \
please seek immediate help from local crisis services or helplines.";

/// Advisory text for a band. Paragraphs are separated by a blank line.
pub const fn advisory(severity: Severity) -> &'static str {
    match severity {
        Severity::Minimal => {
            "Minimal depression.\n\n\
             You're doing well. Maintain your mental health by engaging in regular activities, \
             staying connected with loved ones, and following a healthy routine."
        }
        Severity::Mild => {
            "Mild depression.\n\n\
             Try journaling, doing regular light exercises, and talk with someone you trust. \
             Practicing mindfulness may help too."
        }
        Severity::Moderate => {
            "Moderate depression.\n\n\
             It's a good time to consult a counselor or therapist. You're not alone. \
             Support is available and effective."
        }
        Severity::Severe => {
            "Severe depression.\n\n\
             Please speak to a licensed mental health professional or helpline as soon as possible. \
             You deserve care and help. Don't delay."
        }
    }
}

/// Whether the crisis advisory accompanies a result.
///
/// Two independent triggers: an elevated band, or a latched crisis flag from
/// the suicidality item.
pub const fn show_crisis_advisory(severity: Severity, crisis_flag: bool) -> bool {
    severity.is_elevated() || crisis_flag
}
