use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::error::SpeechError;
use crate::{BackendKind, Dispatch, SpeechBackend};

/// How the utterance reaches the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextInput {
    /// Appended as the final command-line argument.
    Argument,
    /// Written to the child's stdin.
    Stdin,
}

/// A platform speech command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineCommand {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub input: TextInput,
}

impl EngineCommand {
    /// Full argument list for one utterance.
    ///
    /// Argument-input engines get `--` before the text so an utterance
    /// starting with `-` is never parsed as an option.
    pub fn argv<'a>(&'a self, text: &'a str) -> Vec<&'a OsStr> {
        let mut argv: Vec<&OsStr> = self.args.iter().map(OsStr::new).collect();
        if self.input == TextInput::Argument {
            argv.push(OsStr::new("--"));
            argv.push(OsStr::new(text));
        }
        argv
    }
}

const POWERSHELL_SPEAK: &str = "Add-Type -AssemblyName System.Speech; \
(New-Object System.Speech.Synthesis.SpeechSynthesizer).Speak([Console]::In.ReadToEnd())";

/// Known engines in preference order: (executable, args, input).
fn known_engines() -> Vec<(&'static str, Vec<&'static str>, TextInput)> {
    vec![
        ("espeak-ng", vec![], TextInput::Argument),
        ("espeak", vec![], TextInput::Argument),
        ("spd-say", vec!["--wait"], TextInput::Argument),
        ("say", vec![], TextInput::Argument),
        (
            "powershell",
            vec!["-NoProfile", "-NonInteractive", "-Command", POWERSHELL_SPEAK],
            TextInput::Stdin,
        ),
    ]
}

/// Find the first known speech engine on the given search path.
pub fn find_engine<I, P>(search_path: I) -> Option<EngineCommand>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let dirs: Vec<PathBuf> = search_path
        .into_iter()
        .map(|p| p.as_ref().to_path_buf())
        .collect();

    known_engines()
        .into_iter()
        .find_map(|(name, args, input)| {
            find_executable(name, &dirs).map(|program| EngineCommand {
                program,
                args: args.into_iter().map(str::to_string).collect(),
                input,
            })
        })
}

/// Find a speech engine on `$PATH`.
pub fn find_engine_on_path() -> Option<EngineCommand> {
    let path = std::env::var_os("PATH")?;
    find_engine(std::env::split_paths(&path))
}

fn find_executable(name: &str, dirs: &[PathBuf]) -> Option<PathBuf> {
    let candidates: Vec<String> = if cfg!(windows) {
        vec![format!("{name}.exe"), name.to_string()]
    } else {
        vec![name.to_string()]
    };

    dirs.iter()
        .flat_map(|dir| candidates.iter().map(move |c| dir.join(c)))
        .find(|path| path.is_file())
}

/// Speech through a local engine process.
///
/// Each utterance runs on its own tokio task so the caller never waits for
/// playback. Utterances are played one at a time in request order.
pub struct NativeSpeech {
    engine: EngineCommand,
    playback: Arc<Mutex<()>>,
}

impl NativeSpeech {
    pub fn new(engine: EngineCommand) -> Self {
        Self {
            engine,
            playback: Arc::new(Mutex::new(())),
        }
    }

    pub fn engine(&self) -> &EngineCommand {
        &self.engine
    }
}

impl SpeechBackend for NativeSpeech {
    fn kind(&self) -> BackendKind {
        BackendKind::Native
    }

    fn speak(&self, text: &str) -> Result<Dispatch, SpeechError> {
        let handle = tokio::runtime::Handle::try_current()
            .map_err(|_| SpeechError::Unavailable("no async runtime for native speech".into()))?;

        let engine = self.engine.clone();
        let playback = Arc::clone(&self.playback);
        let text = text.to_string();

        handle.spawn(async move {
            let _guard = playback.lock().await;
            if let Err(e) = run_engine(&engine, &text).await {
                warn!(program = %engine.program.display(), error = %e, "native speech failed");
            }
        });

        Ok(Dispatch::Native)
    }
}

async fn run_engine(engine: &EngineCommand, text: &str) -> Result<(), SpeechError> {
    let mut command = Command::new(&engine.program);
    command
        .args(engine.argv(text))
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    match engine.input {
        TextInput::Argument => command.stdin(Stdio::null()),
        TextInput::Stdin => command.stdin(Stdio::piped()),
    };

    let mut child = command
        .spawn()
        .map_err(|e| SpeechError::Unavailable(format!("{}: {e}", engine.program.display())))?;

    if engine.input == TextInput::Stdin
        && let Some(mut stdin) = child.stdin.take()
    {
        stdin
            .write_all(text.as_bytes())
            .await
            .map_err(|e| SpeechError::Engine(e.to_string()))?;
        // Closing stdin signals end of input.
        drop(stdin);
    }

    let output = child
        .wait_with_output()
        .await
        .map_err(|e| SpeechError::Engine(e.to_string()))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(SpeechError::Engine(format!(
            "exited with {}: {}",
            output.status,
            stderr.trim()
        )));
    }

    debug!(chars = text.len(), "native speech finished");
    Ok(())
}
