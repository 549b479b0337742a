//! vimcore entrypoint: replays a key script against a file without a UI.
use anyhow::{Context, Result};
use clap::Parser;
use core_actions::{Host, VimBuffer, VimData};
use core_config::{Settings, load_from};
use core_state::{Mode, SelectedSpan};
use core_text::{BufferId, Point, TextBuffer};
use std::path::{Path, PathBuf};
use std::sync::Once;
use tracing::{debug, error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "vimcore", version, about = "Headless Vim editing engine")]
struct Args {
    /// File to edit. Without one the script runs against an empty buffer.
    pub path: Option<PathBuf>,
    /// Keys to replay, in Vim notation (`dd`, `gh<C-S-Right>xyz<Esc>`).
    #[arg(long = "keys", short = 'k', default_value = "")]
    pub keys: String,
    /// Optional configuration file path (overrides discovery of `vimcore.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
    /// Write the result back to `path` instead of printing it.
    #[arg(long = "write")]
    pub write: bool,
}

/// Host without a view: keeps the selections and refuses navigation.
#[derive(Debug)]
struct HeadlessHost {
    primary: SelectedSpan,
    secondaries: Vec<SelectedSpan>,
}

impl HeadlessHost {
    fn new() -> Self {
        Self {
            primary: SelectedSpan::caret(Point::new(0, 0)),
            secondaries: Vec::new(),
        }
    }
}

impl Host for HeadlessHost {
    fn primary_selection(&self) -> SelectedSpan {
        self.primary
    }

    fn set_primary_selection(&mut self, span: SelectedSpan) {
        self.primary = span;
    }

    fn secondary_selections_changed(&mut self, spans: &[SelectedSpan]) {
        self.secondaries = spans.to_vec();
    }

    fn supports_multiple_selections(&self) -> bool {
        true
    }

    fn navigate_to(&mut self, buffer: BufferId, point: Point) -> bool {
        warn!(target: "runtime.host", buffer = buffer.0, offset = point.offset, "navigation_unsupported");
        false
    }
}

/// Final state after a script ran.
#[derive(Debug)]
struct Outcome {
    text: String,
    mode: Mode,
    /// `(line, column)` of every caret, primary first.
    carets: Vec<(usize, usize)>,
}

fn run(text: &str, keys: &str, settings: Settings) -> Result<Outcome> {
    let mut vim = VimBuffer::new(TextBuffer::new(BufferId(0), text));
    let mut host = HeadlessHost::new();
    let mut data = VimData::new(settings);
    let result = vim
        .process_notation(keys, &mut host, &mut data)
        .with_context(|| format!("replaying {keys:?}"))?;
    debug!(target: "runtime", mode = result.mode.as_str(), pending = result.pending, changed = result.buffer_changed, "script_done");
    let snapshot = vim.snapshot();
    let carets = vim
        .all_selections(&host)
        .iter()
        .map(|s| snapshot.line_column(s.caret_offset()))
        .collect();
    Ok(Outcome {
        text: snapshot.text(),
        mode: vim.mode(),
        carets,
    })
}

/// Read a file, normalizing CRLF to LF.
fn read_source(path: &Path) -> Result<String> {
    let content = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let normalized = content.replace("\r\n", "\n");
    debug!(target: "io", file = %path.display(), size_bytes = content.len(), crlf = normalized.len() != content.len(), "file_read_ok");
    Ok(normalized)
}

fn configure_logging() -> Option<WorkerGuard> {
    let log_dir = Path::new(".");
    let log_path = log_dir.join("vimcore.log");
    if log_path.exists() {
        let _ = std::fs::remove_file(&log_path);
    }

    let file_appender = tracing_appender::rolling::never(log_dir, "vimcore.log");
    let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(nb_writer)
        .try_init()
        .ok()
        .map(|_| guard)
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            tracing::error!(target: "runtime.panic", ?info, "panic");
            default_panic(info);
        }));
    });
}

fn main() -> Result<()> {
    let args = Args::parse();
    let _log_guard = configure_logging();
    install_panic_hook();
    info!(target: "runtime", "startup");

    let config = load_from(args.config.clone())?;
    let text = match args.path.as_deref() {
        Some(path) => read_source(path)?,
        None => String::new(),
    };
    let outcome = match run(&text, &args.keys, config.settings) {
        Ok(outcome) => outcome,
        Err(err) => {
            error!(target: "runtime", error = %err, "script_failed");
            return Err(err);
        }
    };
    info!(target: "runtime", mode = outcome.mode.as_str(), carets = ?outcome.carets, "shutdown");

    if args.write {
        let path = args.path.as_deref().context("--write needs a file path")?;
        std::fs::write(path, &outcome.text).with_context(|| format!("writing {}", path.display()))?;
    } else {
        print!("{}", outcome.text);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn replays_normal_mode_script() {
        let outcome = run("foo\nbar\nbaz", "jddp", Settings::default()).unwrap();
        assert_eq!(outcome.text, "foo\nbaz\nbar");
        assert_eq!(outcome.mode, Mode::Normal);
        assert_eq!(outcome.carets, vec![(2, 0)]);
    }

    #[test]
    fn multiple_carets_are_reported() {
        let outcome = run("ab\nab", "<C-A-Down>ix", Settings::default()).unwrap();
        assert_eq!(outcome.text, "xab\nxab");
        assert_eq!(outcome.mode, Mode::Insert);
        assert_eq!(outcome.carets, vec![(0, 1), (1, 1)]);
    }

    #[test]
    fn command_errors_surface() {
        let err = run("foo", "m;", Settings::default()).unwrap_err();
        assert!(format!("{err:#}").contains("invalid mark name"));
    }

    #[test]
    fn crlf_is_normalized() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.txt");
        std::fs::write(&path, "a\r\nb\r\n").unwrap();
        assert_eq!(read_source(&path).unwrap(), "a\nb\n");
    }
}
