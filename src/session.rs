// Command session - classify submits, run queries, hand out prompts
// The session owns the record source and the prompt state; timing
// (boot animation, the simulated lookup delay) belongs to the caller.

use anyhow::Result;
use chrono::Local;

use crate::mask::{has_foreign_chars, strip_digits};
use crate::record::{RecordSource, StaticRecordSource};
use crate::render::{error_box, render_record, DisplayMode, RenderOutput, StyledLine};
use crate::validate::validate_cnpj;

pub const PROMPT_INITIAL: &str = "Digite o CNPJ para consulta:";
pub const PROMPT_RETRY: &str = "Digite outro CNPJ ou CTRL+R para reiniciar:";

// ============================================================================
// SUBMIT CLASSIFICATION
// ============================================================================

/// What a submitted line turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Enter on an empty line: just reprompt.
    Empty,
    /// Characters outside the digit/mask alphabet: not a CNPJ at all.
    NotRecognized(String),
    /// Digit count after stripping is not 14.
    BadLength(usize),
    /// 14 digits but the check digits do not match.
    BadChecksum(String),
    /// 14 validated digits, ready for lookup.
    Query(String),
}

/// Classify the trimmed submit text.
pub fn classify(input: &str) -> Submission {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Submission::Empty;
    }
    if has_foreign_chars(trimmed) {
        return Submission::NotRecognized(trimmed.to_string());
    }

    let digits = strip_digits(trimmed);
    if digits.len() != 14 {
        return Submission::BadLength(digits.len());
    }
    if !validate_cnpj(&digits) {
        return Submission::BadChecksum(digits);
    }
    Submission::Query(digits)
}

// ============================================================================
// SESSION
// ============================================================================

/// One step of the query cycle, as seen by the display surface.
#[derive(Debug)]
pub enum Outcome {
    /// Nothing to show; present the prompt again.
    Reprompt,
    /// Error lines to append, then reprompt.
    Rejected(Vec<StyledLine>),
    /// Accepted: show the progress line, wait out the simulated delay,
    /// then call [`Session::run_query`] with these digits.
    Accepted { cnpj: String, progress: StyledLine },
}

pub struct Session {
    source: Box<dyn RecordSource>,
    queries_submitted: usize,
}

impl Session {
    pub fn new() -> Self {
        Session {
            source: Box::new(StaticRecordSource::new()),
            queries_submitted: 0,
        }
    }

    /// Swap the record source (a real lookup instead of static data).
    pub fn with_source(source: Box<dyn RecordSource>) -> Self {
        Session {
            source,
            queries_submitted: 0,
        }
    }

    /// Boot banner played line by line when the terminal starts.
    /// Delay is in milliseconds before the line appears.
    pub fn boot_sequence(&self) -> Vec<(StyledLine, u64)> {
        vec![
            (
                StyledLine::info("Booting Capsys OS v4.0 (Consulta Mode)..."),
                50,
            ),
            (StyledLine::success("Loading API modules... [STATIC]"), 50),
            (
                StyledLine::success(
                    "Acesse a versão de produção (https://terminal.opencnpj.com)...",
                ),
                50,
            ),
            (StyledLine::plain(" "), 100),
            (
                StyledLine::info("Terminal de Consulta de CNPJ pronto."),
                50,
            ),
            (StyledLine::plain(" "), 100),
            (
                StyledLine::comment(format!("Data: {}", Local::now().format("%a %d %b %Y %H:%M:%S %z"))),
                50,
            ),
            (StyledLine::plain(" "), 100),
        ]
    }

    /// Prompt label for the next input line.
    pub fn prompt_label(&self) -> &'static str {
        if self.queries_submitted == 0 {
            PROMPT_INITIAL
        } else {
            PROMPT_RETRY
        }
    }

    /// Handle one submitted line. Every path is recoverable; the
    /// caller reprompts afterwards regardless.
    pub fn submit(&mut self, input: &str) -> Outcome {
        match classify(input) {
            Submission::Empty => Outcome::Reprompt,
            // A malformed command reprompts with the initial label;
            // only CNPJ attempts switch to the retry wording.
            Submission::NotRecognized(cmd) => {
                Outcome::Rejected(vec![StyledLine::error(format!(
                    "bash: comando não encontrado: {}",
                    cmd
                ))])
            }
            Submission::BadLength(_) => {
                self.queries_submitted += 1;
                Outcome::Rejected(error_box("CNPJ deve ter 14 dígitos."))
            }
            Submission::BadChecksum(_) => {
                self.queries_submitted += 1;
                Outcome::Rejected(error_box("CNPJ inválido (dígito verificador não confere)."))
            }
            Submission::Query(cnpj) => {
                self.queries_submitted += 1;
                Outcome::Accepted {
                    cnpj,
                    progress: StyledLine::comment("Consultando CNPJ (Modo Estático)..."),
                }
            }
        }
    }

    /// Fetch and render a record for validated digits. Called by the
    /// display surface once the simulated delay has elapsed.
    pub fn run_query(&self, cnpj: &str, mode: DisplayMode) -> Result<RenderOutput> {
        match self.source.fetch(cnpj)? {
            Some(record) => Ok(render_record(&record, mode)),
            None => Ok(RenderOutput {
                lines: error_box("CNPJ não encontrado."),
                copy_text: String::new(),
            }),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
