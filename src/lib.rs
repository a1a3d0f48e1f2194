// CNPJ Consultation Terminal - Core Library
// Exposes the query pipeline for the TUI, the one-shot CLI and tests

pub mod clipboard;
pub mod history;
pub mod mask;
pub mod record;
pub mod render;
pub mod session;
pub mod validate;

// Interactive terminal, only with the TUI feature enabled
#[cfg(feature = "tui")]
pub mod ui;

// Re-export commonly used types
pub use clipboard::{copy_to_clipboard, osc52_sequence};
pub use history::CommandHistory;
pub use mask::{format_cnpj, has_foreign_chars, strip_digits, InputFormatter};
pub use record::{Cnae, CompanyRecord, RecordSource, Socio, StaticRecordSource};
pub use render::{
    error_box, format_currency, format_yes_no, render_record, DisplayMode, LineStyle,
    RenderOutput, StyledLine,
};
pub use session::{classify, Outcome, Session, Submission, PROMPT_INITIAL, PROMPT_RETRY};
pub use validate::validate_cnpj;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
