// Clipboard write via OSC 52
// The terminal emulator owns the system clipboard; we hand it the
// base64 payload and it does the rest. Works over SSH, needs no
// display-server dependency.

use anyhow::{Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::io::Write;

/// Build the OSC 52 escape sequence that places `text` on the system
/// clipboard: `ESC ] 52 ; c ; <base64> BEL`.
pub fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text.trim()))
}

/// Write the copy sequence to the controlling terminal.
///
/// Failure here is recoverable; the caller swaps its status label to
/// an error state and moves on.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut stdout = std::io::stdout();
    stdout
        .write_all(osc52_sequence(text).as_bytes())
        .context("writing OSC 52 sequence")?;
    stdout.flush().context("flushing OSC 52 sequence")?;
    Ok(())
}
