// CNPJ input mask - XX.XXX.XXX/XXXX-XX
// Applied incrementally while the user types; pure functions plus a
// small stateful wrapper that guards against reentrant reformatting.

/// Characters the mask itself inserts. Anything else that is not a
/// digit makes the input a malformed command, not a CNPJ.
pub const MASK_CHARS: [char; 3] = ['.', '/', '-'];

/// Keep only decimal digits.
pub fn strip_digits(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// True if the string contains something outside the digit/mask
/// alphabet (letters, spaces, anything typed by accident).
pub fn has_foreign_chars(raw: &str) -> bool {
    raw.chars()
        .any(|c| !c.is_ascii_digit() && !MASK_CHARS.contains(&c))
}

/// Apply the CNPJ display mask over whatever digits are present so far.
///
/// Non-digits are stripped first and input is truncated to 14 digits,
/// so the function is safe to re-run over its own output.
pub fn format_cnpj(raw: &str) -> String {
    let digits: String = strip_digits(raw).chars().take(14).collect();
    let d = digits.as_str();
    let n = d.len();

    match n {
        0..=2 => digits,
        3..=5 => format!("{}.{}", &d[..2], &d[2..]),
        6..=8 => format!("{}.{}.{}", &d[..2], &d[2..5], &d[5..]),
        9..=12 => format!("{}.{}.{}/{}", &d[..2], &d[2..5], &d[5..8], &d[8..]),
        _ => format!(
            "{}.{}.{}/{}-{}",
            &d[..2],
            &d[2..5],
            &d[5..8],
            &d[8..12],
            &d[12..]
        ),
    }
}

/// Live input formatter with an explicit reentrancy guard.
///
/// Rewriting the input surface fires the surface's own change
/// notification, which calls back into `apply`. The `formatting` flag
/// suppresses that inner call so a reformat never cascades.
#[derive(Debug, Default)]
pub struct InputFormatter {
    formatting: bool,
}

impl InputFormatter {
    pub fn new() -> Self {
        InputFormatter { formatting: false }
    }

    /// Reformat the current text of the input surface.
    ///
    /// Returns `None` when called reentrantly (the caller must leave
    /// the surface untouched), otherwise the masked replacement text.
    pub fn apply(&mut self, raw: &str) -> Option<String> {
        if self.formatting {
            return None;
        }
        self.formatting = true;
        let formatted = if has_foreign_chars(raw) {
            // Recovery path: drop stray mask punctuation too and let the
            // foreign characters surface as a malformed command on submit.
            raw.chars().filter(|c| !MASK_CHARS.contains(&c)).collect()
        } else {
            format_cnpj(raw)
        };
        self.formatting = false;
        Some(formatted)
    }

    /// True while a reformat is in flight.
    pub fn is_formatting(&self) -> bool {
        self.formatting
    }
}
