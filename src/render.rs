// Record rendering - aligned text blocks for the terminal
// Produces the ordered (text, style) lines for the display surface and
// the flat copy text for the clipboard. Append-only: no line is
// rewritten after it is pushed.

use crate::mask::format_cnpj;
use crate::record::CompanyRecord;

/// Label column width in table mode.
pub const LABEL_WIDTH: usize = 25;
/// Total content width of the table / error box.
pub const CONTENT_WIDTH: usize = 70;
/// Value column: total minus label minus the fixed border/separator
/// overhead ("| ", ": ", "|" plus padding).
pub const VALUE_WIDTH: usize = CONTENT_WIDTH - LABEL_WIDTH - 7;
/// How many sócios are rendered on screen; the copy text always
/// carries all of them.
pub const SOCIOS_DISPLAY_CAP: usize = 10;

const PLACEHOLDER: &str = "N/A";

// ============================================================================
// STYLED LINES
// ============================================================================

/// Style tag of one output line; the TUI maps these to colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Plain,
    Info,
    Success,
    Comment,
    Error,
}

/// One line destined for the append-only display surface.
#[derive(Debug, Clone, PartialEq)]
pub struct StyledLine {
    pub text: String,
    pub style: LineStyle,
}

impl StyledLine {
    pub fn new(text: impl Into<String>, style: LineStyle) -> Self {
        StyledLine {
            text: text.into(),
            style,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, LineStyle::Plain)
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(text, LineStyle::Info)
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(text, LineStyle::Success)
    }

    pub fn comment(text: impl Into<String>) -> Self {
        Self::new(text, LineStyle::Comment)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(text, LineStyle::Error)
    }
}

/// Wide terminals get the bordered table, narrow ones a plain list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    Table,
    List,
}

/// Rendered result: display lines plus the flat copy-to-clipboard text.
#[derive(Debug, Clone)]
pub struct RenderOutput {
    pub lines: Vec<StyledLine>,
    pub copy_text: String,
}

// ============================================================================
// VALUE FORMATTING
// ============================================================================

/// Format a monetary value as pt-BR currency: `R$ 100.000,00`.
pub fn format_currency(value: f64) -> String {
    let negative = value < 0.0;
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    let sign = if negative { "-" } else { "" };
    format!("R$ {}{},{:02}", sign, grouped, frac)
}

/// Normalize a registry yes/no flag. Both raw encodings ("S" and
/// "Sim") count as true; anything else is a no.
pub fn format_yes_no(value: &str) -> &'static str {
    if value == "S" || value == "Sim" {
        "SIM"
    } else {
        "NÃO"
    }
}

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

fn pad_chars(s: &str, width: usize) -> String {
    let len = s.chars().count();
    if len >= width {
        s.to_string()
    } else {
        let mut padded = s.to_string();
        padded.extend(std::iter::repeat(' ').take(width - len));
        padded
    }
}

// ============================================================================
// RECORD RENDERING
// ============================================================================

/// Ordered field list: label plus already-formatted value. Absent
/// values fall back to the placeholder here, never to an error.
fn field_rows(record: &CompanyRecord) -> Vec<(&'static str, String)> {
    let opt = |v: &Option<String>| v.clone().unwrap_or_else(|| PLACEHOLDER.to_string());

    vec![
        ("CNPJ", format_cnpj(&record.cnpj)),
        ("Razão Social", record.razao_social.clone()),
        ("Nome Fantasia", opt(&record.nome_fantasia)),
        ("Situação Cadastral", record.situacao_cadastral.clone()),
        ("Data Situação", record.data_situacao_cadastral.clone()),
        (
            "Data Início Atividades",
            record.data_inicio_atividades.clone(),
        ),
        ("Natureza Jurídica", record.natureza_juridica.clone()),
        ("Capital Social", format_currency(record.capital_social)),
        ("Opção Simples", format_yes_no(&record.opcao_simples).to_string()),
        ("Opção MEI", format_yes_no(&record.opcao_mei).to_string()),
        ("Email", opt(&record.email)),
        ("Telefone", opt(&record.telefone)),
        ("Logradouro", record.logradouro.clone()),
        ("Número", record.numero.clone()),
        ("Complemento", opt(&record.complemento)),
        ("Bairro", record.bairro.clone()),
        (
            "Município / UF",
            format!("{} - {}", record.municipio, record.uf),
        ),
        ("CEP", record.cep.clone()),
    ]
}

fn border() -> String {
    format!("+{}+", "-".repeat(CONTENT_WIDTH))
}

/// Render a company record into display lines and copy text.
pub fn render_record(record: &CompanyRecord, mode: DisplayMode) -> RenderOutput {
    let mut lines: Vec<StyledLine> = Vec::new();
    let mut copy_text = String::from("*** Dados da Empresa ***\n\n");

    lines.push(StyledLine::success(" "));
    lines.push(StyledLine::info(
        "--- DADOS CADASTRAIS (Fictícios para teste do layout) ---",
    ));

    let rows = field_rows(record);
    match mode {
        DisplayMode::List => {
            for (label, value) in &rows {
                lines.push(StyledLine::info(format!("{}: {}", label, value)));
                copy_text.push_str(&format!("{}: {}\n", label, value));
            }
        }
        DisplayMode::Table => {
            lines.push(StyledLine::success(border()));
            for (label, value) in &rows {
                let display_value = truncate_chars(value, VALUE_WIDTH);
                let line = format!(
                    "| {}: {}|",
                    pad_chars(label, LABEL_WIDTH),
                    pad_chars(&display_value, VALUE_WIDTH)
                );
                lines.push(StyledLine::success(line));
                copy_text.push_str(&format!("{}: {}\n", label, value));
            }
            lines.push(StyledLine::success(border()));
        }
    }

    render_cnaes(record, &mut lines, &mut copy_text);
    render_socios(record, &mut lines, &mut copy_text);

    lines.push(StyledLine::success(" "));

    RenderOutput { lines, copy_text }
}

fn render_cnaes(record: &CompanyRecord, lines: &mut Vec<StyledLine>, copy_text: &mut String) {
    let Some(principal) = record.cnaes.first() else {
        return;
    };

    copy_text.push_str("\n*** Atividades Econômicas (CNAEs) ***\n");
    lines.push(StyledLine::info(" "));
    lines.push(StyledLine::info("--- ATIVIDADES ECONÔMICAS (CNAEs) ---"));

    lines.push(StyledLine::plain("PRINCIPAL:"));
    copy_text.push_str("PRINCIPAL:\n");

    let principal_line = format!("{} - {}", principal.codigo, principal.descricao);
    lines.push(StyledLine::success(principal_line.clone()));
    copy_text.push_str(&principal_line);
    copy_text.push('\n');

    let secundarios = &record.cnaes[1..];
    if !secundarios.is_empty() {
        lines.push(StyledLine::comment("SECUNDÁRIAS:"));
        copy_text.push_str("SECUNDÁRIAS:\n");
        for cnae in secundarios {
            let line = format!("- {} - {}", cnae.codigo, cnae.descricao);
            lines.push(StyledLine::success(line.clone()));
            copy_text.push_str(&line);
            copy_text.push('\n');
        }
    }
}

fn render_socios(record: &CompanyRecord, lines: &mut Vec<StyledLine>, copy_text: &mut String) {
    if record.socios.is_empty() {
        return;
    }

    let total = record.socios.len();
    let shown = total.min(SOCIOS_DISPLAY_CAP);

    copy_text.push_str(&format!(
        "\n*** Quadro de Sócios e Administradores ({} no total) ***\n",
        total
    ));
    lines.push(StyledLine::info(" "));
    lines.push(StyledLine::info(format!(
        "--- QUADRO DE SÓCIOS E ADMINISTRADORES (Exibindo {}) ---",
        shown
    )));

    for socio in record.socios.iter().take(SOCIOS_DISPLAY_CAP) {
        let faixa = socio.faixa_etaria.as_deref().unwrap_or(PLACEHOLDER);
        lines.push(StyledLine::success(format!(
            "> {} ({}) - {} (Desde: {})",
            socio.nome, faixa, socio.descricao, socio.data_entrada
        )));
    }

    if total > SOCIOS_DISPLAY_CAP {
        lines.push(StyledLine::comment(format!(
            "... e mais {} sócios/administradores (Apenas na cópia).",
            total - SOCIOS_DISPLAY_CAP
        )));
    }

    // The copy text carries every entry, display cap or not.
    for socio in &record.socios {
        let faixa = socio.faixa_etaria.as_deref().unwrap_or(PLACEHOLDER);
        copy_text.push_str(&format!(
            "> {} (CPF/CNPJ: {}) - {} (Desde: {} / Faixa Etária: {})\n",
            socio.nome, socio.cnpj_cpf, socio.descricao, socio.data_entrada, faixa
        ));
    }
}

/// Bordered error box, always at the fixed content width.
pub fn error_box(message: &str) -> Vec<StyledLine> {
    let border = border();
    let body = format!("| ERRO: {}|", pad_chars(message, CONTENT_WIDTH - 8));
    vec![
        StyledLine::error(" "),
        StyledLine::error(border.clone()),
        StyledLine::error(body),
        StyledLine::error(border),
        StyledLine::error(" "),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{RecordSource, Socio, StaticRecordSource};

    fn sample() -> CompanyRecord {
        StaticRecordSource::new()
            .fetch("11222333000181")
            .unwrap()
            .unwrap()
    }

    #[test]
    fn test_currency_formatting() {
        assert_eq!(format_currency(100000.0), "R$ 100.000,00");
        assert_eq!(format_currency(0.0), "R$ 0,00");
        assert_eq!(format_currency(1234567.89), "R$ 1.234.567,89");
        assert_eq!(format_currency(999.5), "R$ 999,50");
        assert_eq!(format_currency(-1500.0), "R$ -1.500,00");
    }

    #[test]
    fn test_yes_no_normalization() {
        assert_eq!(format_yes_no("S"), "SIM");
        assert_eq!(format_yes_no("Sim"), "SIM");
        assert_eq!(format_yes_no("N"), "NÃO");
        assert_eq!(format_yes_no(""), "NÃO");
        assert_eq!(format_yes_no("sim"), "NÃO");
    }

    #[test]
    fn test_table_rows_constant_length() {
        let output = render_record(&sample(), DisplayMode::Table);
        let rows: Vec<&StyledLine> = output
            .lines
            .iter()
            .filter(|l| l.text.starts_with("| "))
            .collect();
        assert!(!rows.is_empty());
        let width = rows[0].text.chars().count();
        for row in &rows {
            assert_eq!(row.text.chars().count(), width, "row: {}", row.text);
        }
    }

    #[test]
    fn test_table_has_borders() {
        let output = render_record(&sample(), DisplayMode::Table);
        let borders = output
            .lines
            .iter()
            .filter(|l| l.text == border())
            .count();
        assert_eq!(borders, 2);
        assert_eq!(border().chars().count(), CONTENT_WIDTH + 2);
    }

    #[test]
    fn test_list_mode_has_no_borders() {
        let output = render_record(&sample(), DisplayMode::List);
        assert!(output.lines.iter().all(|l| !l.text.starts_with('+')));
        assert!(output
            .lines
            .iter()
            .any(|l| l.text == "Razão Social: EMPRESA DE EXEMPLO LTDA"));
    }

    #[test]
    fn test_long_value_truncated_in_table_but_not_copy() {
        let mut record = sample();
        record.razao_social = "X".repeat(VALUE_WIDTH + 20);
        let output = render_record(&record, DisplayMode::Table);

        let row = output
            .lines
            .iter()
            .find(|l| l.text.starts_with("| Razão Social"))
            .unwrap();
        assert!(!row.text.contains(&"X".repeat(VALUE_WIDTH + 1)));
        assert!(output.copy_text.contains(&"X".repeat(VALUE_WIDTH + 20)));
    }

    #[test]
    fn test_placeholder_for_missing_fields() {
        let mut record = sample();
        record.nome_fantasia = None;
        record.email = None;
        let output = render_record(&record, DisplayMode::List);
        assert!(output
            .lines
            .iter()
            .any(|l| l.text == "Nome Fantasia: N/A"));
        assert!(output.lines.iter().any(|l| l.text == "Email: N/A"));
    }

    #[test]
    fn test_cnae_blocks() {
        let output = render_record(&sample(), DisplayMode::Table);
        let texts: Vec<&str> = output.lines.iter().map(|l| l.text.as_str()).collect();
        let principal_pos = texts.iter().position(|t| *t == "PRINCIPAL:").unwrap();
        assert_eq!(
            texts[principal_pos + 1],
            "6201501 - Desenvolvimento de programas de computador sob encomenda"
        );
        let sec_pos = texts.iter().position(|t| *t == "SECUNDÁRIAS:").unwrap();
        assert_eq!(
            texts[sec_pos + 1],
            "- 6204000 - Consultoria em tecnologia da informação"
        );
    }

    #[test]
    fn test_single_cnae_has_no_secondary_header() {
        let mut record = sample();
        record.cnaes.truncate(1);
        let output = render_record(&record, DisplayMode::Table);
        assert!(output.lines.iter().all(|l| l.text != "SECUNDÁRIAS:"));
        assert!(!output.copy_text.contains("SECUNDÁRIAS"));
    }

    #[test]
    fn test_socios_display_cap_and_full_copy() {
        let mut record = sample();
        record.socios = (0..12)
            .map(|i| Socio {
                nome: format!("Sócio {}", i),
                descricao: "Sócio".to_string(),
                identificador: 2,
                cnpj_cpf: format!("***{:06}**", i),
                data_entrada: "01/01/2000".to_string(),
                nome_representante: None,
                faixa_etaria: None,
            })
            .collect();

        let output = render_record(&record, DisplayMode::Table);

        let displayed = output
            .lines
            .iter()
            .filter(|l| l.text.starts_with("> "))
            .count();
        assert_eq!(displayed, SOCIOS_DISPLAY_CAP);

        let summary = output
            .lines
            .iter()
            .find(|l| l.text.starts_with("... e mais"))
            .unwrap();
        assert_eq!(
            summary.text,
            "... e mais 2 sócios/administradores (Apenas na cópia)."
        );

        let copied = output
            .copy_text
            .lines()
            .filter(|l| l.starts_with("> "))
            .count();
        assert_eq!(copied, 12);
        assert!(output.copy_text.contains("(12 no total)"));
    }

    #[test]
    fn test_copy_text_includes_tax_ids() {
        let output = render_record(&sample(), DisplayMode::Table);
        assert!(output.copy_text.contains("CPF/CNPJ: ***123456**"));
        assert!(output.copy_text.contains("Faixa Etária: 41-50 anos"));
        // Display lines never leak the tax id
        assert!(output.lines.iter().all(|l| !l.text.contains("***123456**")));
    }

    #[test]
    fn test_empty_socios_renders_nothing() {
        let mut record = sample();
        record.socios.clear();
        let output = render_record(&record, DisplayMode::Table);
        assert!(output
            .lines
            .iter()
            .all(|l| !l.text.contains("QUADRO DE SÓCIOS")));
        assert!(!output.copy_text.contains("Quadro de Sócios"));
    }

    #[test]
    fn test_error_box_shape() {
        let lines = error_box("CNPJ deve ter 14 dígitos.");
        assert_eq!(lines.len(), 5);
        assert!(lines.iter().all(|l| l.style == LineStyle::Error));
        assert_eq!(lines[1].text, border());
        assert_eq!(lines[3].text, border());
        assert!(lines[2].text.starts_with("| ERRO: CNPJ deve ter 14"));
        // "| ERRO: " (8) + padded message (62) + "|" (1)
        assert_eq!(lines[2].text.chars().count(), CONTENT_WIDTH + 1);
    }
}
