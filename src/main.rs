use anyhow::Result;
use std::env;

use cnpj_terminal::{
    classify, error_box, render_record, DisplayMode, RecordSource, StaticRecordSource,
    StyledLine, Submission,
};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() > 1 && args[1] == "query" {
        // One-shot query mode
        let input = args.get(2).map(String::as_str).unwrap_or("");
        run_query(input)?;
    } else {
        // Interactive mode (default)
        run_ui_mode()?;
    }

    Ok(())
}

/// Print one query result (or its error box) to stdout and exit.
/// Rejected input is still a normal outcome, not a process failure.
fn run_query(input: &str) -> Result<()> {
    match classify(input) {
        Submission::Empty => {
            eprintln!("Uso: cnpj-terminal query <cnpj>");
        }
        Submission::NotRecognized(cmd) => {
            println!("bash: comando não encontrado: {}", cmd);
        }
        Submission::BadLength(_) => {
            print_lines(error_box("CNPJ deve ter 14 dígitos."));
        }
        Submission::BadChecksum(_) => {
            print_lines(error_box("CNPJ inválido (dígito verificador não confere)."));
        }
        Submission::Query(cnpj) => {
            let source = StaticRecordSource::new();
            match source.fetch(&cnpj)? {
                Some(record) => {
                    let output = render_record(&record, DisplayMode::Table);
                    print_lines(output.lines);
                }
                None => print_lines(error_box("CNPJ não encontrado.")),
            }
        }
    }
    Ok(())
}

fn print_lines(lines: Vec<StyledLine>) {
    for line in lines {
        println!("{}", line.text);
    }
}

#[cfg(feature = "tui")]
fn run_ui_mode() -> Result<()> {
    use cnpj_terminal::ui;

    let mut app = ui::App::new();
    ui::run_ui(&mut app)?;

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode() -> Result<()> {
    eprintln!("Modo interativo indisponível!");
    eprintln!("   Recompile com: cargo build --features tui");
    eprintln!("   Ou use: cnpj-terminal query <cnpj>");
    std::process::exit(1);
}
