use crate::cli::OutputFormat;
use crate::commands::CommandOutput;
use crate::error::CliError;

pub fn render(output: &CommandOutput, format: OutputFormat, pretty: bool) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            let payload = if pretty {
                serde_json::to_string_pretty(&output.data)?
            } else {
                serde_json::to_string(&output.data)?
            };
            println!("{payload}");
        }
        OutputFormat::Table => render_table(output),
    }

    Ok(())
}

fn render_table(output: &CommandOutput) {
    if output.rows.is_empty() {
        println!("(no data)");
        return;
    }

    let columns = output.header.len();
    let mut widths: Vec<usize> = output.header.iter().map(String::len).collect();
    for row in &output.rows {
        for (index, cell) in row.iter().take(columns).enumerate() {
            widths[index] = widths[index].max(cell.len());
        }
    }

    print_row(&output.header, &widths);
    let divider: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
    print_row(&divider, &widths);
    for row in &output.rows {
        print_row(row, &widths);
    }
}

fn print_row(cells: &[String], widths: &[usize]) {
    let rendered: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect();
    println!("{}", rendered.join("  "));
}
