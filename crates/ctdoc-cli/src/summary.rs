use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use ctdoc_core::BatchSummary;
use ctdoc_model::{RunReport, Severity, TaskStatus};
use ctdoc_validate::RuleGenerator;

pub fn print_run_summary(report: &RunReport) {
    println!("Protocol: {}", report.protocol_path().display());
    println!("Output: {}", report.output_directory().display());
    if let Some(info) = report.protocol_info() {
        println!(
            "Study: {} - {}",
            info.display_number(),
            info.display_title()
        );
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Task"),
        header_cell("Status"),
        header_cell("Output"),
        header_cell("Message"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Center);
    for (index, task) in report.tasks().iter().enumerate() {
        let output = task
            .output_path()
            .and_then(|path| path.file_name())
            .map(|name| name.to_string_lossy().into_owned());
        table.add_row(vec![
            dim_cell(index + 1),
            Cell::new(task.kind().as_str()).add_attribute(Attribute::Bold),
            status_cell(task.status()),
            output.map_or_else(|| dim_cell("-"), Cell::new),
            task.error_message().map_or_else(|| dim_cell("-"), Cell::new),
        ]);
    }
    println!("{table}");
    println!(
        "Completed: {}  Failed: {}  Skipped: {}  Success rate: {:.1}%",
        report.completed_tasks(),
        report.failed_tasks(),
        report.skipped_tasks(),
        report.success_rate()
    );
    if !report.generated_files().is_empty() {
        println!("Generated files:");
        for path in report.generated_files() {
            println!("- {}", path.display());
        }
    }
    if !report.errors().is_empty() {
        eprintln!("Errors:");
        for error in report.errors() {
            eprintln!("- {error}");
        }
    }
}

pub fn print_batch_summary(summary: &BatchSummary) {
    println!("Batch output: {}", summary.base_dir.display());
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Protocol"),
        header_cell("Completed"),
        header_cell("Failed"),
        header_cell("Skipped"),
        header_cell("Files"),
        header_cell("Output"),
    ]);
    apply_summary_table_style(&mut table);
    for column in 1..=4 {
        align_column(&mut table, column, CellAlignment::Right);
    }
    let mut total_files = 0usize;
    for entry in &summary.entries {
        total_files += entry.generated_files;
        let name = entry
            .input
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        table.add_row(vec![
            Cell::new(name).fg(Color::Blue).add_attribute(Attribute::Bold),
            count_cell(entry.completed_tasks, Color::Green),
            count_cell(entry.failed_tasks, Color::Red),
            count_cell(entry.skipped_tasks, Color::Yellow),
            Cell::new(entry.generated_files),
            dim_cell(entry.output_directory.display()),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        count_cell(summary.totals.completed_tasks, Color::Green).add_attribute(Attribute::Bold),
        count_cell(summary.totals.failed_tasks, Color::Red).add_attribute(Attribute::Bold),
        count_cell(summary.totals.skipped_tasks, Color::Yellow).add_attribute(Attribute::Bold),
        Cell::new(total_files).add_attribute(Attribute::Bold),
        dim_cell("-"),
    ]);
    println!("{table}");
    if !summary.construction_failures.is_empty() {
        eprintln!("Failed to start:");
        for failure in &summary.construction_failures {
            eprintln!("- {}: {}", failure.input.display(), failure.error);
        }
    }
}

pub fn print_rules_table(generator: &RuleGenerator) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Rule ID"),
        header_cell("Type"),
        header_cell("Severity"),
        header_cell("Form"),
        header_cell("Field"),
        header_cell("Description"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Center);
    for rule in generator.rules() {
        table.add_row(vec![
            Cell::new(rule.rule_id()),
            Cell::new(rule.category().display_name()),
            severity_cell(rule.severity()),
            rule.form_name().map_or_else(|| dim_cell("-"), Cell::new),
            rule.field_name().map_or_else(|| dim_cell("-"), Cell::new),
            Cell::new(rule.description()),
        ]);
    }
    println!("{table}");

    let mut counts = Table::new();
    counts.set_header(vec![header_cell("Validation Type"), header_cell("Rules")]);
    apply_table_style(&mut counts);
    align_column(&mut counts, 1, CellAlignment::Right);
    for (category, count) in generator.rules_summary() {
        counts.add_row(vec![Cell::new(category), Cell::new(count)]);
    }
    counts.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(generator.rules().len()).add_attribute(Attribute::Bold),
    ]);
    println!("{counts}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn status_cell(status: TaskStatus) -> Cell {
    let label = format!("{} {}", status.icon(), status.as_str());
    match status {
        TaskStatus::Completed => Cell::new(label)
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
        TaskStatus::Failed => Cell::new(label)
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        TaskStatus::Skipped => Cell::new(label).fg(Color::Yellow),
        TaskStatus::Pending | TaskStatus::Running => dim_cell(label),
    }
}

fn severity_cell(severity: Severity) -> Cell {
    match severity {
        Severity::Critical => Cell::new(severity.as_str())
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        Severity::Major => Cell::new(severity.as_str()).fg(Color::Yellow),
        Severity::Minor => dim_cell(severity.as_str()),
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
