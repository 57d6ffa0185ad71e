use alertcond_condition::ConditionConfig;
use comfy_table::{presets::UTF8_FULL, Attribute, Cell, Color, ContentArrangement, Table};

pub fn build_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    let cells: Vec<Cell> = headers
        .iter()
        .map(|h| Cell::new(h).fg(Color::Cyan).add_attribute(Attribute::Bold))
        .collect();
    table.set_header(cells);
    table
}

/// One row per term of `config`.
pub fn condition_table(config: &ConditionConfig) -> Table {
    let mut table = build_table(&["Priority", "Operator", "Threshold", "Duration", "Function"]);
    for term in &config.term {
        let priority = match term.priority {
            alertcond_condition::Priority::Critical => Cell::new(term.priority).fg(Color::Red),
            alertcond_condition::Priority::Warning => Cell::new(term.priority).fg(Color::Yellow),
        };
        table.add_row(vec![
            priority,
            Cell::new(term.operator),
            Cell::new(term.threshold),
            Cell::new(format!("{}m", term.duration)),
            Cell::new(term.time_function),
        ]);
    }
    table
}
