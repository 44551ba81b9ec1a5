//! Page rendering with `comfy-table`.

use std::collections::BTreeSet;

use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL_CONDENSED};

use labbook_core::{ChangeTransport, DataController};
use labbook_model::FieldName;

/// Render the current page, or the placeholder when the dataset is empty.
pub fn render_page<T: ChangeTransport>(controller: &DataController<T>) -> String {
    if let Some(placeholder) = &controller.ui().placeholder {
        return placeholder.clone();
    }

    let page = controller.page();
    let columns: BTreeSet<&FieldName> = page
        .rows
        .iter()
        .flat_map(|row| row.cells.keys())
        .collect();

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let mut header = vec!["id".to_string(), "sel".to_string()];
    header.extend(columns.iter().map(|name| name.to_string()));
    table.set_header(header);

    for row in &page.rows {
        let mut cells = vec![
            row.id.to_string(),
            if row.selected { "*".to_string() } else { String::new() },
        ];
        cells.extend(
            columns
                .iter()
                .map(|name| row.cell(name).unwrap_or("").to_string()),
        );
        table.add_row(cells);
    }

    let snapshot = controller.snapshot();
    format!(
        "{table}\npage {}/{} | {} rows total | {} selected | {} pending changes",
        page.number.max(1),
        snapshot.page_count().max(1),
        snapshot.total_rows,
        controller.selection().len(),
        controller.changes().len(),
    )
}
