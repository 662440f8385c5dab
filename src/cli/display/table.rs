//! Table builder wrapper around comfy-table for key/value display.

use comfy_table::{presets, Cell, CellAlignment, ContentArrangement, Table};

/// Create a two-column property table with the given headers.
///
/// Uses the NOTHING preset (no borders) for a clean CLI aesthetic.
pub fn property_table(headers: [&str; 2]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::NOTHING)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            headers
                .iter()
                .map(|h| Cell::new(h.to_uppercase()).set_alignment(CellAlignment::Left)),
        );
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_table_renders_rows() {
        let mut table = property_table(["field", "value"]);
        table.add_row(vec!["status", "passing"]);
        let rendered = table.to_string();
        assert!(rendered.contains("FIELD"));
        assert!(rendered.contains("passing"));
    }
}
