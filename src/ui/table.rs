use std::fmt::Display;

use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, Table, TableComponent};

/// An empty listing with a bold header row and solid box borders.
///
/// Rows are added with `add_row`; cells are left-aligned and never wrapped.
pub fn listing<I, S>(headers: I) -> Table
where
    I: IntoIterator<Item = S>,
    S: Display,
{
    let header: Vec<Cell> = headers
        .into_iter()
        .map(|h| Cell::new(h).add_attribute(Attribute::Bold))
        .collect();

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_style(TableComponent::VerticalLines, '│')
        .set_header(header);
    table
}
