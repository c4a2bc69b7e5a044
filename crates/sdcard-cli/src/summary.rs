use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use sdcard_cli::commands::{ImportReport, StackStatus};
use sdcard_model::{MetadataCatalog, Sequence, score};

const ID_WIDTH: usize = 8;

pub fn print_import(report: &ImportReport) {
    if report.files.len() > 1 {
        for (path, added) in &report.files {
            println!("{}: {added}", path.display());
        }
    }
    println!("{} sequences added", report.added);
}

pub fn print_sequences(sequences: &[&Sequence], catalog: &MetadataCatalog) {
    if sequences.is_empty() {
        println!("No sequences.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Id"),
        header_cell("Date"),
        header_cell("Level"),
        header_cell("Calls"),
        header_cell("Score"),
        header_cell("Tags"),
        header_cell("Comment"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    for sequence in sequences {
        let tags: Vec<&str> = sequence
            .metadata
            .tags
            .iter()
            .filter_map(|tag| catalog.tag(tag).map(|tag| tag.name.as_str()))
            .collect();
        table.add_row(vec![
            Cell::new(short_id(sequence.id.as_str())).fg(Color::Cyan),
            Cell::new(sequence.date.format("%Y-%m-%d %H:%M")),
            Cell::new(sequence.level),
            Cell::new(sequence.calls.len()),
            Cell::new(format!("{:.1}", score(sequence))),
            Cell::new(tags.join(", ")),
            Cell::new(&sequence.comment),
        ]);
    }
    println!("{table}");
    println!("{} sequences", sequences.len());
}

pub fn print_tags(catalog: &MetadataCatalog) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Tag"), header_cell("Comment")]);
    apply_table_style(&mut table);
    for tag in catalog.tags.values() {
        table.add_row(vec![Cell::new(&tag.name), Cell::new(&tag.comment)]);
    }
    println!("{table}");
}

pub fn print_categories(catalog: &MetadataCatalog) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Category"),
        header_cell("Options"),
        header_cell("Comment"),
    ]);
    apply_table_style(&mut table);
    for category in catalog.categories.values() {
        table.add_row(vec![
            Cell::new(&category.name),
            Cell::new(category.options.join(", ")),
            Cell::new(&category.comment),
        ]);
    }
    println!("{table}");
}

pub fn print_stacks(stacks: &[StackStatus]) {
    if stacks.is_empty() {
        println!("No stacks. Add one with `sdcard stack add <NAME>`.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Stack"),
        header_cell("Query"),
        header_cell("Seen"),
        header_cell("Next"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for stack in stacks {
        let name = if stack.active {
            Cell::new(format!("* {}", stack.name)).add_attribute(Attribute::Bold)
        } else {
            Cell::new(format!("  {}", stack.name))
        };
        let next = match &stack.top {
            Some(id) => Cell::new(short_id(id.as_str())).fg(Color::Cyan),
            None => Cell::new("(empty)").add_attribute(Attribute::Dim),
        };
        table.add_row(vec![
            name,
            Cell::new(&stack.query),
            Cell::new(format!("{} of {}", stack.position, stack.len)),
            next,
        ]);
    }
    println!("{table}");
}

fn short_id(id: &str) -> &str {
    id.get(..ID_WIDTH).unwrap_or(id)
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
