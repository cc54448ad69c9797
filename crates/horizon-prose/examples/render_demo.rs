//! Builds a small formatted document and prints it as HTML, as ANSI text and
//! as a wrapped fragment layout on a character grid.
//!
//! Run with: cargo run -p horizon-prose --example render_demo

use horizon_prose::layout::FragmentLine;
use horizon_prose::prelude::*;

fn document() -> RichText {
    let mut builder = RichTextBuilder::new();
    builder.push_style(&Style::heading(1));
    builder.append("Horizon Prose");
    builder.pop_style(&Style::heading(1));
    builder.append("\nRich text with ");
    builder.push_style(&Style::bold());
    builder.append("bold");
    builder.pop_style(&Style::bold());
    builder.append(", ");
    builder.push_style(&Style::italic());
    builder.append("italic ");
    builder.push_style(&Style::red());
    builder.append("and red");
    builder.pop_style(&Style::red());
    builder.pop_style(&Style::italic());
    builder.append(" words, wrapped to a narrow column.");
    builder.to_rich_text()
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let text = document();

    println!("--- HTML ---");
    println!("{}", HtmlConverter::new().convert(&text));

    println!("--- ANSI ---");
    println!("{}", AnsiConverter::builder().reset(true).build().convert(&text));

    println!("--- Layout (24 columns, justified) ---");
    let options = LayoutOptions::new()
        .size(24.0, 0.0)
        .wrap_width(24.0)
        .horizontal_align(HorizontalAlign::Justify);
    let metrics = CachingMetrics::new(CellMetrics);
    let layout = FragmentedText::generate(&text, &metrics, &options);

    for line in layout.lines() {
        println!("|{}|", grid_row(line, 24));
    }

    let stats = metrics.stats();
    tracing::info!(
        lines = layout.line_count(),
        entries = stats.entries,
        hit_rate = stats.hit_rate,
        "layout finished"
    );
}

/// Place each fragment at its column, padding stretched whitespace.
fn grid_row(line: &FragmentLine, columns: usize) -> String {
    let mut row = String::new();
    for fragment in line.fragments() {
        let column = fragment.x.round() as usize;
        while row.chars().count() < column {
            row.push(' ');
        }
        if !fragment.is_whitespace() {
            row.push_str(&fragment.as_str());
        }
    }
    while row.chars().count() < columns {
        row.push(' ');
    }
    row
}
