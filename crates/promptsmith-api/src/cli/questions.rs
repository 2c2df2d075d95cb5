//! `psmith questions`

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};

use promptsmith_types::question::QUESTIONS;

pub fn list_questions(json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&QUESTIONS)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("#").fg(Color::White),
        Cell::new("Field").fg(Color::White),
        Cell::new("Question").fg(Color::White),
        Cell::new("Help").fg(Color::White),
    ]);

    for (index, question) in QUESTIONS.iter().enumerate() {
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(question.field).fg(Color::Cyan),
            Cell::new(question.question),
            Cell::new(question.description).fg(Color::DarkGrey),
        ]);
    }

    println!();
    println!("{table}");
    println!();

    Ok(())
}
