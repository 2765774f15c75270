use crate::name::Record;

/// Records as a GitHub-flavoured Markdown table (`ID | Title | Tags`).
pub fn records_table(records: &[Record]) -> String {
    let mut out = String::from("| ID | Title | Tags |\n|---|---|---|\n");
    for record in records {
        out.push_str(&format!(
            "| {} | {} | {} |\n",
            escape_cell(&record.identifier),
            escape_cell(&record.comment),
            escape_cell(&record.tags.join(", "))
        ));
    }
    out
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}
