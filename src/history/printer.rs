use super::log::HistoryLog;
use super::model::HistoryEntry;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, Table};

fn method_color(entry: &HistoryEntry) -> Color {
    match entry.method.as_str() {
        "GET" => Color::Green,
        "POST" => Color::Blue,
        "PUT" => Color::Yellow,
        "DELETE" => Color::Red,
        _ => Color::Grey,
    }
}

/// 渲染一页历史记录
pub fn render_page(entries: &[HistoryEntry], page: usize, total_pages: usize) -> String {
    if total_pages == 0 {
        return "No requests in history yet. Try `restpad send GET <url>`.".to_string();
    }
    if entries.is_empty() {
        return format!(
            "Page {} is out of range, history has {} page(s)",
            page, total_pages
        );
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["ID", "Time", "Method", "URL"]);

    for entry in entries {
        let time = entry
            .local_time()
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_default();

        table.add_row(vec![
            Cell::new(entry.id.chars().take(13).collect::<String>()),
            Cell::new(time),
            Cell::new(entry.method.as_str()).fg(method_color(entry)),
            Cell::new(&entry.url).add_attribute(Attribute::Dim),
        ]);
    }

    format!("{}\nPage {}/{}", table, page, total_pages)
}

pub fn print_history(log: &HistoryLog, page: usize, page_size: usize) {
    let entries = log.page(page, page_size);
    println!(
        "{}",
        render_page(&entries, page, log.page_count(page_size))
    );
}
