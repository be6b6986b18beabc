// Terminal rendering of the popup: panels become sections of output, list
// entries become numbered lines the user can `open`.

use super::controller::{Control, Panel, PopupView};
use crate::core::sheets::SpreadsheetSummary;

#[derive(Default)]
pub struct TerminalView;

impl TerminalView {
    pub fn new() -> Self {
        Self
    }
}

impl PopupView for TerminalView {
    fn set_panel(&mut self, panel: Panel) {
        match panel {
            Panel::List => println!("\n== Spreadsheets =="),
            Panel::Detail => println!("\n== Sheet detail =="),
        }
    }

    fn set_busy(&mut self, _control: Control, _busy: bool) {
        // A terminal session processes one command at a time, so there is no
        // control to grey out; the status lines carry the feedback instead.
    }

    fn show_loading(&mut self, message: &str) {
        println!("{message}");
    }

    fn show_sheet_list(&mut self, sheets: &[SpreadsheetSummary]) {
        if sheets.is_empty() {
            println!("No spreadsheets found");
            return;
        }
        for (index, sheet) in sheets.iter().enumerate() {
            match sheet.created_time {
                Some(created) => println!(
                    "  [{}] {} (created {})",
                    index + 1,
                    sheet.name,
                    created.format("%Y-%m-%d")
                ),
                None => println!("  [{}] {}", index + 1, sheet.name),
            }
        }
        println!("Use `open <number>` to pick one.");
    }

    fn show_list_error(&mut self, message: &str) {
        println!("{message}");
    }

    fn show_detail(&mut self, sheet: &SpreadsheetSummary) {
        println!("{}", sheet.name);
        println!("{}", sheet.web_url());
        if let Some(modified) = sheet.modified_time {
            println!("Last modified {}", modified.format("%Y-%m-%d %H:%M"));
        }
        println!("Use `run <request>` to ask the assistant, `back` for the list.");
    }

    fn show_run_status(&mut self, message: &str) {
        println!("{message}");
    }

    fn show_result(&mut self, text: &str) {
        if !text.is_empty() {
            println!("{text}");
        }
    }

    fn clear_result(&mut self) {
        // Nothing to erase in a scrolling terminal.
    }

    fn show_notice(&mut self, message: &str) {
        println!("{message}");
    }
}
