pub mod range;
pub mod sheets_service;
pub mod tabular;

pub use sheets_service::{
    SheetData, SheetsApi, SheetsError, SheetsService, SpreadsheetSummary, TokenProvider,
};
