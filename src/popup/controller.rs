// The popup controller: wires user events to the service pipeline and keeps
// the two view panels mutually exclusive. All session state lives in one
// struct owned here and touched only by the single event-handling task.

use thiserror::Error;

use crate::core::assistant::{AiError, AssistantService, CompletionProvider};
use crate::core::keys::{ApiKeyStore, KeySaveOutcome, KeyService};
use crate::core::sheets::{
    SheetsApi, SheetsError, SheetsService, SpreadsheetSummary, TokenProvider,
};

/// Which panel is visible. Exactly one at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    List,
    Detail,
}

/// Controls the view disables while an operation is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Auth,
    Run,
}

/// Rendering port. The terminal view implements this for real use; tests
/// record the calls.
pub trait PopupView: Send {
    fn set_panel(&mut self, panel: Panel);
    fn set_busy(&mut self, control: Control, busy: bool);
    fn show_loading(&mut self, message: &str);
    fn show_sheet_list(&mut self, sheets: &[SpreadsheetSummary]);
    fn show_list_error(&mut self, message: &str);
    fn show_detail(&mut self, sheet: &SpreadsheetSummary);
    fn show_run_status(&mut self, message: &str);
    fn show_result(&mut self, text: &str);
    fn clear_result(&mut self);
    fn show_notice(&mut self, message: &str);
}

/// In-memory session state. Discarded when the popup closes.
pub struct SessionState {
    pub sheets: Vec<SpreadsheetSummary>,
    pub selected: Option<usize>,
    pub panel: Panel,
    pub api_key: String,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            sheets: Vec::new(),
            selected: None,
            panel: Panel::List,
            api_key: String::new(),
        }
    }
}

/// Why a run request was refused before any network call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunBlocker {
    NoSelection,
    MissingApiKey,
}

impl RunBlocker {
    fn message(self) -> &'static str {
        match self {
            RunBlocker::NoSelection => "Select a spreadsheet first.",
            RunBlocker::MissingApiKey => {
                "No API key saved. Save your Groq API key before running the assistant."
            }
        }
    }
}

/// Failures of the run pipeline, aggregated for display.
#[derive(Debug, Error)]
pub enum PopupError {
    #[error(transparent)]
    Sheets(#[from] SheetsError),

    #[error(transparent)]
    Ai(#[from] AiError),
}

pub struct PopupController<T, A, P, K, V>
where
    T: TokenProvider,
    A: SheetsApi,
    P: CompletionProvider,
    K: ApiKeyStore,
    V: PopupView,
{
    sheets: SheetsService<T, A>,
    assistant: AssistantService<P>,
    keys: KeyService<K>,
    view: V,
    state: SessionState,
}

impl<T, A, P, K, V> PopupController<T, A, P, K, V>
where
    T: TokenProvider,
    A: SheetsApi,
    P: CompletionProvider,
    K: ApiKeyStore,
    V: PopupView,
{
    pub fn new(
        sheets: SheetsService<T, A>,
        assistant: AssistantService<P>,
        keys: KeyService<K>,
        view: V,
    ) -> Self {
        Self {
            sheets,
            assistant,
            keys,
            view,
            state: SessionState::default(),
        }
    }

    /// Popup open: load the stored key once and show the list panel.
    pub async fn opened(&mut self) {
        self.state.api_key = self.keys.load_key().await.unwrap_or_default();
        self.set_panel(Panel::List);
    }

    /// Auth button: fetch a token, list spreadsheets, repopulate the list.
    /// The control is re-enabled whether or not the listing succeeded.
    pub async fn auth_clicked(&mut self) {
        self.view.set_busy(Control::Auth, true);
        self.view.show_loading("Loading spreadsheets...");

        match self.sheets.list().await {
            Ok(sheets) => {
                self.state.sheets = sheets;
                self.view.show_sheet_list(&self.state.sheets);
            }
            Err(err) => {
                tracing::error!("failed to list spreadsheets: {err}");
                self.view
                    .show_list_error(&format!("Could not load spreadsheets: {err}"));
            }
        }

        self.view.set_busy(Control::Auth, false);
    }

    /// List entry activated. Out-of-range activations are ignored, matching
    /// clicks that land outside an entry.
    pub fn sheet_clicked(&mut self, index: usize) {
        let Some(sheet) = self.state.sheets.get(index) else {
            return;
        };

        self.state.selected = Some(index);
        self.view.show_detail(sheet);
        self.view.clear_result();
        self.set_panel(Panel::Detail);
    }

    /// Back button: swap panels. The selection persists but is irrelevant
    /// until the detail panel is revisited.
    pub fn back_clicked(&mut self) {
        self.set_panel(Panel::List);
    }

    /// Run button: validate, then run the full fetch -> serialize -> prompt
    /// -> complete -> extract pipeline and render the outcome. Validation
    /// failures abort before any network call.
    pub async fn run_clicked(&mut self, request: &str) {
        let selected = self
            .state
            .selected
            .and_then(|index| self.state.sheets.get(index))
            .cloned();

        let Some(sheet) = selected else {
            self.view.show_notice(RunBlocker::NoSelection.message());
            return;
        };
        if self.state.api_key.trim().is_empty() {
            self.view.show_notice(RunBlocker::MissingApiKey.message());
            return;
        }

        self.view.set_busy(Control::Run, true);
        self.view
            .show_run_status("Reading the sheet and asking the model...");

        match self.run_pipeline(&sheet, request).await {
            Ok(text) => self.view.show_result(&text),
            Err(err) => {
                tracing::error!("run failed for spreadsheet {}: {err}", sheet.id);
                self.view.show_result(&format!("Error: {err}"));
            }
        }

        self.view.set_busy(Control::Run, false);
    }

    /// Key save action, independent of panel state.
    pub async fn save_key_clicked(&mut self, raw: &str) {
        match self.keys.save_key(raw).await {
            Ok(KeySaveOutcome::Saved(key)) => {
                self.state.api_key = key;
                self.view.show_notice("API key saved.");
            }
            Ok(KeySaveOutcome::Removed) => {
                self.state.api_key.clear();
                self.view.show_notice("API key removed.");
            }
            Err(err) => {
                tracing::error!("failed to persist API key: {err}");
                self.view
                    .show_notice(&format!("Could not save the API key: {err}"));
            }
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    async fn run_pipeline(
        &self,
        sheet: &SpreadsheetSummary,
        request: &str,
    ) -> Result<String, PopupError> {
        let data = self.sheets.fetch_first_sheet(&sheet.id).await?;
        let report = self
            .assistant
            .analyze(&data, request, &self.state.api_key)
            .await?;
        Ok(report.display_text())
    }

    fn set_panel(&mut self, panel: Panel) {
        self.state.panel = panel;
        self.view.set_panel(panel);
    }
}
