//! Prompt templates for the completion provider.
//!
//! The instruction wording is a contract with the model: consistent replies
//! depend on the schema block staying stable, so change it deliberately.

/// Everything that goes into the per-run user prompt.
pub struct PromptInput<'a> {
    pub sheet_title: &'a str,
    pub used_range: &'a str,
    pub user_request: &'a str,
    pub table: &'a str,
}

/// Render the fixed instruction template for one run.
pub fn build_prompt(input: &PromptInput<'_>) -> String {
    format!(
        r#"You are operating on a Google Sheets spreadsheet.

Sheet title: {title}
Used range: {range}

Data (tab-separated, one line per row):
{table}

User request: {request}

Respond with JSON only. No explanations, no markdown fences.
The JSON must follow this schema:
{{
  "plan": "<short description of what you will do>",
  "commands": [
    {{"type": "transform_values", "range": "A1:B10", "onlyNumeric": true, "expression": "x*2"}},
    {{"type": "set_formula", "range": "C1:C10", "expression": "=A1+B1"}},
    {{"type": "write_values", "range": "D1:D2", "values": [["a"], ["b"]]}}
  ]
}}
Use "transform_values" to apply a per-cell expression over a range; the variable x is the current cell value, and "onlyNumeric" limits it to numeric cells.
Use "set_formula" to write a formula into every cell of a range.
Use "write_values" to write raw values into a range.
Include only the commands needed for the request."#,
        title = input.sheet_title,
        range = input.used_range,
        table = input.table,
        request = input.user_request,
    )
}

/// Fixed system instruction for the completion call.
///
/// `locale` is a BCP-47 tag such as `pt-BR`; the model is asked to answer
/// in that language.
pub fn system_prompt(locale: &str) -> String {
    format!(
        "You are a data and spreadsheet analysis assistant. \
         Answer in the user's locale ({locale}), clearly and concisely."
    )
}
