use std::io::Write;

use serde_json::Value as J;

use crate::core::messages::{ContentBlock, ToolResultBlock, ToolUseBlock};
use crate::domain::Answer;

/// Concatenate the text blocks, in order, into the answer. When `echo` is
/// given, tool calls and results are summarized to it as they are passed; the
/// returned answer is the same either way.
pub fn extract_answer(blocks: &[ContentBlock], mut echo: Option<&mut dyn Write>) -> std::io::Result<Answer> {
    let mut answer = String::new();
    for block in blocks {
        match block {
            ContentBlock::Text { text } => answer.push_str(text),
            ContentBlock::McpToolUse(tool_use) => {
                if let Some(out) = echo.as_deref_mut() {
                    echo_tool_use(out, tool_use)?;
                }
            }
            ContentBlock::McpToolResult(result) => {
                if let Some(out) = echo.as_deref_mut() {
                    echo_tool_result(out, result)?;
                }
            }
            ContentBlock::Unknown => {}
        }
    }
    Ok(Answer(answer))
}

pub fn echo_tool_use(out: &mut dyn Write, tool_use: &ToolUseBlock) -> std::io::Result<()> {
    let server = tool_use.server_name.as_deref().unwrap_or("tool");
    writeln!(out, "[{server}] {}", tool_use.name)?;
    if let Some(detail) = tool_use_detail(&tool_use.name, &tool_use.input) {
        writeln!(out, "  {detail}")?;
    }
    Ok(())
}

pub fn echo_tool_result(out: &mut dyn Write, result: &ToolResultBlock) -> std::io::Result<()> {
    if result.is_error {
        writeln!(out, "  Tool error")?;
    } else {
        for text in result.texts() {
            if let Some(summary) = result_summary(text) {
                writeln!(out, "  {summary}")?;
            }
        }
    }
    writeln!(out)
}

fn tool_use_detail(name: &str, input: &J) -> Option<String> {
    let str_field = |key: &str| input.get(key).and_then(J::as_str);
    match name {
        "search_articles" | "search_papers" => Some(format!("Query: {}", str_field("query").unwrap_or(""))),
        "semantic_search" | "semanticSearch" => Some(format!(
            "Query: {}",
            str_field("query").or_else(|| str_field("search_query")).unwrap_or("")
        )),
        "get_article_metadata" => {
            let ids = string_list(input.get("pmids"));
            let more = if ids.len() > 5 { "..." } else { "" };
            Some(format!("PMIDs: {}{more}", head(&ids, 5)))
        }
        "get_full_text_article" => Some(format!("PMC IDs: {}", head(&string_list(input.get("pmc_ids")), 3))),
        "find_related_articles" => Some(format!(
            "Finding related to: {}",
            head(&string_list(input.get("pmids")), 3)
        )),
        "get_paper_details" => Some(format!("BibTeX Key: {}", str_field("bibtex_key").unwrap_or(""))),
        _ => None,
    }
}

/// Identifiers sometimes arrive as numbers; render them as written.
fn string_list(v: Option<&J>) -> Vec<String> {
    v.and_then(J::as_array)
        .map(|items| {
            items
                .iter()
                .map(|i| match i {
                    J::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect()
        })
        .unwrap_or_default()
}

fn head(items: &[String], n: usize) -> String {
    items.iter().take(n).cloned().collect::<Vec<_>>().join(", ")
}

fn result_summary(text: &str) -> Option<String> {
    let data: J = serde_json::from_str(text).ok()?;
    let obj = data.as_object()?;
    let count = |key: &str| obj.get(key).and_then(J::as_array).map(Vec::len);
    if let Some(n) = count("articles") {
        Some(format!("Found: {n} articles"))
    } else if let Some(n) = count("results") {
        Some(format!("Found: {n} results"))
    } else if let Some(n) = count("papers") {
        Some(format!("Found: {n} papers"))
    } else if let Some(total) = obj.get("total_count") {
        Some(format!("Total matches: {}", display_scalar(total)))
    } else {
        obj.get("total_papers")
            .map(|n| format!("Database: {} papers", display_scalar(n)))
    }
}

fn display_scalar(v: &J) -> String {
    match v {
        J::String(s) => s.clone(),
        J::Null => "N/A".into(),
        other => other.to_string(),
    }
}
