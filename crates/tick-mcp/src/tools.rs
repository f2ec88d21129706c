//! Tool table and dispatch.
//!
//! Each tool is one [`ToolSpec`] row: name, description, JSON input schema and
//! handler. `tools/list` renders the table and `tools/call` looks a row up by
//! name. Adding a tool means adding a row; the transport never branches on
//! tool names.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tick_dates::{
    current_date, format_date_range, parse_relative_date, DateRangeRequest, RangeType, WeekdayName,
};

use crate::error::{Result, ToolError};

/// Handler signature: the instant read for this call, plus the raw arguments.
pub type ToolHandler = fn(DateTime<Utc>, Value) -> Result<Value>;

/// One row of the tool table.
pub struct ToolSpec {
    pub name: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub input_schema: fn() -> Value,
    pub handler: ToolHandler,
}

impl ToolSpec {
    /// The `tools/list` entry for this tool.
    pub fn definition(&self) -> Value {
        json!({
            "name": self.name,
            "description": self.description,
            "inputSchema": (self.input_schema)(),
            "annotations": {
                "title": self.title,
                "readOnlyHint": true,
                "destructiveHint": false,
                "idempotentHint": true,
                "openWorldHint": false
            }
        })
    }
}

pub static TOOLS: &[ToolSpec] = &[
    ToolSpec {
        name: "get_current_date",
        title: "Get Current Date",
        description: "Get the current date and time information including weekday. \
            Returns the current date in various formats and weekday information. \
            Useful for determining relative dates like \"this week\" or \"today\".",
        input_schema: current_date_schema,
        handler: handle_get_current_date,
    },
    ToolSpec {
        name: "format_date_range",
        title: "Format Date Range",
        description: "Format date ranges for Tick API operations. \
            Converts relative range descriptions (this week, last month, weekdays of next week, \
            a custom week or range) into YYYY-MM-DD start and end dates, \
            with an explicit date list where the range is not contiguous.",
        input_schema: format_date_range_schema,
        handler: handle_format_date_range,
    },
    ToolSpec {
        name: "parse_relative_date",
        title: "Parse Relative Date",
        description: "Parse natural language date expressions such as \"yesterday\", \
            \"last Monday\" or \"this week\" into YYYY-MM-DD dates. \
            Unrecognized expressions return suggestions instead of failing.",
        input_schema: parse_relative_date_schema,
        handler: handle_parse_relative_date,
    },
];

/// Look up a tool by name.
pub fn find_tool(name: &str) -> Option<&'static ToolSpec> {
    TOOLS.iter().find(|tool| tool.name == name)
}

/// All `tools/list` entries, in table order.
pub fn tool_definitions() -> Vec<Value> {
    TOOLS.iter().map(ToolSpec::definition).collect()
}

// ── Tool results ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolContent {
    #[serde(rename = "type")]
    pub content_type: String,
    pub text: String,
}

/// Body of a `tools/call` response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolResult {
    pub content: Vec<ToolContent>,
    #[serde(rename = "isError")]
    pub is_error: bool,
}

impl ToolResult {
    fn text(text: String, is_error: bool) -> Self {
        Self {
            content: vec![ToolContent {
                content_type: "text".to_string(),
                text,
            }],
            is_error,
        }
    }
}

/// Run a tool and render its result as pretty-printed JSON text.
///
/// Failures do not escape: they become an `isError` result whose text starts
/// with `Error:`.
pub fn call_tool(name: &str, arguments: Value, now: DateTime<Utc>) -> ToolResult {
    let rendered = find_tool(name)
        .ok_or_else(|| ToolError::UnknownTool(name.to_string()))
        .and_then(|tool| (tool.handler)(now, arguments))
        .and_then(|value| serde_json::to_string_pretty(&value).map_err(ToolError::from));

    match rendered {
        Ok(text) => ToolResult::text(text, false),
        Err(e) => {
            tracing::warn!(tool = name, error = %e, "tool call failed");
            ToolResult::text(format!("Error: {e}"), true)
        }
    }
}

fn decode<T: DeserializeOwned>(tool: &str, arguments: Value) -> Result<T> {
    let arguments = match arguments {
        Value::Null => Value::Object(serde_json::Map::new()),
        other => other,
    };
    serde_json::from_value(arguments).map_err(|e| ToolError::InvalidArguments {
        tool: tool.to_string(),
        reason: e.to_string(),
    })
}

// ── get_current_date ────────────────────────────────────────────────────────

fn current_date_schema() -> Value {
    json!({
        "type": "object",
        "properties": {},
        "required": []
    })
}

fn handle_get_current_date(now: DateTime<Utc>, _arguments: Value) -> Result<Value> {
    Ok(serde_json::to_value(current_date(now))?)
}

// ── format_date_range ───────────────────────────────────────────────────────

fn format_date_range_schema() -> Value {
    let range_types: Vec<&str> = RangeType::ALL.iter().map(|rt| rt.as_str()).collect();
    let weekdays: Vec<&str> = WeekdayName::ALL.iter().map(|d| d.as_str()).collect();
    json!({
        "type": "object",
        "properties": {
            "range_type": {
                "type": "string",
                "enum": range_types,
                "description": "The type of date range to format"
            },
            "start_date": {
                "type": "string",
                "description": "Custom start date in YYYY-MM-DD format (only for custom_range; returned as given, must not be after end_date)"
            },
            "end_date": {
                "type": "string",
                "description": "Custom end date in YYYY-MM-DD format (only for custom_range; returned as given, must not be before start_date)"
            },
            "week_start_date": {
                "type": "string",
                "description": "Start date of a specific week in YYYY-MM-DD format (only for custom_week)"
            },
            "days_of_week": {
                "type": "array",
                "items": { "type": "string", "enum": weekdays },
                "description": "Specific days of the week to include (only for custom_week; defaults to the whole week)"
            }
        },
        "required": ["range_type"]
    })
}

fn handle_format_date_range(now: DateTime<Utc>, arguments: Value) -> Result<Value> {
    let request: DateRangeRequest = decode("format_date_range", arguments)?;
    tracing::debug!(range_type = %request.range_type, "formatting date range");
    let range = format_date_range(now, &request)?;
    Ok(serde_json::to_value(range)?)
}

// ── parse_relative_date ─────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ParseRelativeDateArgs {
    date_expression: String,
    #[serde(default)]
    reference_date: Option<String>,
}

fn parse_relative_date_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "date_expression": {
                "type": "string",
                "description": "Natural language date expression to parse (e.g., 'last Monday', 'this week', 'yesterday')"
            },
            "reference_date": {
                "type": "string",
                "description": "Optional reference date in YYYY-MM-DD format (defaults to current date)"
            }
        },
        "required": ["date_expression"]
    })
}

fn handle_parse_relative_date(now: DateTime<Utc>, arguments: Value) -> Result<Value> {
    let args: ParseRelativeDateArgs = decode("parse_relative_date", arguments)?;
    let parsed = parse_relative_date(now, &args.date_expression, args.reference_date.as_deref())?;
    Ok(serde_json::to_value(parsed)?)
}

// ── Tests ───────────────────────────────────────────────────────────────────
