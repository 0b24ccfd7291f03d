//! Interactive tools exposed via Model Context Protocol
//!
//! Provides the fixed tool catalog (arithmetic, echo, clock, random number,
//! and the generic calculator entry point) together with its execution logic.
//! The registry is built once at startup and never mutates.

use chrono::Local;
use serde::Serialize;
use thiserror::Error;

use crate::entropy::EntropySource;
use crate::schema::{Schema, ValidatedArgs};

pub const CALCULATOR_OPERATIONS: [&str; 4] = ["add", "subtract", "multiply", "divide"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    Add,
    Subtract,
    Multiply,
    Divide,
    Echo,
    CurrentTime,
    RandomNumber,
    Calculator,
}

/// A registered tool: wire-visible descriptor plus the operation selector.
#[derive(Debug, Serialize)]
pub struct ToolEntry {
    #[serde(skip)]
    pub kind: ToolKind,
    pub name: &'static str,
    pub description: &'static str,
    #[serde(rename = "inputSchema")]
    pub input_schema: Schema,
}

#[derive(Debug)]
pub struct ToolRegistry {
    entries: Vec<ToolEntry>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        let arithmetic_schema = |a_description: &str, b_description: &str| {
            Schema::object(
                vec![
                    ("a", Schema::number(a_description)),
                    ("b", Schema::number(b_description)),
                ],
                &["a", "b"],
            )
        };

        let entries = vec![
            ToolEntry {
                kind: ToolKind::Add,
                name: "add",
                description: "Add two numbers together",
                input_schema: arithmetic_schema("First number", "Second number"),
            },
            ToolEntry {
                kind: ToolKind::Subtract,
                name: "subtract",
                description: "Subtract second number from first number",
                input_schema: arithmetic_schema("First number", "Second number"),
            },
            ToolEntry {
                kind: ToolKind::Multiply,
                name: "multiply",
                description: "Multiply two numbers",
                input_schema: arithmetic_schema("First number", "Second number"),
            },
            ToolEntry {
                kind: ToolKind::Divide,
                name: "divide",
                description: "Divide first number by second number",
                input_schema: arithmetic_schema("Numerator", "Denominator (must not be zero)"),
            },
            ToolEntry {
                kind: ToolKind::Echo,
                name: "echo",
                description: "Echo back the provided message",
                input_schema: Schema::object(
                    vec![("message", Schema::string("The message to echo back"))],
                    &["message"],
                ),
            },
            ToolEntry {
                kind: ToolKind::CurrentTime,
                name: "get_current_time",
                description: "Returns the current date and time",
                input_schema: Schema::object(
                    vec![(
                        "timezone",
                        Schema::string("Timezone (optional, defaults to system timezone)"),
                    )],
                    &[],
                ),
            },
            ToolEntry {
                kind: ToolKind::RandomNumber,
                name: "random_number",
                description: "Generate a random number between min and max (inclusive)",
                input_schema: Schema::object(
                    vec![
                        ("min", Schema::integer("Minimum value (inclusive)")),
                        ("max", Schema::integer("Maximum value (inclusive)")),
                    ],
                    &["min", "max"],
                ),
            },
            ToolEntry {
                kind: ToolKind::Calculator,
                name: "calculator",
                description: "Performs basic arithmetic operations",
                input_schema: Schema::object(
                    vec![
                        (
                            "operation",
                            Schema::string_enum(
                                "The operation to perform",
                                &CALCULATOR_OPERATIONS,
                            ),
                        ),
                        ("a", Schema::number("First number")),
                        ("b", Schema::number("Second number")),
                    ],
                    &["operation", "a", "b"],
                ),
            },
        ];

        Self { entries }
    }

    /// Catalog in declaration order.
    pub fn list(&self) -> &[ToolEntry] {
        &self.entries
    }

    pub fn resolve(&self, name: &str) -> Option<&ToolEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Business-rule failures raised by tool bodies. Converted into JSON-RPC
/// error envelopes at the tools/call seam, never propagated as panics.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ToolError {
    #[error("Division by zero is not allowed")]
    DivisionByZero,
    #[error("Division by zero")]
    CalculatorDivisionByZero,
    #[error("min must be less than or equal to max")]
    InvalidRange,
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),
    #[error("missing required argument {0}")]
    MissingArgument(String),
}

pub fn execute_tool(
    entry: &ToolEntry,
    args: &ValidatedArgs,
    entropy: &dyn EntropySource,
) -> Result<String, ToolError> {
    match entry.kind {
        ToolKind::Add => {
            let (a, b) = number_pair(args)?;
            Ok(format_number(a + b))
        }
        ToolKind::Subtract => {
            let (a, b) = number_pair(args)?;
            Ok(format_number(a - b))
        }
        ToolKind::Multiply => {
            let (a, b) = number_pair(args)?;
            Ok(format_number(a * b))
        }
        ToolKind::Divide => {
            let (a, b) = number_pair(args)?;
            if b == 0.0 {
                return Err(ToolError::DivisionByZero);
            }
            Ok(format_number(a / b))
        }
        ToolKind::Echo => {
            let message = require_text(args, "message")?;
            Ok(format!("Echo: {message}"))
        }
        ToolKind::CurrentTime => Ok(current_time_text(args.text("timezone"))),
        ToolKind::RandomNumber => {
            let min = require_integer(args, "min")?;
            let max = require_integer(args, "max")?;
            if min > max {
                return Err(ToolError::InvalidRange);
            }
            Ok(entropy.int_in_range(min, max).to_string())
        }
        ToolKind::Calculator => calculator(args),
    }
}

fn calculator(args: &ValidatedArgs) -> Result<String, ToolError> {
    let operation = require_text(args, "operation")?;
    let a = require_number(args, "a")?;
    let b = require_number(args, "b")?;

    let (symbol, result) = match operation {
        "add" => ("+", a + b),
        "subtract" => ("-", a - b),
        "multiply" => ("×", a * b),
        "divide" => {
            if b == 0.0 {
                return Err(ToolError::CalculatorDivisionByZero);
            }
            ("÷", a / b)
        }
        other => return Err(ToolError::UnknownOperation(other.to_string())),
    };

    Ok(format!("Result: {a:.2} {symbol} {b:.2} = {result:.2}"))
}

fn current_time_text(timezone: Option<&str>) -> String {
    let now = Local::now().format("%Y-%m-%d %H:%M:%S");
    // The timezone argument only labels the output; the clock reading itself
    // stays in the system timezone.
    match timezone.filter(|zone| !zone.is_empty()) {
        Some(zone) => format!("Current time (requested timezone: {zone}): {now}"),
        None => format!("Current time: {now}"),
    }
}

/// Renders a numeric result, keeping one decimal place for whole values.
fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

fn number_pair(args: &ValidatedArgs) -> Result<(f64, f64), ToolError> {
    Ok((require_number(args, "a")?, require_number(args, "b")?))
}

fn require_number(args: &ValidatedArgs, name: &str) -> Result<f64, ToolError> {
    args.number(name)
        .ok_or_else(|| ToolError::MissingArgument(name.to_string()))
}

fn require_integer(args: &ValidatedArgs, name: &str) -> Result<i64, ToolError> {
    args.integer(name)
        .ok_or_else(|| ToolError::MissingArgument(name.to_string()))
}

fn require_text<'args>(args: &'args ValidatedArgs, name: &str) -> Result<&'args str, ToolError> {
    args.text(name)
        .ok_or_else(|| ToolError::MissingArgument(name.to_string()))
}
