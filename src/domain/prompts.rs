//! Reusable prompt templates exposed via Model Context Protocol
//!
//! Pure string templating: each prompt renders its arguments into a fixed
//! text skeleton. The catalog is built once at startup and never mutates.

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Greeting,
    CodeReview,
    AnalyzeData,
    MeetingSummary,
    DebugHelper,
    GenerateDocs,
    SqlHelper,
}

#[derive(Debug, Serialize)]
pub struct PromptArgument {
    pub name: &'static str,
    pub description: &'static str,
    pub required: bool,
}

/// A registered prompt template: wire-visible descriptor plus the template
/// selector.
#[derive(Debug, Serialize)]
pub struct PromptEntry {
    #[serde(skip)]
    pub kind: PromptKind,
    pub name: &'static str,
    pub description: &'static str,
    pub arguments: Vec<PromptArgument>,
}

#[derive(Debug)]
pub struct PromptRegistry {
    entries: Vec<PromptEntry>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PromptError {
    #[error("missing required argument {0}")]
    MissingArgument(String),
    #[error("invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl PromptRegistry {
    pub fn new() -> Self {
        let argument = |name, description, required| PromptArgument {
            name,
            description,
            required,
        };

        let entries = vec![
            PromptEntry {
                kind: PromptKind::Greeting,
                name: "greeting",
                description: "Generate a personalized greeting message",
                arguments: vec![
                    argument("name", "The name of the person to greet", true),
                    argument(
                        "timeOfDay",
                        "The time of day (morning, afternoon, evening)",
                        false,
                    ),
                ],
            },
            PromptEntry {
                kind: PromptKind::CodeReview,
                name: "code-review",
                description: "Generate a comprehensive code review prompt for analyzing code",
                arguments: vec![
                    argument("language", "The programming language of the code", true),
                    argument(
                        "focusArea",
                        "Specific aspects to focus on (e.g., security, performance, readability)",
                        false,
                    ),
                ],
            },
            PromptEntry {
                kind: PromptKind::AnalyzeData,
                name: "analyze-data",
                description: "Generate a prompt for analyzing data or datasets",
                arguments: vec![
                    argument("dataType", "The type of data being analyzed", true),
                    argument("goal", "The analysis goal or question", true),
                    argument("context", "Additional context about the data", false),
                ],
            },
            PromptEntry {
                kind: PromptKind::MeetingSummary,
                name: "meeting-summary",
                description: "Generate a prompt for creating structured meeting summaries",
                arguments: vec![
                    argument("topic", "The meeting topic or title", true),
                    argument("participants", "List of participants (comma-separated)", false),
                ],
            },
            PromptEntry {
                kind: PromptKind::DebugHelper,
                name: "debug-helper",
                description: "Generate a systematic debugging prompt for troubleshooting issues",
                arguments: vec![
                    argument("issue", "The error message or issue description", true),
                    argument("stack", "The technology stack or environment", true),
                    argument("attemptedSolutions", "What has been tried already", false),
                ],
            },
            PromptEntry {
                kind: PromptKind::GenerateDocs,
                name: "generate-docs",
                description: "Generate a prompt for creating technical documentation",
                arguments: vec![
                    argument("component", "The component or feature to document", true),
                    argument("audience", "Target audience (developers, users, admins)", true),
                    argument("format", "Documentation format (markdown, html, rustdoc)", false),
                ],
            },
            PromptEntry {
                kind: PromptKind::SqlHelper,
                name: "sql-helper",
                description: "Generate a prompt for building SQL queries based on requirements",
                arguments: vec![
                    argument(
                        "requirement",
                        "Description of the data to retrieve or modify",
                        true,
                    ),
                    argument("dbType", "The database type (MySQL, PostgreSQL, etc.)", false),
                    argument(
                        "performance",
                        "Performance considerations (indexes, optimization)",
                        false,
                    ),
                ],
            },
        ];

        Self { entries }
    }

    /// Catalog in declaration order.
    pub fn list(&self) -> &[PromptEntry] {
        &self.entries
    }

    pub fn resolve(&self, name: &str) -> Option<&PromptEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }
}

impl Default for PromptRegistry {
    fn default() -> Self {
        Self::new()
    }
}

pub fn render_prompt(
    entry: &PromptEntry,
    arguments: &Map<String, Value>,
) -> Result<String, PromptError> {
    match entry.kind {
        PromptKind::Greeting => {
            let name = required_text(arguments, "name")?;
            let greeting = match optional_text(arguments, "timeOfDay") {
                Some(time_of_day) => format!("Good {time_of_day}"),
                None => "Hello".to_string(),
            };
            Ok(format!("{greeting}, {name}! How can I assist you today?"))
        }
        PromptKind::CodeReview => {
            let language = required_text(arguments, "language")?;
            let mut prompt = format!("Please review the following {language} code:\n\n");
            prompt.push_str("Focus on the following aspects:\n");
            prompt.push_str("- Code quality and readability\n");
            prompt.push_str("- Best practices and design patterns\n");
            prompt.push_str("- Potential bugs or edge cases\n");
            if let Some(focus_area) = optional_text(arguments, "focusArea") {
                prompt.push_str(&format!("- Special focus: {focus_area}\n"));
            }
            prompt.push_str("\nProvide:\n");
            prompt.push_str("1. Overall assessment\n");
            prompt.push_str("2. Specific issues found (if any)\n");
            prompt.push_str("3. Suggestions for improvement\n");
            prompt.push_str("4. Positive aspects of the code\n");
            Ok(prompt)
        }
        PromptKind::AnalyzeData => {
            let data_type = required_text(arguments, "dataType")?;
            let goal = required_text(arguments, "goal")?;
            let mut prompt = format!("Analyze the following {data_type} data:\n\n");
            if let Some(context) = optional_text(arguments, "context") {
                prompt.push_str(&format!("Context: {context}\n\n"));
            }
            prompt.push_str(&format!("Analysis Goal: {goal}\n\n"));
            prompt.push_str("Please provide:\n");
            prompt.push_str("1. Summary statistics and key findings\n");
            prompt.push_str("2. Patterns or trends identified\n");
            prompt.push_str("3. Anomalies or outliers (if any)\n");
            prompt.push_str("4. Insights and recommendations\n");
            prompt.push_str("5. Suggested visualizations\n");
            Ok(prompt)
        }
        PromptKind::MeetingSummary => {
            let topic = required_text(arguments, "topic")?;
            let mut prompt =
                format!("Create a structured summary for the meeting: \"{topic}\"\n\n");
            if let Some(participants) = optional_text(arguments, "participants") {
                prompt.push_str(&format!("Participants: {participants}\n\n"));
            }
            prompt.push_str("Please organize the summary into the following sections:\n\n");
            prompt.push_str("## Meeting Overview\n");
            prompt.push_str("- Date and duration\n");
            prompt.push_str("- Main objective\n\n");
            prompt.push_str("## Key Discussion Points\n");
            prompt.push_str("- [List main topics discussed]\n\n");
            prompt.push_str("## Decisions Made\n");
            prompt.push_str("- [List all decisions]\n\n");
            prompt.push_str("## Action Items\n");
            prompt.push_str("- [List with assignees and deadlines]\n\n");
            prompt.push_str("## Next Steps\n");
            prompt.push_str("- [Upcoming activities]\n");
            Ok(prompt)
        }
        PromptKind::DebugHelper => {
            let issue = required_text(arguments, "issue")?;
            let stack = required_text(arguments, "stack")?;
            let mut prompt = String::from("Help me debug the following issue:\n\n");
            prompt.push_str(&format!("**Issue:** {issue}\n\n"));
            prompt.push_str(&format!("**Stack:** {stack}\n\n"));
            if let Some(attempted) = optional_text(arguments, "attemptedSolutions") {
                prompt.push_str(&format!("**Already Tried:** {attempted}\n\n"));
            }
            prompt.push_str("Please provide:\n");
            prompt.push_str("1. Possible root causes\n");
            prompt.push_str("2. Step-by-step debugging approach\n");
            prompt.push_str("3. Specific things to check or test\n");
            prompt.push_str("4. Recommended fixes or workarounds\n");
            prompt.push_str("5. How to prevent this issue in the future\n");
            Ok(prompt)
        }
        PromptKind::GenerateDocs => {
            let component = required_text(arguments, "component")?;
            let audience = required_text(arguments, "audience")?;
            let format = optional_text(arguments, "format").unwrap_or("markdown");
            let mut prompt = format!("Create technical documentation for: {component}\n\n");
            prompt.push_str(&format!("Target Audience: {audience}\n"));
            prompt.push_str(&format!("Format: {format}\n\n"));
            prompt.push_str("Include the following sections:\n\n");
            prompt.push_str("1. **Overview**\n");
            prompt.push_str("   - What it is\n");
            prompt.push_str("   - Key features\n");
            prompt.push_str("   - Use cases\n\n");
            prompt.push_str("2. **Getting Started**\n");
            prompt.push_str("   - Prerequisites\n");
            prompt.push_str("   - Installation/Setup\n");
            prompt.push_str("   - Quick start example\n\n");
            prompt.push_str("3. **API/Interface Reference**\n");
            prompt.push_str("   - Methods/Functions\n");
            prompt.push_str("   - Parameters\n");
            prompt.push_str("   - Return values\n\n");
            prompt.push_str("4. **Examples**\n");
            prompt.push_str("   - Common use cases\n");
            prompt.push_str("   - Code samples\n\n");
            prompt.push_str("5. **Best Practices**\n");
            prompt.push_str("   - Recommendations\n");
            prompt.push_str("   - Common pitfalls\n\n");
            prompt.push_str("6. **Troubleshooting**\n");
            prompt.push_str("   - Common issues\n");
            prompt.push_str("   - Solutions\n");
            Ok(prompt)
        }
        PromptKind::SqlHelper => {
            let requirement = required_text(arguments, "requirement")?;
            let mut prompt = String::from("Generate a SQL query for the following requirement:\n\n");
            prompt.push_str(&format!("**Requirement:** {requirement}\n\n"));
            if let Some(db_type) = optional_text(arguments, "dbType") {
                prompt.push_str(&format!("**Database Type:** {db_type}\n\n"));
            }
            prompt.push_str("Please provide:\n");
            prompt.push_str("1. The SQL query\n");
            prompt.push_str("2. Explanation of the query structure\n");
            prompt.push_str("3. Any assumptions made\n");
            if optional_text(arguments, "performance").is_some() {
                prompt.push_str("4. Performance optimization tips\n");
                prompt.push_str("5. Recommended indexes\n");
            }
            Ok(prompt)
        }
    }
}

fn required_text<'args>(
    arguments: &'args Map<String, Value>,
    name: &str,
) -> Result<&'args str, PromptError> {
    match arguments.get(name) {
        None => Err(PromptError::MissingArgument(name.to_string())),
        Some(Value::String(text)) => Ok(text.as_str()),
        Some(other) => Err(PromptError::InvalidValue(
            name.to_string(),
            other.to_string(),
        )),
    }
}

fn optional_text<'args>(arguments: &'args Map<String, Value>, name: &str) -> Option<&'args str> {
    arguments
        .get(name)
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use super::{render_prompt, PromptError, PromptRegistry};
    use serde_json::{json, Map, Value};

    fn arguments(value: Value) -> Map<String, Value> {
        value.as_object().expect("object literal").clone()
    }

    #[test]
    fn greeting_defaults_to_hello() {
        let registry = PromptRegistry::new();
        let entry = registry.resolve("greeting").expect("known prompt");
        let text =
            render_prompt(entry, &arguments(json!({"name": "Ada"}))).expect("render succeeds");
        assert_eq!(text, "Hello, Ada! How can I assist you today?");
    }

    #[test]
    fn greeting_uses_time_of_day_when_present() {
        let registry = PromptRegistry::new();
        let entry = registry.resolve("greeting").expect("known prompt");
        let text = render_prompt(
            entry,
            &arguments(json!({"name": "Ada", "timeOfDay": "morning"})),
        )
        .expect("render succeeds");
        assert_eq!(text, "Good morning, Ada! How can I assist you today?");
    }

    #[test]
    fn missing_required_argument_is_a_typed_failure() {
        let registry = PromptRegistry::new();
        let entry = registry.resolve("greeting").expect("known prompt");
        let error = render_prompt(entry, &arguments(json!({}))).expect_err("missing name");
        assert_eq!(error, PromptError::MissingArgument("name".to_string()));
    }

    #[test]
    fn non_string_argument_is_rejected() {
        let registry = PromptRegistry::new();
        let entry = registry.resolve("greeting").expect("known prompt");
        let error =
            render_prompt(entry, &arguments(json!({"name": 7}))).expect_err("non-string name");
        assert_eq!(
            error.to_string(),
            "invalid value for name: 7"
        );
    }

    #[test]
    fn code_review_includes_focus_area_only_when_given() {
        let registry = PromptRegistry::new();
        let entry = registry.resolve("code-review").expect("known prompt");

        let plain = render_prompt(entry, &arguments(json!({"language": "Rust"})))
            .expect("render succeeds");
        assert!(plain.contains("Please review the following Rust code:"));
        assert!(!plain.contains("Special focus"));

        let focused = render_prompt(
            entry,
            &arguments(json!({"language": "Rust", "focusArea": "security"})),
        )
        .expect("render succeeds");
        assert!(focused.contains("- Special focus: security\n"));
    }

    #[test]
    fn generate_docs_defaults_format_to_markdown() {
        let registry = PromptRegistry::new();
        let entry = registry.resolve("generate-docs").expect("known prompt");
        let text = render_prompt(
            entry,
            &arguments(json!({"component": "dispatcher", "audience": "developers"})),
        )
        .expect("render succeeds");
        assert!(text.contains("Format: markdown\n"));
    }

    #[test]
    fn sql_helper_adds_performance_sections_when_requested() {
        let registry = PromptRegistry::new();
        let entry = registry.resolve("sql-helper").expect("known prompt");
        let text = render_prompt(
            entry,
            &arguments(json!({"requirement": "top customers", "performance": "indexes"})),
        )
        .expect("render succeeds");
        assert!(text.contains("4. Performance optimization tips\n"));
        assert!(text.contains("5. Recommended indexes\n"));
    }

    #[test]
    fn catalog_is_complete_and_well_formed() {
        let registry = PromptRegistry::new();
        let names: Vec<&str> = registry.list().iter().map(|entry| entry.name).collect();
        assert_eq!(
            names,
            vec![
                "greeting",
                "code-review",
                "analyze-data",
                "meeting-summary",
                "debug-helper",
                "generate-docs",
                "sql-helper",
            ]
        );

        for entry in registry.list() {
            assert!(!entry.description.is_empty());
            assert!(!entry.arguments.is_empty());
        }
    }
}
