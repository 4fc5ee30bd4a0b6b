//! CLI command implementations
//!
//! Every command is one-shot: load the configuration (if any), build an
//! in-memory table, run the clause through the parser and planner, print one
//! response and exit.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::codec::DataType;
use crate::executor::QueryResult;
use crate::observability::{log_event, Event, Logger, ObservationScope, Severity};
use crate::parser::WhereClause;
use crate::planner::ExplainPlan;
use crate::schema::{ColumnProperty, TableSchema};
use crate::storage::MemoryStore;
use crate::table::Table;

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};
use super::io::{write_error, write_response, write_text};

/// Configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Minimum log severity (optional, default "info")
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Table definition (required)
    pub table: TableConfig,

    /// Seed rows, one literal per column in column order (optional)
    #[serde(default)]
    pub rows: Vec<Vec<String>>,
}

/// Table section of the configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableConfig {
    pub name: String,
    pub columns: Vec<ColumnConfig>,
}

/// One column definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnConfig {
    pub label: String,
    /// Face name such as `INT32` or `VARCHAR(16)`
    pub data_type: String,
    #[serde(default)]
    pub indexed: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file and apply its log level
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;
        Logger::set_min_severity(config.severity()?);

        let path_str = path.display().to_string();
        let rows = config.rows.len().to_string();
        log_event(
            Event::ConfigLoaded,
            &[
                ("path", path_str.as_str()),
                ("rows", rows.as_str()),
                ("table", config.table.name.as_str()),
            ],
        );
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> CliResult<()> {
        self.severity()?;

        if self.table.name.is_empty() {
            return Err(CliError::config_error("table.name must not be empty"));
        }
        if self.table.columns.is_empty() {
            return Err(CliError::config_error("table.columns must not be empty"));
        }

        let mut seen = HashSet::new();
        for column in &self.table.columns {
            if !seen.insert(column.label.as_str()) {
                return Err(CliError::config_error(format!(
                    "Duplicate column label: '{}'",
                    column.label
                )));
            }
        }

        let width = self.table.columns.len();
        for (i, row) in self.rows.iter().enumerate() {
            if row.len() != width {
                return Err(CliError::config_error(format!(
                    "Row {} has {} values, table has {} columns",
                    i,
                    row.len(),
                    width
                )));
            }
        }

        self.to_schema()?;
        Ok(())
    }

    /// Configured minimum log severity
    pub fn severity(&self) -> CliResult<Severity> {
        Severity::from_name(&self.log_level).ok_or_else(|| {
            CliError::config_error(format!(
                "Invalid log_level: '{}'. Must be one of trace, info, warn, error, fatal.",
                self.log_level
            ))
        })
    }

    /// Build the table schema
    pub fn to_schema(&self) -> CliResult<TableSchema> {
        let mut columns = Vec::with_capacity(self.table.columns.len());
        for column in &self.table.columns {
            let data_type = DataType::from_face_name(&column.data_type).map_err(|e| {
                CliError::config_error(format!("Column '{}': {}", column.label, e))
            })?;
            columns.push(ColumnProperty::new(
                column.label.clone(),
                data_type,
                column.indexed,
            ));
        }
        TableSchema::new(self.table.name.clone(), columns)
            .map_err(|e| CliError::config_error(e.to_string()))
    }

    /// Open an in-memory table holding the seed rows
    pub fn open_table(&self) -> CliResult<Table<MemoryStore>> {
        let schema = self.to_schema()?;
        let labels: Vec<&str> = self
            .table
            .columns
            .iter()
            .map(|c| c.label.as_str())
            .collect();

        let mut table = Table::open(schema, MemoryStore::new())?;
        for row in &self.rows {
            table.insert(labels.as_slice(), row.as_slice())?;
        }
        Ok(table)
    }
}

/// Parse arguments and run the selected command
///
/// Failures are printed as an error response before being returned.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    let outcome = run_command(cli.command);
    if let Err(err) = &outcome {
        let message = err.message();
        write_error(err.code_str(), &message)?;
    }
    outcome
}

/// Dispatch to a command
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Parse { clause } => write_response(parse(&clause)?),
        Command::Explain { config, clause } => {
            let config = Config::load(&config)?;
            let plan = explain(&config, clause.as_deref())?;
            write_text(&plan.to_string())
        }
        Command::Select {
            config,
            clause,
            columns,
        } => {
            let config = Config::load(&config)?;
            let result = select(&config, clause.as_deref(), &columns)?;
            write_response(serde_json::to_value(&result)?)
        }
    }
}

/// Parse only: the condition structure and predicate count
pub fn parse(text: &str) -> CliResult<Value> {
    let clause = WhereClause::parse(text)?;
    let tree = clause.tree();
    let predicates: Vec<String> = tree.predicates().iter().map(|p| p.to_string()).collect();

    Ok(json!({
        "tree": tree.structure(),
        "predicates": predicates.len(),
        "conditions": predicates,
        "depth": tree.depth(),
    }))
}

/// Parse and plan against the configured schema
pub fn explain(config: &Config, text: Option<&str>) -> CliResult<ExplainPlan> {
    let table = Table::open(config.to_schema()?, MemoryStore::new())?;
    let clause = match text {
        Some(text) => WhereClause::parse(text)?,
        None => WhereClause::all(),
    };
    let plan = table.plan(&clause)?;
    Ok(ExplainPlan::from_plan(
        table.schema().name(),
        clause.tree(),
        &plan,
    ))
}

/// Resolve a clause over the seed rows and fetch the requested columns
pub fn select(config: &Config, text: Option<&str>, columns: &[String]) -> CliResult<QueryResult> {
    let scope = ObservationScope::new("SELECT");
    let outcome = select_rows(config, text, columns);
    match &outcome {
        Ok(result) => {
            let rows = result.len().to_string();
            scope.complete_with_fields(&[("rows", rows.as_str())]);
        }
        Err(err) => scope.fail(&err.message()),
    }
    outcome
}

fn select_rows(config: &Config, text: Option<&str>, columns: &[String]) -> CliResult<QueryResult> {
    let table = config.open_table()?;
    let rows = match text {
        Some(text) => table.find(text)?,
        None => table.find_clause(&WhereClause::all())?,
    };
    Ok(table.select(columns, &rows)?)
}
