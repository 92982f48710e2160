use anyhow::Result;
use clap::Args;
use skiff::{Client, OutputFormat, Row, SqlValue, Statement};
use tabled::builder::Builder;
use tabled::settings::Style;

/// Arguments for the Query command
#[derive(Args)]
pub struct QueryArgs {
    /// SQL statement to execute
    pub sql: String,

    /// Positional arguments bound to ? placeholders.
    /// Inferred as integer, real, null, or text.
    pub args: Vec<String>,

    /// Database URL, overriding the environment
    #[clap(long)]
    pub url: Option<String>,

    /// Auth token, overriding the environment
    #[clap(long)]
    pub auth_token: Option<String>,

    /// Output format: table, json, json-pretty
    #[clap(short, long, default_value = "table")]
    pub output: OutputFormat,
}

pub async fn run(args: QueryArgs) -> Result<()> {
    let settings = super::resolve_settings(args.url, args.auth_token)?;
    let client = Client::connect(&settings).await?;

    let values = args.args.iter().map(|s| infer_arg(s)).collect();
    let stmt = Statement::with_args(args.sql, values);

    if returns_rows(&stmt.sql) {
        let rows = client.query(&stmt).await?;
        print_rows(&rows, args.output)?;
    } else {
        let affected = client.execute(&stmt).await?;
        println!("{affected} rows affected");
    }

    Ok(())
}

/// Infer the SQL type of a CLI argument string
fn infer_arg(raw: &str) -> SqlValue {
    if raw.eq_ignore_ascii_case("null") {
        return SqlValue::Null;
    }
    if let Ok(i) = raw.parse::<i64>() {
        return SqlValue::Integer(i);
    }
    if let Ok(f) = raw.parse::<f64>() {
        return SqlValue::Real(f);
    }
    SqlValue::Text(raw.to_string())
}

fn returns_rows(sql: &str) -> bool {
    let keyword = sql
        .trim_start()
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_lowercase();
    matches!(keyword.as_str(), "select" | "with" | "pragma" | "explain")
}

fn print_rows(rows: &[Row], output: OutputFormat) -> Result<()> {
    match output {
        OutputFormat::Json => {
            for row in rows {
                println!("{}", serde_json::to_string(row)?);
            }
        }
        OutputFormat::JsonPretty => {
            println!("{}", serde_json::to_string_pretty(rows)?);
        }
        OutputFormat::Table => {
            if rows.is_empty() {
                println!("no rows");
                return Ok(());
            }

            let columns: Vec<String> = rows[0].keys().cloned().collect();
            let mut builder = Builder::default();
            builder.push_record(columns.clone());
            for row in rows {
                builder.push_record(columns.iter().map(|c| {
                    match row.get(c) {
                        Some(serde_json::Value::Null) | None => String::new(),
                        Some(serde_json::Value::String(s)) => s.clone(),
                        Some(other) => other.to_string(),
                    }
                }));
            }
            println!("{}", builder.build().with(Style::rounded()));
        }
    }

    Ok(())
}
