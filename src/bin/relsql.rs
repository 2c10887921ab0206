//! relsql: build and run SELECT statements from the command line.
//!
//! # Usage
//!
//! ```bash
//! # List configured tables
//! relsql tables
//!
//! # Show the SQL for a filtered query
//! relsql query user -c id -c username -w 'age>=21' -o -username --dry-run
//!
//! # Count rows per group and run it
//! relsql query post -g user --count --database-url sqlite://blog.db
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use relsql::parser::{parse_filter, parse_order};
use relsql::prelude::*;

#[derive(Parser)]
#[command(name = "relsql")]
#[command(version)]
#[command(about = "Compose relational queries and compile them to parameterized SQL", long_about = None)]
#[command(after_help = "EXAMPLES:
    relsql tables
    relsql query user -c username -w 'active=true' -o -created_at
    relsql query post -g user --count --dialect sqlite --dry-run")]
struct Cli {
    /// Path to relsql.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// SQL dialect (postgres, sqlite, mysql); overrides the config file
    #[arg(long, global = true)]
    dialect: Option<Dialect>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List tables and link tables with their columns
    Tables,
    /// Build a SELECT against a table
    Query(QueryArgs),
}

#[derive(clap::Args)]
struct QueryArgs {
    /// Table to select from
    table: String,

    /// Fields to project (default: every column)
    #[arg(short = 'c', long = "column")]
    columns: Vec<String>,

    /// Filter terms such as `age>=21`, AND-ed together
    #[arg(short = 'w', long = "where")]
    filters: Vec<String>,

    /// Fields to group by
    #[arg(short = 'g', long = "group")]
    group: Vec<String>,

    /// Ordering terms; a leading `-` sorts descending
    #[arg(short = 'o', long = "order", allow_hyphen_values = true)]
    order: Vec<String>,

    /// Add a COUNT(*) projection labeled `count`
    #[arg(long)]
    count: bool,

    /// Don't execute, just show the generated SQL
    #[arg(short, long)]
    dry_run: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    format: OutputFormat,

    /// Database connection URL
    #[arg(long, env = "RELSQL_DATABASE_URL")]
    database_url: Option<String>,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "relsql=debug" } else { "relsql=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::discover(cli.config.as_deref()).context("loading configuration")?;
    let dialect = cli.dialect.unwrap_or(config.database.dialect);

    match cli.command {
        Commands::Tables => {
            show_tables(&config.registry());
            Ok(())
        }
        Commands::Query(args) => run_query(&config, dialect, args, cli.verbose).await,
    }
}

fn show_tables(registry: &SchemaRegistry) {
    if registry.is_empty() {
        println!("{}", "(no tables configured)".dimmed());
        return;
    }

    for table in registry.tables() {
        println!("{}", table.name.cyan().bold());
        for column in &table.columns {
            print_column(column);
        }
    }
    for link in registry.links() {
        println!("{} {}", link.table.cyan().bold(), "(link)".dimmed());
        print_column(&link.source);
        print_column(&link.target);
    }
}

fn print_column(column: &ColumnDef) {
    if column.name == column.column {
        println!("  • {}", column.name.white());
    } else {
        println!("  • {} {}", column.name.white(), format!("→ {}", column.column).dimmed());
    }
}

fn build_select(registry: &SchemaRegistry, args: &QueryArgs) -> Result<Select> {
    let table = registry.table(&args.table)?;

    let mut projections = args
        .columns
        .iter()
        .map(|c| table.field(c))
        .collect::<QueryResult<Vec<_>>>()?;
    if projections.is_empty() && args.group.is_empty() && !args.count {
        for column in registry.provider(&args.table)?.columns() {
            projections.push(table.field(&column.name)?);
        }
    }

    let group = args
        .group
        .iter()
        .map(|g| table.field(g))
        .collect::<QueryResult<Vec<_>>>()?;
    if args.columns.is_empty() {
        projections.extend(group.iter().cloned());
    }
    if args.count {
        projections.push(count().label("count"));
    }

    let mut select = table.project(projections).group(group);
    for term in &args.filters {
        let expr = parse_filter(term)
            .and_then(|t| t.to_expr(&table))
            .with_context(|| format!("in filter '{}'", term))?;
        select = select.filter(expr);
    }

    let order = args
        .order
        .iter()
        .map(|o| parse_order(o).and_then(|t| t.to_expr(&table)))
        .collect::<QueryResult<Vec<_>>>()?;
    Ok(select.order(order))
}

async fn run_query(config: &Config, dialect: Dialect, args: QueryArgs, verbose: bool) -> Result<()> {
    let select = build_select(&config.registry(), &args)?;
    let compiled = select.to_sql_with_dialect(dialect)?;

    if verbose {
        println!("{} {}", "Dialect:".dimmed(), dialect.to_string().yellow());
    }
    println!("{}", "Generated SQL:".green().bold());
    println!("{}", compiled.sql.white());

    if !compiled.values.is_empty() {
        println!();
        println!("{}", "Bindings:".cyan());
        for (i, value) in compiled.values.iter().enumerate() {
            println!("  {} = {}", i + 1, value.to_string().yellow());
        }
    }

    let url = args.database_url.as_ref().or(config.database.url.as_ref());
    let Some(url) = url else {
        if !args.dry_run {
            println!();
            println!(
                "{}",
                "⚠ No database URL. Use --database-url or set RELSQL_DATABASE_URL".yellow()
            );
        }
        return Ok(());
    };
    if args.dry_run {
        return Ok(());
    }

    if verbose {
        println!("{} {}", "Connecting to:".dimmed(), url);
    }
    let executor = Executor::connect(url, dialect).await?;
    let rows = executor.fetch_all(&select).await?;
    println!();
    format_output(&rows, &args.format)
}

fn format_output(rows: &[Row], format: &OutputFormat) -> Result<()> {
    if rows.is_empty() {
        println!("{}", "(no results)".dimmed());
        return Ok(());
    }

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(rows)?);
        }
        OutputFormat::Table => {
            let columns: Vec<&str> = rows[0].keys().collect();
            let mut widths: Vec<usize> = columns.iter().map(|c| c.len()).collect();
            for row in rows {
                for (w, val) in widths.iter_mut().zip(row.values()) {
                    *w = (*w).max(val_to_string(val).len());
                }
            }

            let header: Vec<String> = columns
                .iter()
                .zip(&widths)
                .map(|(c, w)| format!("{:width$}", c, width = w))
                .collect();
            println!("{}", header.join(" │ ").white().bold());

            let sep: Vec<String> = widths.iter().map(|w| "─".repeat(*w)).collect();
            println!("{}", sep.join("─┼─").dimmed());

            for row in rows {
                let cells: Vec<String> = row
                    .values()
                    .zip(&widths)
                    .map(|(v, w)| format!("{:width$}", val_to_string(v), width = w))
                    .collect();
                println!("{}", cells.join(" │ "));
            }

            println!();
            println!("{} row(s) returned", rows.len().to_string().cyan());
        }
    }
    Ok(())
}

fn val_to_string(val: &serde_json::Value) -> String {
    match val {
        serde_json::Value::Null => "NULL".to_string(),
        serde_json::Value::String(s) => s.clone(),
        _ => val.to_string(),
    }
}
