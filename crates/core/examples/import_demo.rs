//! Import a sheet of people and print each row's outcome.
//!
//! ```text
//! cargo run -p sheetbind-core --example import_demo -- people.xlsx [import.yaml]
//! ```
//!
//! Without arguments a small in-memory sheet is imported. Set `RUST_LOG=debug`
//! for per-cell conversion logs.

use serde::{Deserialize, Serialize};
use sheetbind_core::{
    FieldType, FileReader, ImportConfig, ImportResult, MemoryReader, Record, RecordSchema, Sheet,
    SheetSession, SpreadsheetReader,
};
use std::sync::OnceLock;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default, Serialize, Deserialize)]
struct Person {
    name: String,
    age: Option<i64>,
    email: Option<String>,
}

impl Record for Person {
    fn schema() -> &'static RecordSchema {
        static SCHEMA: OnceLock<RecordSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            RecordSchema::new("Person")
                .field("name", FieldType::Text)
                .field("age", FieldType::Int)
                .field("email", FieldType::Text)
        })
    }
}

async fn run<R: SpreadsheetReader>(reader: R, source: &str, config: &ImportConfig) -> ImportResult<()> {
    let mut session = SheetSession::<Person, _>::new(reader);

    let verdict = session.validate_with(source, config).await?;
    if verdict.has_errors() {
        println!("{source}: {verdict}");
        return Ok(());
    }

    for result in session.read_all().await? {
        match result.record() {
            Some(person) => println!("row {}: {person:?}", result.row().index()),
            None => println!(
                "row {}: invalid cells {:?} under {:?}",
                result.row().index(),
                result.invalid_cell_addresses(),
                result.invalid_cell_headers()
            ),
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ImportResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let source = args.next();
    let config = match args.next() {
        Some(path) => ImportConfig::from_path(path)?,
        None => ImportConfig::from_yaml_str(
            "naming_strategy: snake_case\ncolumns:\n  Name: Name\n  Age: Age\n  E-mail: Email\n",
        )?,
    };

    match source {
        Some(path) => run(FileReader::new(), &path, &config).await,
        None => {
            let reader = MemoryReader::new().with_source(
                "demo",
                vec![Sheet::from_data(vec![
                    vec!["Name", "Age", "E-mail"],
                    vec!["Alice", "30", "alice@example.com"],
                    vec!["Bob", "not-a-number", ""],
                    vec!["", "", ""],
                    vec!["Carol", "", "carol@example.com"],
                ])],
            );
            run(reader, "demo", &config).await
        }
    }
}
