//! Show the annotations of one unit file

use std::path::Path;

use dnotations::annotations::load_annotated_unit;
use dnotations::output::OutputFormat;

pub async fn parse(path: &Path, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let annotations = match load_annotated_unit(path).await {
        Ok(annotations) => annotations,
        Err(e) => {
            eprintln!("dnotations: {}", e);
            std::process::exit(1);
        }
    };

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string(&annotations)?),
        OutputFormat::Table => println!("{}", annotations),
    }

    Ok(())
}
