use crate::view::ResourceRow;
use cpscan_api::FilterResource;
use cpscan_core::Scanner;
use tabled::{Table, settings::Style};
use tracing::info;

pub fn run(
    scanner: &Scanner,
    location: &str,
    prefix: Option<String>,
    suffix: Option<String>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let by_name = FilterResource::by_prefix_suffix(
        prefix.unwrap_or_default(),
        suffix.unwrap_or_default(),
    );
    let resources = scanner.scan_for_resources(location, &by_name)?;
    info!("{} resource(s) found at {}", resources.len(), location);

    let rows: Vec<ResourceRow> = resources
        .iter()
        .map(|r| ResourceRow::from_resource(r.as_ref()))
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else if rows.is_empty() {
        println!("No resources found at {}.", location);
    } else {
        println!("{}", Table::new(rows).with(Style::psql()));
    }
    Ok(())
}
