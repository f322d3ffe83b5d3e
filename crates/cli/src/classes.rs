use crate::view::{ClassRow, FailureRow};
use cpscan_api::TypeHandle;
use cpscan_core::Scanner;
use tabled::{Table, settings::Style};
use tracing::info;

pub fn run(
    scanner: &Scanner,
    location: &str,
    implements: Option<String>,
    show_failures: bool,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let matches = |handle: &TypeHandle| match &implements {
        Some(name) => handle.is_concrete_subtype_of(name),
        None => true,
    };
    let mut scan = scanner.scan_for_classes_with_report(location, &matches)?;
    info!(
        "{} class(es) matched at {}, {} could not be loaded",
        scan.classes.len(),
        location,
        scan.failures.len()
    );

    if !show_failures {
        scan.failures.clear();
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&scan)?);
        return Ok(());
    }

    if scan.classes.is_empty() {
        println!("No matching classes found at {}.", location);
    } else {
        let rows: Vec<ClassRow> = scan.classes.iter().map(ClassRow::from_type).collect();
        println!("{}", Table::new(rows).with(Style::psql()));
    }

    if !scan.failures.is_empty() {
        println!("\nCould not be loaded:");
        let rows: Vec<FailureRow> = scan.failures.iter().map(FailureRow::from_error).collect();
        println!("{}", Table::new(rows).with(Style::psql()));
    }
    Ok(())
}
