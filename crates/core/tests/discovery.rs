mod common;

use common::{write_archive, write_file};
use cpscan_api::{
    Charset, FilterResource, LoadError, Location, LocationEnumerator, Resource, ResourceLoader,
    ResourceNames, ScanResult, TypeHandle, TypeLoader,
};
use cpscan_core::{ClassPath, Scanner, ScannerConfig};
use std::io::{self, Read};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use url::Url;

/// Enumerator that lists a fixed set of names and counts its calls.
struct CountingEnumerator {
    calls: AtomicUsize,
}

impl LocationEnumerator for CountingEnumerator {
    fn name(&self) -> &str {
        "counting"
    }

    fn find_resource_names(&self, location: &str, _root_url: &Url) -> ScanResult<ResourceNames> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(["V2__second.sql", "V1__first.sql", "notes.txt"]
            .iter()
            .map(|name| format!("{location}/{name}"))
            .collect())
    }
}

#[derive(Debug)]
struct MemoryHost {
    lookups: AtomicUsize,
}

impl ResourceLoader for MemoryHost {
    fn resources(&self, path: &str) -> io::Result<Vec<Url>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(vec![Url::parse(&format!("memory:/{path}")).unwrap()])
    }

    fn open(&self, _name: &str) -> io::Result<Option<Box<dyn Read + Send>>> {
        Ok(None)
    }
}

impl TypeLoader for MemoryHost {
    fn load_type(&self, name: &str) -> Result<TypeHandle, LoadError> {
        Err(LoadError::NotFound {
            name: name.to_string(),
        })
    }
}

#[test]
fn repeated_scans_hit_the_cache() {
    let enumerator = Arc::new(CountingEnumerator {
        calls: AtomicUsize::new(0),
    });
    let host = Arc::new(MemoryHost {
        lookups: AtomicUsize::new(0),
    });
    let scanner = Scanner::builder()
        .environment(host.clone())
        .register_enumerator("memory", enumerator.clone())
        .build();

    let sql = FilterResource::by_suffix(".sql");
    let first = scanner.discover("classpath:db/migration", &sql).unwrap();
    let second = scanner.discover("db.migration/", &sql).unwrap();

    assert_eq!(first, second);
    assert_eq!(
        first.names.into_iter().collect::<Vec<_>>(),
        vec!["db/migration/V1__first.sql", "db/migration/V2__second.sql"]
    );
    assert_eq!(enumerator.calls.load(Ordering::SeqCst), 1);
    assert_eq!(host.lookups.load(Ordering::SeqCst), 1);

    // A different predicate over the same location is served from the cache too.
    let txt = scanner
        .discover("db/migration", &FilterResource::by_suffix(".txt"))
        .unwrap();
    assert_eq!(txt.names.len(), 1);
    assert_eq!(enumerator.calls.load(Ordering::SeqCst), 1);

    let stats = scanner.classpath_scanner().cache().stats();
    assert_eq!(stats.locations, 1);
    assert_eq!(stats.enumerators, 1);
    assert_eq!(stats.name_sets, 1);
}

#[test]
fn suffix_filter_finds_single_text_resource() {
    let temp = tempfile::tempdir().unwrap();
    write_file(temp.path(), "fixtures/hello.txt", "Hello");
    write_file(temp.path(), "fixtures/data.sql", "select 1");
    write_file(temp.path(), "fixtures/nested/config.properties", "a=b");

    let scanner = Scanner::for_classpath(ClassPath::from_paths([temp.path().to_path_buf()]));
    let resources = scanner
        .scan_for_resources("classpath:fixtures", &FilterResource::by_suffix(".txt"))
        .unwrap();

    assert_eq!(resources.len(), 1);
    assert!(resources[0].location().ends_with(".txt"));
    assert_eq!(resources[0].filename(), "hello.txt");
    assert_eq!(resources[0].load_as_string(Charset::Utf8).unwrap(), "Hello");
}

#[test]
fn absent_locations_yield_nothing() {
    let temp = tempfile::tempdir().unwrap();
    let scanner = Scanner::for_classpath(ClassPath::from_paths([temp.path().to_path_buf()]));

    let none = scanner.scan_for_resources("classpath:no/such/dir", &|_| true).unwrap();
    assert!(none.is_empty());

    let missing = format!("filesystem:{}/missing", temp.path().display());
    assert!(scanner.scan_for_resources(&missing, &|_| true).unwrap().is_empty());
}

#[test]
fn names_are_merged_across_roots_in_order() {
    let temp = tempfile::tempdir().unwrap();
    let classes = temp.path().join("classes");
    write_file(&classes, "db/migration/V3__dir.sql", "3");
    write_file(&classes, "db/migration/V1__shared.sql", "from dir");
    let jar = temp.path().join("lib.jar");
    write_archive(
        &jar,
        &[
            ("db/migration/V1__shared.sql", "from jar"),
            ("db/migration/V2__jar.sql", "2"),
        ],
    );

    let scanner = Scanner::for_classpath(ClassPath::from_paths([jar, classes]));
    let resources = scanner
        .scan_for_resources("db/migration", &FilterResource::by_prefix_suffix("V", ".sql"))
        .unwrap();

    let names: Vec<_> = resources.iter().map(|r| r.location().to_string()).collect();
    assert_eq!(
        names,
        vec![
            "db/migration/V1__shared.sql",
            "db/migration/V2__jar.sql",
            "db/migration/V3__dir.sql"
        ]
    );
    // Content comes from the first root holding the name.
    assert_eq!(resources[0].load_as_string(Charset::Utf8).unwrap(), "from jar");
}

#[test]
fn filesystem_locations_bypass_the_class_path() {
    let temp = tempfile::tempdir().unwrap();
    write_file(temp.path(), "sql/V1__init.sql", "create table t;");
    write_file(temp.path(), "sql/readme.md", "docs");

    let scanner = Scanner::for_classpath(ClassPath::new(vec![]));
    let descriptor = format!("filesystem:{}/sql", temp.path().display());
    let resources = scanner
        .scan_for_resources(&descriptor, &FilterResource::by_suffix(".sql"))
        .unwrap();

    assert_eq!(resources.len(), 1);
    assert_eq!(resources[0].filename(), "V1__init.sql");
    assert_eq!(
        resources[0].load_as_lines(Charset::Utf8).unwrap(),
        vec!["create table t;"]
    );
}

#[test]
fn ignored_prefixes_come_from_config() {
    let temp = tempfile::tempdir().unwrap();
    write_file(temp.path(), "app/generated/Skip.txt", "x");
    write_file(temp.path(), "app/Keep.txt", "x");

    let config = ScannerConfig::from_json(r#"{ "ignored_prefixes": ["app/generated"] }"#).unwrap();
    let scanner = Scanner::builder()
        .classpath(ClassPath::from_paths([temp.path().to_path_buf()]))
        .config(config)
        .build();

    let location = Location::parse("app").unwrap();
    let resources = scanner
        .scan_location_for_resources(&location, &|_| true)
        .unwrap();
    let names: Vec<_> = resources.iter().map(|r| r.location().to_string()).collect();
    assert_eq!(names, vec!["app/Keep.txt"]);
}

#[cfg(unix)]
#[test]
fn namespace_locations_stay_inside_class_path_roots() {
    let outside = tempfile::Builder::new().prefix("outside").tempdir().unwrap();
    write_file(outside.path(), "secret/passwd", "root:x");
    let classes = tempfile::tempdir().unwrap();

    let scanner = Scanner::for_classpath(ClassPath::from_paths([classes.path().to_path_buf()]));
    let descriptor = format!("classpath:/{}/secret", outside.path().display());
    let resources = scanner.scan_for_resources(&descriptor, &|_| true).unwrap();
    assert!(resources.is_empty());
}
