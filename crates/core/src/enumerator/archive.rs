use crate::util;
use cpscan_api::{LocationEnumerator, ResourceNames, ScanError, ScanResult};
use std::fs::File;
use std::io;
use tracing::trace;
use url::Url;
use zip::ZipArchive;

/// Lists archive URLs (`jar:`, `zip:`, `wsjar:`) from the archive index.
pub struct ArchiveEnumerator;

impl LocationEnumerator for ArchiveEnumerator {
    fn name(&self) -> &str {
        "archive"
    }

    fn find_resource_names(&self, location: &str, root_url: &Url) -> ScanResult<ResourceNames> {
        let (archive_path, entry) =
            util::split_archive_url(root_url).map_err(|e| ScanError::backend(root_url, e))?;

        // Part of the entry path leading to the namespace root, e.g. the
        // classes directory of a web archive.
        let entry = entry.trim_end_matches('/');
        let prefix = if location.is_empty() {
            if entry.is_empty() {
                String::new()
            } else {
                format!("{entry}/")
            }
        } else {
            match entry.strip_suffix(location) {
                Some(prefix) => prefix.to_string(),
                None => util::archive_root(&archive_path).to_string(),
            }
        };
        let to_scan = if location.is_empty() {
            prefix.clone()
        } else {
            format!("{prefix}{location}/")
        };
        trace!("scanning {} for entries under {}", archive_path.display(), to_scan);

        let file = File::open(&archive_path).map_err(|e| ScanError::backend(root_url, e))?;
        let archive = ZipArchive::new(file)
            .map_err(|e| ScanError::backend(root_url, io::Error::from(e)))?;

        let names = archive
            .file_names()
            .map(|name| name.replace('\\', "/"))
            .filter(|name| !name.ends_with('/') && name.starts_with(&to_scan))
            .map(|name| name[prefix.len()..].to_string())
            .collect();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::Path;
    use zip::write::SimpleFileOptions;

    fn write_archive(path: &Path, entries: &[&str]) {
        let mut writer = zip::ZipWriter::new(File::create(path).unwrap());
        for name in entries {
            if name.ends_with('/') {
                writer
                    .add_directory(name.trim_end_matches('/'), SimpleFileOptions::default())
                    .unwrap();
            } else {
                writer.start_file(*name, SimpleFileOptions::default()).unwrap();
                writer.write_all(b"content").unwrap();
            }
        }
        writer.finish().unwrap();
    }

    #[test]
    fn test_entries_under_location() {
        let temp = tempfile::tempdir().unwrap();
        let jar = temp.path().join("lib.jar");
        write_archive(
            &jar,
            &[
                "db/",
                "db/migration/",
                "db/migration/V1.sql",
                "db/migrationx/V9.sql",
                "other/V2.sql",
            ],
        );

        let url = util::archive_url(&jar, "db/migration").unwrap();
        let names = ArchiveEnumerator.find_resource_names("db/migration", &url).unwrap();
        assert_eq!(names.into_iter().collect::<Vec<_>>(), vec!["db/migration/V1.sql"]);
    }

    #[test]
    fn test_web_archive_prefix_is_stripped() {
        let temp = tempfile::tempdir().unwrap();
        let war = temp.path().join("app.war");
        write_archive(&war, &["WEB-INF/classes/db/V1.sql", "WEB-INF/lib/x.jar", "index.html"]);

        let url = util::archive_url(&war, "WEB-INF/classes/db").unwrap();
        let names = ArchiveEnumerator.find_resource_names("db", &url).unwrap();
        assert_eq!(names.into_iter().collect::<Vec<_>>(), vec!["db/V1.sql"]);

        let root = util::archive_url(&war, "WEB-INF/classes/").unwrap();
        let names = ArchiveEnumerator.find_resource_names("", &root).unwrap();
        assert_eq!(names.into_iter().collect::<Vec<_>>(), vec!["db/V1.sql"]);
    }

    #[test]
    fn test_unreadable_archive_is_a_backend_error() {
        let temp = tempfile::tempdir().unwrap();
        let broken = temp.path().join("broken.jar");
        std::fs::write(&broken, "not a zip").unwrap();

        let url = util::archive_url(&broken, "db").unwrap();
        let err = ArchiveEnumerator.find_resource_names("db", &url).unwrap_err();
        assert!(matches!(err, ScanError::Backend { .. }));
    }
}
