//! Fixture builders shared by the integration tests.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use zip::write::SimpleFileOptions;

#[allow(dead_code)]
pub const PUBLIC_CLASS: u16 = 0x0021;
#[allow(dead_code)]
pub const PUBLIC_INTERFACE: u16 = 0x0601;

#[allow(dead_code)]
pub fn write_file(root: &Path, name: &str, content: &str) {
    let file = root.join(name);
    fs::create_dir_all(file.parent().unwrap()).unwrap();
    fs::write(file, content).unwrap();
}

#[allow(dead_code)]
pub fn write_archive(path: &Path, entries: &[(&str, &str)]) {
    let mut writer = zip::ZipWriter::new(File::create(path).unwrap());
    for (name, content) in entries {
        writer.start_file(*name, SimpleFileOptions::default()).unwrap();
        writer.write_all(content.as_bytes()).unwrap();
    }
    writer.finish().unwrap();
}

/// Minimal class file declaring `name` with the given supertypes.
#[allow(dead_code)]
pub fn class_bytes(
    name: &str,
    super_class: Option<&str>,
    interfaces: &[&str],
    flags: u16,
) -> Vec<u8> {
    let mut pool: Vec<u8> = Vec::new();
    let mut count: u16 = 1;
    let mut class_ref = |pool: &mut Vec<u8>, name: &str| -> u16 {
        let internal = name.replace('.', "/");
        pool.push(1);
        pool.extend_from_slice(&(internal.len() as u16).to_be_bytes());
        pool.extend_from_slice(internal.as_bytes());
        pool.push(7);
        pool.extend_from_slice(&count.to_be_bytes());
        count += 2;
        count - 1
    };

    let this_index = class_ref(&mut pool, name);
    let super_index = super_class.map(|s| class_ref(&mut pool, s)).unwrap_or(0);
    let interface_indices: Vec<u16> = interfaces.iter().map(|i| class_ref(&mut pool, i)).collect();

    let mut bytes = vec![0xCA, 0xFE, 0xBA, 0xBE, 0, 0, 0, 52];
    bytes.extend_from_slice(&count.to_be_bytes());
    bytes.extend_from_slice(&pool);
    bytes.extend_from_slice(&flags.to_be_bytes());
    bytes.extend_from_slice(&this_index.to_be_bytes());
    bytes.extend_from_slice(&super_index.to_be_bytes());
    bytes.extend_from_slice(&(interface_indices.len() as u16).to_be_bytes());
    for index in interface_indices {
        bytes.extend_from_slice(&index.to_be_bytes());
    }
    bytes.extend_from_slice(&[0, 0, 0, 0, 0, 0]);
    bytes
}

#[allow(dead_code)]
pub fn write_class(
    root: &Path,
    name: &str,
    super_class: Option<&str>,
    interfaces: &[&str],
    flags: u16,
) {
    let file = root.join(format!("{}.class", name.replace('.', "/")));
    fs::create_dir_all(file.parent().unwrap()).unwrap();
    fs::write(file, class_bytes(name, super_class, interfaces, flags)).unwrap();
}
