//! DROID report filtering.
//!
//! A DROID report lists folders, files, and (when DROID looked inside
//! archives) the entries of container files. Only some of those become
//! ingest records.

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use super::InputRecord;

static SCHEME_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?P<scheme>[A-Za-z][A-Za-z0-9+.\-]*):").expect("scheme regex"));

/// URI scheme of entries sitting directly on disk.
pub const FILE_SCHEME: &str = "file";

/// `TYPE` value DROID writes for directories.
pub const FOLDER_TYPE: &str = "Folder";

/// Outcome of splitting archive entries from on-disk files.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArchiveSplit {
    /// Entries found inside containers.
    pub records: Vec<InputRecord>,
    /// `NAME` of the first on-disk record, used as a fallback IE title.
    pub archive_name: Option<String>,
}

/// Records left for ingest after filtering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilteredInput {
    pub records: Vec<InputRecord>,
    /// Set only in archive-inclusion mode.
    pub archive_name: Option<String>,
    pub folders_removed: usize,
    pub others_removed: usize,
}

/// Lower-cased scheme of `uri`, or `""` when it has none.
///
/// URIs `url` rejects (DROID writes UNC hosts with spaces, for one) fall
/// back to the text before the first `:`.
pub fn uri_scheme(uri: &str) -> String {
    let uri = uri.trim();
    match Url::parse(uri) {
        Ok(parsed) => parsed.scheme().to_string(),
        Err(_) => SCHEME_PREFIX
            .captures(uri)
            .map(|caps| caps["scheme"].to_lowercase())
            .unwrap_or_default(),
    }
}

/// Path part of `uri`, verbatim: no percent-encoding or normalisation.
///
/// The scheme, any `//authority`, the query and the fragment are cut off.
pub fn uri_path(uri: &str) -> &str {
    let uri = uri.trim();
    let rest = match SCHEME_PREFIX.find(uri) {
        Some(prefix) => &uri[prefix.end()..],
        None => uri,
    };

    let rest = match rest.strip_prefix("//") {
        Some(authority) => match authority.find(['/', '?', '#']) {
            Some(end) => &authority[end..],
            None => "",
        },
        None => rest,
    };

    let rest = rest.split('#').next().unwrap_or(rest);
    rest.split('?').next().unwrap_or(rest)
}

fn is_folder(record: &InputRecord) -> bool {
    record.value("TYPE") == FOLDER_TYPE
}

fn is_on_disk(record: &InputRecord) -> bool {
    uri_scheme(record.value("URI")) == FILE_SCHEME
}

/// Drop folder records.
pub fn remove_folders(records: Vec<InputRecord>) -> Vec<InputRecord> {
    records.into_iter().filter(|r| !is_folder(r)).collect()
}

/// Keep only records stored directly on disk.
pub fn remove_container_contents(records: Vec<InputRecord>) -> Vec<InputRecord> {
    records.into_iter().filter(is_on_disk).collect()
}

/// Keep container entries; the first on-disk record names the archive.
pub fn split_archive_contents(records: Vec<InputRecord>) -> ArchiveSplit {
    let mut split = ArchiveSplit::default();
    for record in records {
        if !is_on_disk(&record) {
            split.records.push(record);
        } else if split.archive_name.is_none() {
            split.archive_name = Some(record.value("NAME").to_string());
        }
    }
    split
}

/// Apply the folder filter, then the container filter for the mode.
pub fn filter_records(records: Vec<InputRecord>, include_archives: bool) -> FilteredInput {
    let total = records.len();
    let records = remove_folders(records);
    let folders_removed = total - records.len();
    let after_folders = records.len();

    let (records, archive_name) = if include_archives {
        let split = split_archive_contents(records);
        (split.records, split.archive_name)
    } else {
        (remove_container_contents(records), None)
    };

    FilteredInput {
        others_removed: after_folders - records.len(),
        records,
        archive_name,
        folders_removed,
    }
}

/// `FILE_PATH` of every folder record.
pub fn folder_paths(records: &[InputRecord]) -> Vec<String> {
    records
        .iter()
        .filter(|r| is_folder(r))
        .map(|r| r.value("FILE_PATH").to_string())
        .collect()
}

/// `NAME` of every folder record.
pub fn folder_names(records: &[InputRecord]) -> Vec<String> {
    records
        .iter()
        .filter(|r| is_folder(r))
        .map(|r| r.value("NAME").to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(line: usize, uri: &str, name: &str, kind: &str) -> InputRecord {
        InputRecord::from_pairs(
            line,
            [
                ("URI", uri),
                ("NAME", name),
                ("TYPE", kind),
                ("FILE_PATH", name),
            ],
        )
    }

    fn sample() -> Vec<InputRecord> {
        vec![
            record(2, "file:/C:/data/", "data", "Folder"),
            record(3, "file:/C:/data/bundle.zip", "bundle.zip", "Container"),
            record(4, "zip:file:/C:/data/bundle.zip!/docs/a.txt", "a.txt", "File"),
            record(5, "zip:file:/C:/data/bundle.zip!/docs/", "docs", "Folder"),
            record(6, "file:/C:/data/b.doc", "b.doc", "File"),
        ]
    }

    #[test]
    fn test_uri_scheme() {
        assert_eq!(uri_scheme("file:/Z:/distilled/E1/a.doc"), "file");
        assert_eq!(uri_scheme("zip:file:/C:/x.zip!/a.txt"), "zip");
        assert_eq!(uri_scheme("FILE:/C:/x"), "file");
        assert_eq!(uri_scheme(""), "");
        assert_eq!(uri_scheme("no scheme here"), "");
    }

    #[test]
    fn test_uri_scheme_without_valid_url() {
        assert_eq!(uri_scheme("file://file server/share/a.doc"), "file");
        assert_eq!(uri_scheme("Zip:file://file server/x.zip!/a.txt"), "zip");
        assert_eq!(uri_scheme("1abc:/x"), "");

        let records = vec![record(2, "file://file server/share/a.doc", "a.doc", "File")];
        let filtered = filter_records(records, false);
        assert_eq!(filtered.records.len(), 1);
        assert_eq!(filtered.others_removed, 0);
    }

    #[test]
    fn test_uri_path_is_verbatim() {
        assert_eq!(
            uri_path("zip:file:/C:/x/b.zip!/Société/a b.txt"),
            "file:/C:/x/b.zip!/Société/a b.txt"
        );
        assert_eq!(uri_path("file:/Z:/E1/a%20b.doc"), "/Z:/E1/a%20b.doc");
        assert_eq!(uri_path("file://file server/share/a.doc"), "/share/a.doc");
        assert_eq!(uri_path("file://host"), "");
        assert_eq!(uri_path("zip:a.txt#frag"), "a.txt");
        assert_eq!(uri_path("no scheme here"), "no scheme here");
    }

    #[test]
    fn test_remove_folders() {
        let kept = remove_folders(sample());
        assert_eq!(kept.len(), 3);
        assert!(kept.iter().all(|r| r.value("TYPE") != "Folder"));
    }

    #[test]
    fn test_default_mode_drops_container_contents() {
        let filtered = filter_records(sample(), false);
        let names: Vec<&str> = filtered.records.iter().map(|r| r.value("NAME")).collect();
        assert_eq!(names, vec!["bundle.zip", "b.doc"]);
        assert_eq!(filtered.folders_removed, 2);
        assert_eq!(filtered.others_removed, 1);
        assert_eq!(filtered.archive_name, None);
    }

    #[test]
    fn test_archive_mode_keeps_entries_and_names_archive() {
        let filtered = filter_records(sample(), true);
        let names: Vec<&str> = filtered.records.iter().map(|r| r.value("NAME")).collect();
        assert_eq!(names, vec!["a.txt"]);
        assert_eq!(filtered.archive_name.as_deref(), Some("bundle.zip"));
        assert_eq!(filtered.others_removed, 2);
    }

    #[test]
    fn test_archive_mode_without_entries_is_empty() {
        let records = vec![record(2, "file:/C:/a.doc", "a.doc", "File")];
        let filtered = filter_records(records, true);
        assert!(filtered.records.is_empty());
        assert_eq!(filtered.archive_name.as_deref(), Some("a.doc"));
    }

    #[test]
    fn test_folder_listing() {
        let records = sample();
        assert_eq!(folder_paths(&records), vec!["data", "docs"]);
        assert_eq!(folder_names(&records), vec!["data", "docs"]);
    }
}
