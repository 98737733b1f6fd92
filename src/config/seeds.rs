//! Seed-list file loading

use crate::config::validate_seed;
use crate::{ConfigError, ConfigResult};
use std::fs;
use std::path::Path;
use url::Url;

/// Reads a newline-delimited list of seed URLs.
///
/// Blank lines are skipped and surrounding whitespace is trimmed. A
/// missing file or a line that does not parse as a fetchable URL is a
/// fatal configuration error, raised before any crawling starts.
pub fn load_seed_list(path: &Path) -> ConfigResult<Vec<Url>> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::SeedList {
        path: path.to_path_buf(),
        source,
    })?;

    let mut seeds = Vec::new();
    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let url = Url::parse(line).map_err(|source| ConfigError::InvalidUrl {
            url: line.to_string(),
            source,
        })?;
        validate_seed(&url)?;
        seeds.push(url);
    }
    Ok(seeds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_one_url_per_line_skipping_blanks() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "http://example.com/").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "   https://other.org/page  ").unwrap();

        let seeds = load_seed_list(file.path()).unwrap();
        assert_eq!(seeds.len(), 2);
        assert_eq!(seeds[0].as_str(), "http://example.com/");
        assert_eq!(seeds[1].as_str(), "https://other.org/page");
    }

    #[test]
    fn missing_file_is_a_fatal_error() {
        let err = load_seed_list(Path::new("/nonexistent/urls.txt")).unwrap_err();
        assert!(matches!(err, ConfigError::SeedList { .. }));
    }

    #[test]
    fn unparseable_line_is_a_fatal_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "http://example.com/").unwrap();
        writeln!(file, "not a url").unwrap();

        let err = load_seed_list(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { .. }));
    }

    #[test]
    fn unsupported_scheme_is_a_fatal_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "ftp://example.com/list").unwrap();

        let err = load_seed_list(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedScheme(_)));
    }
}
