//! Class label map loaded from a UTF-8 text file with one `code: name` pair per line.
//!
//! Line order is the model's output index order.

use std::path::Path;

use tracing::info;

use crate::error::ClassifierError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    /// Class code as used in training (e.g. `parus_major`).
    pub code: String,
    /// Human-readable species name sent to users.
    pub name: String,
}

#[derive(Debug, Clone, Default)]
pub struct LabelMap {
    labels: Vec<Label>,
}

impl LabelMap {
    pub fn load(path: &Path) -> Result<Self, ClassifierError> {
        let content = std::fs::read_to_string(path).map_err(|source| ClassifierError::LabelsIo {
            path: path.to_path_buf(),
            source,
        })?;
        let map = Self::parse(&content)?;
        info!(path = %path.display(), classes = map.len(), "Loaded class labels");
        Ok(map)
    }

    /// Parses `code: name` lines. Both sides are trimmed, blank lines skipped; the name is
    /// everything after the first `:`.
    pub fn parse(content: &str) -> Result<Self, ClassifierError> {
        let mut labels = Vec::new();
        for (idx, raw) in content.lines().enumerate() {
            let line = raw.trim().trim_start_matches('\u{feff}');
            if line.is_empty() {
                continue;
            }
            let (code, name) = line
                .split_once(':')
                .map(|(c, n)| (c.trim(), n.trim()))
                .filter(|(c, n)| !c.is_empty() && !n.is_empty())
                .ok_or_else(|| ClassifierError::InvalidLabel {
                    line: idx + 1,
                    content: raw.to_string(),
                })?;
            labels.push(Label {
                code: code.to_string(),
                name: name.to_string(),
            });
        }
        if labels.is_empty() {
            return Err(ClassifierError::NoLabels);
        }
        Ok(Self { labels })
    }

    pub fn get(&self, index: usize) -> Option<&Label> {
        self.labels.get(index)
    }

    pub fn name_for(&self, code: &str) -> Option<&str> {
        self.labels
            .iter()
            .find(|l| l.code == code)
            .map(|l| l.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Label> {
        self.labels.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_and_keeps_order() {
        let map = LabelMap::parse("parus_major : Большая синица\n\n pica_pica:Сорока \n").unwrap();

        assert_eq!(map.len(), 2);
        assert_eq!(map.get(0).unwrap().code, "parus_major");
        assert_eq!(map.get(0).unwrap().name, "Большая синица");
        assert_eq!(map.get(1).unwrap().name, "Сорока");
        assert_eq!(map.name_for("pica_pica"), Some("Сорока"));
        assert_eq!(map.name_for("corvus_corax"), None);
    }

    #[test]
    fn test_parse_name_keeps_extra_colons() {
        let map = LabelMap::parse("a: Ворон: обыкновенный").unwrap();
        assert_eq!(map.get(0).unwrap().name, "Ворон: обыкновенный");
    }

    #[test]
    fn test_parse_strips_bom() {
        let map = LabelMap::parse("\u{feff}a: A\nb: B").unwrap();
        assert_eq!(map.get(0).unwrap().code, "a");
    }

    #[test]
    fn test_parse_reports_bad_line() {
        let err = LabelMap::parse("a: A\nmissing separator\n").unwrap_err();
        assert!(matches!(err, ClassifierError::InvalidLabel { line: 2, .. }));

        let err = LabelMap::parse("a: \n").unwrap_err();
        assert!(matches!(err, ClassifierError::InvalidLabel { line: 1, .. }));
    }

    #[test]
    fn test_parse_empty_is_error() {
        assert!(matches!(
            LabelMap::parse("\n  \n"),
            Err(ClassifierError::NoLabels)
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = LabelMap::load(Path::new("/nonexistent/labels.txt")).unwrap_err();
        assert!(matches!(err, ClassifierError::LabelsIo { .. }));
    }
}
