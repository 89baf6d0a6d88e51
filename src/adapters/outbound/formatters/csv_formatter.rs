use crate::ports::outbound::ReportFormatter;
use crate::scanning::domain::{DependencyCount, DependencyStats};
use crate::shared::Result;

/// CsvFormatter adapter for the delimited-text export.
///
/// One identity,count pair per line under a fixed header. Identities
/// are quoted; embedded quotes are doubled per RFC 4180.
pub struct CsvFormatter;

impl CsvFormatter {
    pub fn new() -> Self {
        Self
    }

    fn escape(field: &str) -> String {
        field.replace('"', "\"\"")
    }
}

impl Default for CsvFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for CsvFormatter {
    fn format(&self, ranking: &[DependencyCount], _stats: &DependencyStats) -> Result<String> {
        let mut output = String::from("Dependency Name,Occurrence Count\n");
        for entry in ranking {
            output.push_str(&format!(
                "\"{}\",{}\n",
                Self::escape(&entry.identity),
                entry.count
            ));
        }
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats() -> DependencyStats {
        DependencyStats {
            unique_dependencies: 2,
            total_occurrences: 3,
            sbom_count: 2,
        }
    }

    #[test]
    fn test_csv_header_and_rows() {
        let ranking = vec![
            DependencyCount {
                identity: "SPDXRef-npm-lodash".to_string(),
                count: 2,
            },
            DependencyCount {
                identity: "SPDXRef-npm-react".to_string(),
                count: 1,
            },
        ];
        let output = CsvFormatter::new().format(&ranking, &stats()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "Dependency Name,Occurrence Count");
        assert_eq!(lines[1], "\"SPDXRef-npm-lodash\",2");
        assert_eq!(lines[2], "\"SPDXRef-npm-react\",1");
    }

    #[test]
    fn test_csv_empty_ranking_is_header_only() {
        let output = CsvFormatter::new().format(&[], &stats()).unwrap();
        assert_eq!(output, "Dependency Name,Occurrence Count\n");
    }

    #[test]
    fn test_csv_escapes_embedded_quotes() {
        let ranking = vec![DependencyCount {
            identity: "weird\"name".to_string(),
            count: 1,
        }];
        let output = CsvFormatter::new().format(&ranking, &stats()).unwrap();
        assert!(output.contains("\"weird\"\"name\",1"));
    }
}
