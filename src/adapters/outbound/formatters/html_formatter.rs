use crate::ports::outbound::ReportFormatter;
use crate::scanning::domain::{DependencyCount, DependencyStats};
use crate::shared::Result;

const STYLE: &str = r#"
        body { font-family: Arial, sans-serif; margin: 20px; }
        table { width: 100%; border-collapse: collapse; margin-top: 20px; }
        th, td { border: 1px solid #ddd; padding: 12px; text-align: left; }
        th { background-color: #f2f2f2; font-weight: bold; }
        tr:nth-child(even) { background-color: #f9f9f9; }
        h2 { color: #333; }
        .stats { background-color: #e7f3ff; padding: 15px; border-radius: 5px; margin-bottom: 20px; }
"#;

/// HtmlFormatter adapter for the self-contained HTML report.
///
/// Embeds the corpus-wide summary statistics above the ranking table,
/// so the exported file stands on its own.
pub struct HtmlFormatter;

impl HtmlFormatter {
    pub fn new() -> Self {
        Self
    }

    fn escape(text: &str) -> String {
        text.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
    }
}

impl Default for HtmlFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for HtmlFormatter {
    fn format(&self, ranking: &[DependencyCount], stats: &DependencyStats) -> Result<String> {
        let mut output = String::new();
        output.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
        output.push_str("<title>Common Dependencies Report</title>\n");
        output.push_str(&format!("<style>{}</style>\n", STYLE));
        output.push_str("</head>\n<body>\n");
        output.push_str("<h2>Most Common Dependencies Across Repositories</h2>\n");
        output.push_str(&format!(
            "<div class=\"stats\">\n<strong>Analysis Summary:</strong><br>\n\
             &bull; Total SBOMs analyzed: {}<br>\n\
             &bull; Unique dependencies found: {}<br>\n\
             &bull; Total dependency occurrences: {}\n</div>\n",
            stats.sbom_count, stats.unique_dependencies, stats.total_occurrences
        ));
        output.push_str("<table>\n<tr><th>Dependency Name</th><th>Occurrence Count</th></tr>\n");
        for entry in ranking {
            output.push_str(&format!(
                "<tr><td>{}</td><td>{}</td></tr>\n",
                Self::escape(&entry.identity),
                entry.count
            ));
        }
        output.push_str("</table>\n</body>\n</html>\n");
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_report_embeds_stats_and_rows() {
        let ranking = vec![DependencyCount {
            identity: "SPDXRef-npm-lodash".to_string(),
            count: 7,
        }];
        let stats = DependencyStats {
            unique_dependencies: 12,
            total_occurrences: 40,
            sbom_count: 5,
        };
        let output = HtmlFormatter::new().format(&ranking, &stats).unwrap();

        assert!(output.starts_with("<!DOCTYPE html>"));
        assert!(output.contains("Total SBOMs analyzed: 5"));
        assert!(output.contains("Unique dependencies found: 12"));
        assert!(output.contains("Total dependency occurrences: 40"));
        assert!(output.contains("<td>SPDXRef-npm-lodash</td><td>7</td>"));
        assert!(output.ends_with("</html>\n"));
    }

    #[test]
    fn test_html_escapes_identity() {
        let ranking = vec![DependencyCount {
            identity: "<script>alert(1)</script>".to_string(),
            count: 1,
        }];
        let output = HtmlFormatter::new()
            .format(&ranking, &DependencyStats::default())
            .unwrap();
        assert!(!output.contains("<script>alert"));
        assert!(output.contains("&lt;script&gt;"));
    }
}
