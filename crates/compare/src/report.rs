use crate::types::{ComparisonData, Source};
use std::fmt;

/// Column at which likelihood values start so that report lines are aligned
const LABEL_WIDTH: usize = 20;

/// Likelihood score of one GP implementation
#[derive(Clone, Debug, PartialEq)]
pub struct ReportLine {
    /// Implementation which produced the score
    pub source: Source,
    /// Negative log marginal likelihood
    pub nlml: f64,
}

impl fmt::Display for ReportLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = format!("{} NLML:", self.source.label());
        write!(f, "{:<width$}{:.4}", label, self.nlml, width = LABEL_WIDTH)
    }
}

/// Likelihood comparison: the custom engine first, then enabled comparison libraries
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Report {
    /// Report lines in display order
    pub lines: Vec<ReportLine>,
}

impl Report {
    /// Builds the report from loaded data
    pub fn new(data: &ComparisonData) -> Self {
        let mut lines = vec![ReportLine {
            source: Source::CppGPs,
            nlml: data.nlml,
        }];
        lines.extend(data.references.iter().map(|r| ReportLine {
            source: r.source,
            nlml: r.nlml,
        }));
        Report { lines }
    }

    /// Writes the report on stdout
    pub fn print(&self) {
        println!("\n{self}\n");
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                // blank line between implementations
                write!(f, "\n\n")?;
            }
            write!(f, "{line}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_format() {
        let line = ReportLine {
            source: Source::CppGPs,
            nlml: 3.1415,
        };
        assert_eq!(line.to_string(), "CppGPs NLML:        3.1415");

        let line = ReportLine {
            source: Source::SciKitLearn,
            nlml: 12.34567,
        };
        assert_eq!(line.to_string(), "SciKit Learn NLML:  12.3457");

        let line = ReportLine {
            source: Source::GPyTorch,
            nlml: -2.5,
        };
        assert_eq!(line.to_string(), "GPyTorch NLML:      -2.5000");
    }

    #[test]
    fn test_report_display() {
        let report = Report {
            lines: vec![
                ReportLine {
                    source: Source::CppGPs,
                    nlml: 1.0,
                },
                ReportLine {
                    source: Source::GPyTorch,
                    nlml: 2.0,
                },
            ],
        };
        assert_eq!(
            report.to_string(),
            "CppGPs NLML:        1.0000\n\nGPyTorch NLML:      2.0000"
        );
    }
}
