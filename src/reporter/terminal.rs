use crate::reporter::Reporter;
use crate::rules::{Finding, RunReport, Status};
use colored::Colorize;

pub struct TerminalReporter {
    /// Also list passing findings.
    verbose: bool,
}

impl TerminalReporter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    fn status_label(&self, status: Status) -> colored::ColoredString {
        let label = format!("[{}]", status);
        match status {
            Status::Fail => label.red().bold(),
            Status::Warn => label.yellow().bold(),
            Status::Unknown => label.magenta(),
            Status::Ok => label.green(),
        }
    }

    fn format_finding(&self, finding: &Finding) -> String {
        let location = match finding.resource {
            Some(ref resource) => format!("{} {}", finding.region, resource),
            None => finding.region.clone(),
        };
        format!(
            "  {} {}: {}\n",
            self.status_label(finding.status),
            location.dimmed(),
            finding.message
        )
    }
}

impl Reporter for TerminalReporter {
    fn report(&self, report: &RunReport) -> String {
        let mut output = String::new();

        for rule in &report.rules {
            output.push_str(&format!("{}\n", rule.rule.bold()));

            let shown: Vec<&Finding> = rule
                .findings
                .iter()
                .filter(|f| self.verbose || !f.status.is_ok())
                .collect();
            if shown.is_empty() {
                output.push_str(&format!("  {}\n", "no issues found".green()));
            }
            for finding in shown {
                output.push_str(&self.format_finding(finding));
            }
            output.push('\n');
        }

        let summary = &report.summary;
        let verdict = if summary.passed {
            "PASSED".green().bold()
        } else {
            "FAILED".red().bold()
        };
        output.push_str(&format!(
            "{}: {} ok, {} fail, {} warn, {} unknown\n",
            verdict, summary.ok, summary.fail, summary.warn, summary.unknown
        ));

        output
    }
}
