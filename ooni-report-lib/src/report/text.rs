use std::fmt;

use crate::config::{OutputConfig, OutputFormat};

use super::summary::{HttpEntry, Summary};

fn failure_line(f: &mut fmt::Formatter<'_>, label: &str, failure: &Option<String>) -> fmt::Result {
    match failure {
        Some(failure) => writeln!(f, "  {label:<16} ✗ {failure}"),
        None => writeln!(f, "  {label:<16} ✓ null"),
    }
}

fn http_entry(f: &mut fmt::Formatter<'_>, entry: &HttpEntry) -> fmt::Result {
    writeln!(f, "  {} {}", entry.method, entry.url)?;
    if let Some(code) = entry.status_code {
        writeln!(f, "  Response: {code}")?;
    } else {
        writeln!(f, "  Response")?;
    }
    let headers = serde_json::to_string_pretty(&entry.headers).map_err(|_| fmt::Error)?;
    for line in headers.lines() {
        writeln!(f, "    {line}")?;
    }
    if let Some(body) = &entry.body {
        writeln!(f, "  Body{}:", if entry.body_truncated { " (truncated)" } else { "" })?;
        for line in body.lines() {
            writeln!(f, "    {line}")?;
        }
    }
    Ok(())
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.input.as_deref().unwrap_or("(no input)"))?;
        match self.classification.status {
            Some(status) => writeln!(f, "{} [{}] {}", self.reachability, status, self.summary_text)?,
            None => writeln!(f, "{} {}", self.reachability, self.summary_text)?,
        }
        if let Some(report_id) = &self.report_id {
            writeln!(f, "report: {report_id}")?;
        }

        writeln!(f)?;
        writeln!(f, "Failures")?;
        failure_line(f, "HTTP Experiment", &self.failures.http_experiment)?;
        failure_line(f, "DNS Experiment", &self.failures.dns_experiment)?;
        failure_line(f, "Control", &self.failures.control)?;

        writeln!(f)?;
        writeln!(f, "DNS Queries")?;
        writeln!(f, "  Resolver: {}", self.resolver)?;
        for query in &self.dns {
            write!(f, "  {} IN {}", query.hostname, query.query_type)?;
            match &query.engine {
                Some(engine) => writeln!(f, " engine: {engine}")?,
                None => writeln!(f)?,
            }
            if let Some(failure) = &query.failure {
                writeln!(f, "    ✗ {failure}")?;
            }
            for answer in &query.answers {
                writeln!(f, "    {answer}")?;
            }
        }

        writeln!(f)?;
        writeln!(f, "TCP Connections")?;
        if self.tcp.is_empty() {
            writeln!(f, "  No results")?;
        }
        for connection in &self.tcp {
            writeln!(
                f,
                "  Connection to {} was {}.",
                connection.destination,
                connection.state.as_str()
            )?;
        }

        writeln!(f)?;
        writeln!(f, "HTTP Requests")?;
        for entry in &self.http {
            http_entry(f, entry)?;
        }
        Ok(())
    }
}

impl Summary {
    pub fn render_text(&self) -> String {
        self.to_string()
    }

    /// Render in the configured output format. JSON output ends with a newline.
    pub fn render(&self, output: &OutputConfig) -> serde_json::Result<String> {
        match output.format {
            OutputFormat::Text => Ok(self.render_text()),
            OutputFormat::Json if output.pretty => {
                serde_json::to_string_pretty(self).map(|s| s + "\n")
            }
            OutputFormat::Json => serde_json::to_string(self).map(|s| s + "\n"),
        }
    }
}
