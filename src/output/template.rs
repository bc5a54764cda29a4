use crate::error::ExportError;

use super::{Benchmark, human_duration};

/// Renders a user-provided summary template.
///
/// Placeholders are written as `{name}`; a doubled brace (`{{` or `}}`)
/// emits a literal brace. Supported names: `url`, `method`, `length`,
/// `success`, `fail`, `duration`, `min`, `max`, `mean`, `concurrency`,
/// `requests`.
///
/// # Errors
///
/// Returns [`ExportError::Template`] on unknown placeholders or unbalanced
/// braces.
pub fn render_template(template: &str, benchmark: &Benchmark) -> Result<String, ExportError> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '{' => {
                if chars.peek() == Some(&'{') {
                    chars.next();
                    out.push('{');
                    continue;
                }
                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some(inner) => name.push(inner),
                        None => {
                            return Err(ExportError::Template {
                                reason: format!("unclosed placeholder '{{{name}'"),
                            });
                        }
                    }
                }
                out.push_str(&resolve(name.trim(), benchmark)?);
            }
            '}' => {
                if chars.peek() == Some(&'}') {
                    chars.next();
                    out.push('}');
                } else {
                    return Err(ExportError::Template {
                        reason: "unmatched '}'".to_owned(),
                    });
                }
            }
            other => out.push(other),
        }
    }
    Ok(out)
}

fn resolve(name: &str, benchmark: &Benchmark) -> Result<String, ExportError> {
    let report = &benchmark.report;
    let config = &benchmark.metadata.config;
    let value = match name {
        "url" => config.request.url.clone(),
        "method" => config.request.method.clone(),
        "length" => report.length.to_string(),
        "success" => report.success.to_string(),
        "fail" => report.fail.to_string(),
        "duration" => human_duration(report.duration),
        "min" => human_duration(report.stats().min),
        "max" => human_duration(report.stats().max),
        "mean" => human_duration(report.stats().mean),
        "concurrency" => config.runner.concurrency.to_string(),
        "requests" => config.runner.requests.to_string(),
        _ => {
            return Err(ExportError::Template {
                reason: format!("unknown placeholder '{name}'"),
            });
        }
    };
    Ok(value)
}
