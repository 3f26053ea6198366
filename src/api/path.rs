use crate::error::{Error, Result};

use super::params::Params;

/// Resolves `:name` placeholders in a path template.
///
/// Placeholders are runs of ASCII lowercase letters introduced by `:`,
/// matched in first-occurrence order. Each is substituted from the
/// same-named key in `params`; consumed keys are removed from the returned
/// parameter set so they are not sent again as query or body parameters.
/// Repeated identical placeholders all substitute from the same parameter.
///
/// An unsatisfied placeholder fails with [`Error::MissingParameter`] before
/// any request is made.
pub fn resolve_path(template: &str, params: &Params) -> Result<(String, Params)> {
    let mut resolved = String::with_capacity(template.len());
    let mut remaining = params.clone();
    let mut rest = template;

    while let Some(pos) = rest.find(':') {
        resolved.push_str(&rest[..pos]);
        let tail = &rest[pos + 1..];
        let name_len = tail.chars().take_while(char::is_ascii_lowercase).count();
        if name_len == 0 {
            // a lone ':' is literal, not a placeholder
            resolved.push(':');
            rest = tail;
            continue;
        }

        let name = &tail[..name_len];
        match params.get(name) {
            Some(value) => {
                resolved.push_str(value);
                remaining.remove(name);
            }
            None => {
                return Err(Error::MissingParameter {
                    name: name.to_string(),
                    template: template.to_string(),
                });
            }
        }
        rest = &tail[name_len..];
    }

    resolved.push_str(rest);
    Ok((resolved, remaining))
}
