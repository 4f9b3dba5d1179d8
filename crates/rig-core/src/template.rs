use std::collections::BTreeMap;

/// Fill every `{key}` occurrence in a message template from the
/// substitution map. Unknown keys stay verbatim in the output.
///
/// Single pass over the template; substituted values are never re-scanned.
pub fn render(template: &str, substitutions: &BTreeMap<String, String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];
        match tail.find('}') {
            Some(close) => {
                let key = &tail[1..close];
                match substitutions.get(key) {
                    Some(value) => out.push_str(value),
                    None => out.push_str(&tail[..=close]),
                }
                rest = &tail[close + 1..];
            }
            None => {
                out.push_str(tail);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}
