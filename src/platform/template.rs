//! `${name}` substitution for url templates.

/// Replaces every `${name}` token for which `lookup` returns a value.
///
/// Tokens that `lookup` doesn't know, and an unclosed `${`, are kept verbatim.
pub(crate) fn substitute<F>(template: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut result = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '$' || chars.peek() != Some(&'{') {
            result.push(ch);
            continue;
        }
        chars.next(); // consume '{'

        match consume_until(&mut chars, '}') {
            Ok(name) => match lookup(&name) {
                Some(value) => result.push_str(&value),
                None => {
                    result.push_str("${");
                    result.push_str(&name);
                    result.push('}');
                }
            },
            Err(rest) => {
                result.push_str("${");
                result.push_str(&rest);
            }
        }
    }

    result
}

/// Consumes characters until the delimiter, returning the collected string.
/// If the delimiter never appears, returns everything consumed as the error.
fn consume_until(
    chars: &mut std::iter::Peekable<std::str::Chars>,
    delim: char,
) -> Result<String, String> {
    let mut result = String::new();
    for ch in chars.by_ref() {
        if ch == delim {
            return Ok(result);
        }
        result.push(ch);
    }
    Err(result)
}
