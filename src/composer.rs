//! Turns user code plus optional jargon into the source that gets submitted.

use crate::error::TemplateError;
use crate::jargon::{JargonTemplate, PLACEHOLDER};

/// Returns `code` unchanged without a template, otherwise the template with
/// its placeholder replaced by `code` verbatim.
pub fn compose(code: &str, template: Option<&JargonTemplate>) -> Result<String, TemplateError> {
    let Some(template) = template else {
        return Ok(code.to_string());
    };
    if code.contains(PLACEHOLDER) {
        return Err(TemplateError::PlaceholderCollision);
    }
    let source = template.text.replacen(PLACEHOLDER, code, 1);
    // code can complete a partial token sitting next to the placeholder
    if source.contains(PLACEHOLDER) {
        return Err(TemplateError::PlaceholderCollision);
    }
    Ok(source)
}

/// False when the code already contains the template's jargon key.
pub fn needs_wrapping(code: &str, template: &JargonTemplate) -> bool {
    match template.key.as_deref() {
        Some(key) => !code.contains(key),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tpl(text: &str, key: Option<&str>) -> JargonTemplate {
        JargonTemplate::new("t", text, key.map(str::to_string)).unwrap()
    }

    #[test]
    fn raw_mode_is_identity() {
        let code = "print(1)\nprint(2)";
        assert_eq!(compose(code, None).unwrap(), code);
    }

    #[test]
    fn substitutes_the_placeholder() {
        let t = tpl("System.Console.WriteLine(INSERT_HERE);", None);
        assert_eq!(
            compose("\"hello world\"", Some(&t)).unwrap(),
            "System.Console.WriteLine(\"hello world\");"
        );
    }

    #[test]
    fn output_has_code_once_and_no_placeholder() {
        let templates = [
            tpl("INSERT_HERE", None),
            tpl("int main() {\n    INSERT_HERE\n}", None),
            tpl("a INSERT_HERE b", None),
        ];
        let snippets = ["x", "puts(\"$&\");", "", "line1\nline2", "INSERT_HER"];
        for t in &templates {
            for c in snippets.iter().filter(|c| !c.is_empty()) {
                let out = compose(c, Some(t)).unwrap();
                assert!(!out.contains(PLACEHOLDER), "{out}");
                assert_eq!(out.matches(*c).count(), 1, "{out}");
            }
        }
    }

    #[test]
    fn code_with_placeholder_is_rejected() {
        let t = tpl("{INSERT_HERE}", None);
        assert_eq!(
            compose("say INSERT_HERE", Some(&t)),
            Err(TemplateError::PlaceholderCollision)
        );
        assert_eq!(compose("say INSERT_HERE", None).unwrap(), "say INSERT_HERE");
    }

    #[test]
    fn code_cannot_rebuild_the_placeholder_from_template_text() {
        let t = tpl("print(INSERT_HEREE)", None);
        assert_eq!(compose("INSERT_HER", Some(&t)), Err(TemplateError::PlaceholderCollision));
        let t = tpl("INSERT_HERE_HERE", None);
        assert_eq!(compose("INSERT", Some(&t)), Err(TemplateError::PlaceholderCollision));
    }

    #[test]
    fn jargon_key_marks_complete_programs() {
        let t = tpl("fn main() { INSERT_HERE }", Some("fn main("));
        assert!(needs_wrapping("println!(\"hi\");", &t));
        assert!(!needs_wrapping("fn main() {}", &t));
        assert!(needs_wrapping("anything", &tpl("INSERT_HERE", None)));
    }
}
