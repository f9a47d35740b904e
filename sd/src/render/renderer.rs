//! Token substitution

use regex::{Captures, Regex};
use serde::Serialize;
use tracing::{debug, info};

use super::mode::RenderMode;
use crate::domain::VariableDictionary;
use crate::error::DocumentError;

/// `{{`, a key with no braces, `}}`. The key is trimmed before lookup.
///
/// Keys cannot contain `{`, so a stray `{{` earlier in the markup never
/// swallows the token after it.
pub const TOKEN_PATTERN: &str = r"\{\{([^{}]+)\}\}";

const MISSING_STYLE: &str = "background-color: #fde68a; color: #92400e; border: 1px dashed #d97706; \
padding: 0 2px; border-radius: 2px; font-family: monospace;";

/// Escape text for an HTML body or attribute
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Inline marker for a key with no value
pub fn missing_placeholder(key: &str) -> String {
    let key = escape_html(key);
    format!(
        r#"<span class="template-var-missing" style="{}">[{}]</span>"#,
        MISSING_STYLE, key
    )
}

/// Substitutes dictionary values into authored markup
#[derive(Debug, Clone)]
pub struct Renderer {
    token: Regex,
    escape_values: bool,
}

impl Renderer {
    pub fn new() -> Result<Self, DocumentError> {
        debug!("Renderer::new: called");
        let token = Regex::new(TOKEN_PATTERN).map_err(DocumentError::render_failure)?;
        Ok(Self {
            token,
            escape_values: false,
        })
    }

    /// HTML-escape substituted values. Off by default: values are trusted
    /// data from the records layer and go in as-is.
    pub fn with_escape_values(mut self, escape_values: bool) -> Self {
        debug!(%escape_values, "Renderer::with_escape_values: called");
        self.escape_values = escape_values;
        self
    }

    pub fn escapes_values(&self) -> bool {
        self.escape_values
    }

    /// Replace every occurrence of every bound key's token, in one
    /// left-to-right pass.
    ///
    /// Substituted text is never scanned again, so a value that itself looks
    /// like `{{key}}` is emitted literally.
    pub fn render(&self, markup: &str, dict: &VariableDictionary, mode: RenderMode) -> String {
        debug!(markup_len = markup.len(), keys = dict.len(), %mode, "Renderer::render: called");
        self.token
            .replace_all(markup, |caps: &Captures| {
                let key = caps[1].trim();
                match dict.get(key) {
                    Some(value) if self.escape_values => escape_html(&value.to_string()),
                    Some(value) => value.to_string(),
                    None => match mode {
                        RenderMode::Preview => missing_placeholder(key),
                        RenderMode::Final => caps[0].to_string(),
                    },
                }
            })
            .into_owned()
    }

    /// Keys of every token in `markup`, in order of first appearance
    pub fn tokens(&self, markup: &str) -> Vec<String> {
        let mut keys: Vec<String> = Vec::new();
        for caps in self.token.captures_iter(markup) {
            let key = caps[1].trim();
            if !keys.iter().any(|k| k == key) {
                keys.push(key.to_string());
            }
        }
        keys
    }

    /// Keys referenced by `markup` that `dict` cannot resolve
    pub fn missing_keys(&self, markup: &str, dict: &VariableDictionary) -> Vec<String> {
        self.tokens(markup)
            .into_iter()
            .filter(|key| !dict.contains_key(key))
            .collect()
    }

    /// Render and report which template keys stayed unresolved
    pub fn render_document(&self, markup: &str, dict: &VariableDictionary, mode: RenderMode) -> RenderedDocument {
        debug!(%mode, "Renderer::render_document: called");
        let unresolved = self.missing_keys(markup, dict);
        if !unresolved.is_empty() {
            info!(count = unresolved.len(), %mode, "Rendered document with unresolved variables");
        }
        RenderedDocument {
            markup: self.render(markup, dict, mode),
            mode,
            unresolved,
        }
    }
}

/// Rendered markup, never stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedDocument {
    pub markup: String,
    pub mode: RenderMode,
    /// Template keys with no value, in order of first appearance
    pub unresolved: Vec<String>,
}

impl RenderedDocument {
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }

    /// The markup, or `UnresolvedVariables` if any token was left over
    pub fn require_complete(self) -> Result<String, DocumentError> {
        if self.unresolved.is_empty() {
            Ok(self.markup)
        } else {
            Err(DocumentError::UnresolvedVariables {
                tokens: self.unresolved,
            })
        }
    }
}

/// Render with a default renderer (no value escaping)
pub fn render(markup: &str, dict: &VariableDictionary, mode: RenderMode) -> Result<String, DocumentError> {
    Ok(Renderer::new()?.render(markup, dict, mode))
}

/// Keys of the tokens still present in `markup`, deduplicated
pub fn unresolved_tokens(markup: &str) -> Result<Vec<String>, DocumentError> {
    Ok(Renderer::new()?.tokens(markup))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dict(pairs: &[(&str, &str)]) -> VariableDictionary {
        pairs.iter().map(|(k, v)| (*k, *v)).collect()
    }

    fn renderer() -> Renderer {
        Renderer::new().unwrap()
    }

    #[test]
    fn test_substitutes_known_keys() {
        let d = dict(&[("pemohon.namaLengkap", "Budi"), ("tujuanPembuatan", "Melamar kerja")]);
        let out = renderer().render(
            "Nama: {{pemohon.namaLengkap}}, Tujuan: {{tujuanPembuatan}}",
            &d,
            RenderMode::Final,
        );
        assert_eq!(out, "Nama: Budi, Tujuan: Melamar kerja");
    }

    #[test]
    fn test_key_whitespace_is_trimmed() {
        let d = dict(&[("namaDesa", "Sukamaju")]);
        assert_eq!(renderer().render("{{  namaDesa \t}}", &d, RenderMode::Final), "Sukamaju");
    }

    #[test]
    fn test_keys_are_case_sensitive() {
        let d = dict(&[("namaDesa", "Sukamaju")]);
        assert_eq!(renderer().render("{{NamaDesa}}", &d, RenderMode::Final), "{{NamaDesa}}");
    }

    #[test]
    fn test_modes_diverge_on_unresolved_token() {
        let d = dict(&[("a", "1")]);
        let markup = "{{a}} {{b}}";

        let preview = renderer().render(markup, &d, RenderMode::Preview);
        let final_ = renderer().render(markup, &d, RenderMode::Final);

        assert_eq!(final_, "1 {{b}}");
        assert!(preview.starts_with("1 <span class=\"template-var-missing\""));
        assert!(preview.contains("[b]</span>"));
        assert!(!preview.contains("{{b}}"));
    }

    #[test]
    fn test_values_are_not_rescanned() {
        let d = dict(&[("a", "{{b}}"), ("b", "oops")]);
        assert_eq!(renderer().render("{{a}}", &d, RenderMode::Final), "{{b}}");
    }

    #[test]
    fn test_values_not_escaped_by_default() {
        let d = dict(&[("alamat", "<b>Jl. Mawar & Melati</b>")]);
        assert_eq!(
            renderer().render("{{alamat}}", &d, RenderMode::Final),
            "<b>Jl. Mawar & Melati</b>"
        );
    }

    #[test]
    fn test_escape_values_opt_in() {
        let d = dict(&[("alamat", "<b>Jl. Mawar & Melati</b>")]);
        let r = renderer().with_escape_values(true);
        assert!(r.escapes_values());
        assert_eq!(
            r.render("<p>{{alamat}}</p>", &d, RenderMode::Final),
            "<p>&lt;b&gt;Jl. Mawar &amp; Melati&lt;/b&gt;</p>"
        );
    }

    #[test]
    fn test_placeholder_escapes_key() {
        let out = renderer().render("{{<x>}}", &VariableDictionary::new(), RenderMode::Preview);
        assert!(out.contains("[&lt;x&gt;]"));
    }

    #[test]
    fn test_stray_open_braces_do_not_hide_tokens() {
        let d = dict(&[("namaDesa", "Sukamaju")]);
        assert_eq!(
            renderer().render("Catatan {{ lihat {{namaDesa}}", &d, RenderMode::Final),
            "Catatan {{ lihat Sukamaju"
        );
        assert_eq!(renderer().render("{{{namaDesa}}}", &d, RenderMode::Final), "{Sukamaju}");
        assert_eq!(
            renderer().render("{{{{namaDesa}} {{ x {{namaDesa }}", &d, RenderMode::Preview),
            "{{Sukamaju {{ x Sukamaju"
        );
    }

    #[test]
    fn test_stray_open_braces_around_missing_token() {
        let out = renderer().render("{{ catatan {{kodeArsip}}", &VariableDictionary::new(), RenderMode::Preview);
        assert!(out.starts_with("{{ catatan <span class=\"template-var-missing\""));
        assert!(out.contains("[kodeArsip]"));
        assert_eq!(unresolved_tokens("{{ catatan {{kodeArsip}}").unwrap(), vec!["kodeArsip"]);
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let d = dict(&[("a", "1")]);
        let markup = "{{a}} {{b}} {{{a}}}";
        assert_eq!(
            renderer().render(markup, &d, RenderMode::Preview),
            renderer().render(markup, &d, RenderMode::Preview)
        );
    }

    #[test]
    fn test_lone_braces_untouched() {
        let markup = "body { margin: 0; } {{}} { {a} }";
        assert_eq!(
            renderer().render(markup, &VariableDictionary::new(), RenderMode::Preview),
            markup
        );
    }

    #[test]
    fn test_number_values_display() {
        let mut d = VariableDictionary::new();
        d.insert("anakKe", 2.0);
        d.insert("berat", 3.25);
        assert_eq!(
            renderer().render("{{anakKe}}/{{berat}}", &d, RenderMode::Final),
            "2/3.25"
        );
    }

    #[test]
    fn test_tokens_in_first_appearance_order() {
        let keys = unresolved_tokens("{{b}} {{a}} {{ b }} {{c}}").unwrap();
        assert_eq!(keys, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_render_document_reports_unresolved() {
        let d = dict(&[("a", "1")]);
        let doc = renderer().render_document("{{a}} {{b}} {{c}} {{b}}", &d, RenderMode::Final);
        assert_eq!(doc.unresolved, vec!["b", "c"]);
        assert!(!doc.is_complete());

        match doc.require_complete() {
            Err(DocumentError::UnresolvedVariables { tokens }) => assert_eq!(tokens, vec!["b", "c"]),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_render_document_complete() {
        let d = dict(&[("a", "1")]);
        let doc = renderer().render_document("<p>{{a}}</p>", &d, RenderMode::Final);
        assert_eq!(doc.require_complete().unwrap(), "<p>1</p>");
    }

    #[test]
    fn test_free_render() {
        let d = dict(&[("a", "x")]);
        assert_eq!(render("[{{a}}]", &d, RenderMode::Preview).unwrap(), "[x]");
    }
}
