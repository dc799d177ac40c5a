use scraper::{ElementRef, Html};

/// What to do with tags that have no Markdown form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnknownTags {
    /// Remove the tag together with everything inside it
    Drop,
    /// Remove the tag, convert what is inside it
    Bypass,
}

#[derive(Debug, Clone)]
pub struct ConvertOptions {
    pub unknown_tags: UnknownTags,
    /// Allow GFM-only constructs (tables, strikethrough). When off those
    /// tags are unwrapped and only their text survives.
    pub github_flavored: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            unknown_tags: UnknownTags::Drop,
            github_flavored: true,
        }
    }
}

pub trait HtmlConverter {
    fn convert(&self, html: &str, options: &ConvertOptions) -> String;
}

/// Tags with a plain Markdown rendering
const MARKDOWN_TAGS: &[&str] = &[
    "a", "article", "aside", "b", "blockquote", "br", "code", "div", "em", "figcaption",
    "figure", "h1", "h2", "h3", "h4", "h5", "h6", "hr", "i", "img", "li", "ol", "p", "pre",
    "span", "strong", "tt", "ul",
];

/// Tags that only have a GitHub-flavored rendering
const GFM_TAGS: &[&str] = &[
    "del", "s", "strike", "table", "tbody", "td", "tfoot", "th", "thead", "tr",
];

const VOID_TAGS: &[&str] = &["br", "hr", "img"];

/// Converter backed by `html2md`. Unknown tags are filtered out before
/// `html2md` sees the markup, since it would otherwise keep their text.
#[derive(Debug, Default, Clone, Copy)]
pub struct Html2Md;

impl HtmlConverter for Html2Md {
    fn convert(&self, html: &str, options: &ConvertOptions) -> String {
        html2md::parse_html(&filter_html(html, options))
    }
}

enum Keep {
    Tag,
    Contents,
    Nothing,
}

fn classify(name: &str, options: &ConvertOptions) -> Keep {
    if MARKDOWN_TAGS.contains(&name) {
        return Keep::Tag;
    }
    if GFM_TAGS.contains(&name) {
        return if options.github_flavored { Keep::Tag } else { Keep::Contents };
    }
    match options.unknown_tags {
        UnknownTags::Drop => Keep::Nothing,
        UnknownTags::Bypass => Keep::Contents,
    }
}

/// Re-serialize `html` keeping only what the options allow
pub fn filter_html(html: &str, options: &ConvertOptions) -> String {
    let fragment = Html::parse_fragment(html);
    let mut out = String::with_capacity(html.len());
    write_children(fragment.root_element(), options, &mut out);
    out
}

fn write_children(parent: ElementRef<'_>, options: &ConvertOptions, out: &mut String) {
    for child in parent.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(&htmlescape::encode_minimal(text));
        } else if let Some(element) = ElementRef::wrap(child) {
            write_element(element, options, out);
        }
        // comments and doctypes are dropped
    }
}

fn write_element(element: ElementRef<'_>, options: &ConvertOptions, out: &mut String) {
    let name = element.value().name();
    match classify(name, options) {
        Keep::Nothing => {}
        Keep::Contents => write_children(element, options, out),
        Keep::Tag => {
            out.push('<');
            out.push_str(name);
            for (key, value) in element.value().attrs() {
                out.push_str(&format!(" {}=\"{}\"", key, htmlescape::encode_minimal(value)));
            }
            out.push('>');
            if VOID_TAGS.contains(&name) {
                return;
            }
            write_children(element, options, out);
            out.push_str(&format!("</{}>", name));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bypass() -> ConvertOptions {
        ConvertOptions {
            unknown_tags: UnknownTags::Bypass,
            ..Default::default()
        }
    }

    #[test]
    fn test_default_options() {
        let options = ConvertOptions::default();
        assert_eq!(options.unknown_tags, UnknownTags::Drop);
        assert!(options.github_flavored);
    }

    #[test]
    fn test_converts_basic_markup() {
        let md = Html2Md.convert(
            "<p>Hello <strong>world</strong></p>",
            &ConvertOptions::default(),
        );
        assert!(md.contains("Hello"));
        assert!(md.contains("**world**"));
        assert!(!md.contains("<p>"));
    }

    #[test]
    fn test_unknown_tags_dropped_with_content() {
        let options = ConvertOptions::default();

        let md = Html2Md.convert("<script>alert(1)</script><p>x</p>", &options);
        assert!(md.contains('x'));
        assert!(!md.contains("alert"));

        let md = Html2Md.convert("<blink>gone</blink><p>kept</p>", &options);
        assert!(md.contains("kept"));
        assert!(!md.contains("gone"));
    }

    #[test]
    fn test_filter_drops_unknown_subtrees() {
        let options = ConvertOptions::default();
        assert_eq!(
            filter_html("<p>a<blink>b</blink></p><script>x</script>", &options),
            "<p>a</p>"
        );
        assert_eq!(
            filter_html("<custom><p>inner</p></custom><p>outer</p>", &options),
            "<p>outer</p>"
        );
        assert_eq!(filter_html("<style>p { color: red }</style>", &options), "");
    }

    #[test]
    fn test_bypass_keeps_contents() {
        assert_eq!(filter_html("<p>a<blink>b</blink></p>", &bypass()), "<p>ab</p>");

        let md = Html2Md.convert("<blink>still here</blink>", &bypass());
        assert!(md.contains("still here"));
    }

    #[test]
    fn test_filter_keeps_attributes_and_void_tags() {
        let options = ConvertOptions::default();
        assert_eq!(
            filter_html(r#"<p>a<br>b</p><img src="x.png" alt="pic">"#, &options),
            r#"<p>a<br>b</p><img src="x.png" alt="pic">"#
        );

        let md = Html2Md.convert(r#"<a href="https://example.com/post">link</a>"#, &options);
        assert!(md.contains("[link](https://example.com/post)"));
    }

    #[test]
    fn test_text_is_escaped_again() {
        let options = ConvertOptions::default();
        assert_eq!(
            filter_html("<p>1 &lt; 2 &amp; 3</p>", &options),
            "<p>1 &lt; 2 &amp; 3</p>"
        );
    }

    #[test]
    fn test_github_flavored_toggle() {
        let gfm = ConvertOptions::default();
        assert_eq!(filter_html("<del>old</del>", &gfm), "<del>old</del>");

        let plain = ConvertOptions {
            github_flavored: false,
            ..Default::default()
        };
        assert_eq!(filter_html("<p><del>old</del> new</p>", &plain), "<p>old new</p>");
        let md = Html2Md.convert("<del>old</del>", &plain);
        assert!(md.contains("old"));
        assert!(!md.contains("~~"));
    }
}
