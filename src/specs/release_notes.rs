// src/specs/release_notes.rs
//
// Release-notes page: a run of version headings ("n8n@1.2.0"), each followed
// by free-form body content up to the next version heading.
//
// Document order is newest first. Output keeps that order.

use chrono::{DateTime, Utc};
use scraper::{ElementRef, Node, Selector};

use crate::config::consts::{HEADING_SELECTOR, VERSION_MARKER};
use crate::config::options::SourceOptions;
use crate::core::html::{self, element_text, is_list, list_items};
use crate::core::sanitize::normalize_version;
use crate::error::ConfigError;
use crate::release::Release;

/// List items come out as "• <text>".
pub const BULLET: &str = "• ";

pub struct ReleaseNotesSpec {
    heading: Selector,
    marker: String,
}

impl ReleaseNotesSpec {
    pub fn new(heading: &str, marker: &str) -> Result<Self, ConfigError> {
        Ok(Self { heading: html::selector(heading)?, marker: s!(marker) })
    }

    pub fn from_options(opts: &SourceOptions) -> Result<Self, ConfigError> {
        Self::new(&opts.heading, &opts.marker)
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Extract up to `limit` releases, newest first. Empty when no version
    /// headings are found or the markup makes no sense.
    pub fn extract(&self, doc: &str, limit: Option<usize>) -> Vec<Release> {
        self.extract_at(doc, limit, Utc::now())
    }

    /// Same as `extract`, with the pass timestamp supplied by the caller.
    pub fn extract_at(
        &self,
        doc: &str,
        limit: Option<usize>,
        scraped_at: DateTime<Utc>,
    ) -> Vec<Release> {
        let t = std::time::Instant::now();
        let document = html::parse(doc);

        // Boundaries: every heading holding the marker, in document order.
        // One whose version comes out empty still ends the section before it.
        let bounds: Vec<(ElementRef<'_>, String)> = document
            .select(&self.heading)
            .filter_map(|h| {
                let text = element_text(h);
                text.contains(&self.marker)
                    .then(|| (h, normalize_version(&text, &self.marker)))
            })
            .collect();

        if bounds.is_empty() {
            logd!("No {:?} headings in {} bytes of markup", self.marker, doc.len());
            return Vec::new();
        }

        // Limit before reading any body content. The boundary after the
        // last kept section still ends it. Versionless sections don't count.
        let take = limit.unwrap_or(bounds.len());

        let mut out = Vec::with_capacity(take.min(bounds.len()));
        for (i, (heading, version)) in bounds.iter().enumerate() {
            if out.len() >= take { break; }
            if version.is_empty() {
                logd!("Skipping heading without version: {:?}", element_text(*heading).trim());
                continue;
            }
            let next = bounds.get(i + 1).map(|(h, _)| *h);
            let fragments = self.section_fragments(*heading, next);
            out.push(Release::new(version.clone(), fragments, scraped_at));
        }

        logd!(
            "Extracted {} of {} release(s) in {:?}",
            out.len(), bounds.len(), t.elapsed()
        );
        out
    }

    /// Walk siblings after `heading` until `next` (or anything holding it),
    /// or the end of the enclosing block.
    fn section_fragments(&self, heading: ElementRef<'_>, next: Option<ElementRef<'_>>) -> Vec<String> {
        let stop = next.map(|n| n.id());
        let mut fragments = Vec::new();

        for node in heading.next_siblings() {
            if let Some(stop) = stop {
                if node.id() == stop || node.descendants().any(|d| d.id() == stop) {
                    break;
                }
            }

            match node.value() {
                Node::Element(_) => {
                    let Some(el) = ElementRef::wrap(node) else { continue };
                    if is_list(el) {
                        for li in list_items(el) {
                            let item = element_text(li);
                            let item = item.trim();
                            if !item.is_empty() {
                                fragments.push(join!(BULLET, item));
                            }
                        }
                    } else {
                        self.push_text(&mut fragments, &element_text(el));
                    }
                }
                Node::Text(t) => self.push_text(&mut fragments, t),
                _ => {}
            }
        }
        fragments
    }

    // Body text that names a version is a heading leaking into the body; skip it.
    fn push_text(&self, fragments: &mut Vec<String>, text: &str) {
        let text = text.trim();
        if text.is_empty() || text.contains(&self.marker) { return; }
        fragments.push(s!(text));
    }
}

/// Parse with the stock n8n page shape.
pub fn parse_doc(doc: &str, limit: Option<usize>) -> Result<Vec<Release>, ConfigError> {
    Ok(ReleaseNotesSpec::new(HEADING_SELECTOR, VERSION_MARKER)?.extract(doc, limit))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> ReleaseNotesSpec {
        ReleaseNotesSpec::new(HEADING_SELECTOR, VERSION_MARKER).unwrap()
    }

    const PAGE: &str = r##"
        <html><head><title>Release notes | n8n Docs</title></head>
        <body>
          <article class="md-content__inner">
            <h1>Release notes</h1>
            <p>New features and bug fixes for n8n.</p>
            <h2 id="n8n1920">n8n@1.92.0<a class="headerlink" href="#n8n1920">#</a></h2>
            <p>View the <a href="https://github.com/n8n-io/n8n/compare/n8n@1.91.0...n8n@1.92.0">commits</a> for this version.<br><strong>Release date:</strong> 2025-05-05</p>
            <p>This release contains new features and bug fixes.</p>
            <p>Upgrading from n8n@1.91.0 needs no migration.</p>
            <ul>
              <li>Added a <code>Think</code> tool for AI agents.</li>
              <li>Fixed expression editor <ul><li>nested detail</li></ul></li>
            </ul>
            <h2 id="n8n1910">n8n@1.91.0<a class="headerlink" href="#n8n1910">#</a></h2>
            <p><strong>Release date:</strong> 2025-04-28</p>
            <p>This release contains bug fixes.</p>
            <h2 id="n8n1900">n8n@1.90.0<a class="headerlink" href="#n8n1900">#</a></h2>
            <p>Older release body.</p>
          </article>
        </body></html>
    "##;

    #[test]
    fn finds_sections_in_document_order() {
        let out = spec().extract(PAGE, None);
        let versions: Vec<&str> = out.iter().map(|r| r.version.as_str()).collect();
        assert_eq!(versions, vec!["1.92.0", "1.91.0", "1.90.0"]);
    }

    #[test]
    fn section_body_stops_at_next_heading() {
        let out = spec().extract(PAGE, Some(1));
        assert_eq!(out.len(), 1);
        let r = &out[0];
        assert_eq!(r.version, "1.92.0");
        // the upgrade paragraph names a version, so the guard drops it
        assert_eq!(r.content, vec![
            "View the commits for this version.Release date: 2025-05-05",
            "This release contains new features and bug fixes.",
            "• Added a Think tool for AI agents.",
            "• Fixed expression editor nested detail",
        ]);
        assert!(!r.content.iter().any(|c| c.contains("2025-04-28")));
    }

    #[test]
    fn later_sections_read_their_own_bodies() {
        let out = spec().extract(PAGE, None);
        assert_eq!(out[1].content, vec!["Release date: 2025-04-28", "This release contains bug fixes."]);
        assert_eq!(out[2].content, vec!["Older release body."]);
    }

    #[test]
    fn limit_bounds_output_and_reading() {
        let out = spec().extract(PAGE, Some(2));
        assert_eq!(out.len(), 2);
        assert_eq!(out[1].version, "1.91.0");
        assert!(!out.iter().flat_map(|r| &r.content).any(|c| c.contains("Older release body")));

        // limit above the heading count is just "all"
        assert_eq!(spec().extract(PAGE, Some(10)).len(), 3);
        assert!(spec().extract(PAGE, Some(0)).is_empty());
    }

    #[test]
    fn no_version_headings_is_empty_not_error() {
        let doc = "<html><body><h2>Changelog</h2><p>Nothing here.</p></body></html>";
        assert!(spec().extract(doc, None).is_empty());
        assert!(spec().extract("", None).is_empty());
        assert!(spec().extract("<<<>>> not html at all", Some(1)).is_empty());
    }

    #[test]
    fn repeated_text_is_kept_once() {
        let doc = r#"
            <h2>n8n@2.0.0</h2>
            <p>Same line twice.</p>
            <div><p>Same line twice.</p></div>
            <ul><li>item</li><li>item</li></ul>
            <h2>n8n@1.0.0</h2>
        "#;
        let out = spec().extract(doc, None);
        assert_eq!(out[0].content, vec!["Same line twice.", "• item"]);
        assert!(out[1].content.is_empty());
    }

    #[test]
    fn bare_text_between_elements_counts() {
        let doc = "<div><h2>n8n@3.1.0</h2>loose text<p>para</p><!-- note --></div>";
        let out = spec().extract(doc, None);
        assert_eq!(out[0].content, vec!["loose text", "para"]);
    }

    #[test]
    fn stock_parse_doc_matches_default_shape() {
        let out = parse_doc(PAGE, Some(1)).unwrap();
        assert_eq!(out[0].version, "1.92.0");
    }

    #[test]
    fn one_timestamp_per_pass() {
        let now = Utc::now();
        let out = spec().extract_at(PAGE, None, now);
        assert!(out.iter().all(|r| r.scraped_at == now));
    }

    #[test]
    fn custom_marker_and_heading() {
        let doc = "<h3>app@v9</h3><p>body</p><h3>app@v8</h3><p>old</p>";
        let spec = ReleaseNotesSpec::new("h3", "app@").unwrap();
        let out = spec.extract(doc, Some(1));
        assert_eq!(out[0].version, "v9");
        assert_eq!(out[0].content, vec!["body"]);
    }

    #[test]
    fn next_heading_nested_in_sibling_ends_section() {
        let doc = r#"
            <section><h2>n8n@1.1.0</h2><p>one</p>
              <div class="wrap"><p>before</p><h2>n8n@1.0.0</h2><p>zero</p></div>
            </section>
        "#;
        let out = spec().extract(doc, None);
        assert_eq!(out[0].content, vec!["one"]);
        assert_eq!(out[1].content, vec!["zero"]);
    }

    #[test]
    fn versionless_marker_heading_still_ends_a_section() {
        let doc = "<h2>n8n@1.1.0</h2><p>one</p><h2>n8n@</h2><p>orphan body</p>\
                   <h2>n8n@1.0.0</h2><p>zero</p>";
        let out = spec().extract(doc, Some(1));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].content, vec!["one"]);

        // the empty one is not a release and doesn't use up the limit
        let out = spec().extract(doc, Some(2));
        let versions: Vec<&str> = out.iter().map(|r| r.version.as_str()).collect();
        assert_eq!(versions, vec!["1.1.0", "1.0.0"]);
        assert_eq!(out[1].content, vec!["zero"]);
        assert!(!out.iter().flat_map(|r| &r.content).any(|c| c.contains("orphan")));

        assert!(spec().extract("<h2>n8n@ #</h2><p>body</p>", None).is_empty());
    }
}
