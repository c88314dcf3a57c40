use scraper::{ElementRef, Html};

use crate::tree::DocumentTree;

pub struct HtmlDocument {
    html: Html,
}

impl HtmlDocument {
    #[must_use]
    pub fn parse(body: &str) -> Self {
        let html = Html::parse_document(body);
        if !html.errors.is_empty() {
            tracing::debug!(
                errors = html.errors.len(),
                "tolerated markup errors while parsing page"
            );
        }
        Self { html }
    }
}

impl DocumentTree for HtmlDocument {
    type Node<'a> = ElementRef<'a>;

    fn find_by_id<'a>(&'a self, id: &str) -> Option<ElementRef<'a>> {
        self.html
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .find(|element| element.value().id() == Some(id))
    }

    fn parent<'a>(&'a self, node: ElementRef<'a>) -> Option<ElementRef<'a>> {
        node.parent().and_then(ElementRef::wrap)
    }

    fn next_sibling<'a>(&'a self, node: ElementRef<'a>) -> Option<ElementRef<'a>> {
        node.next_siblings().find_map(ElementRef::wrap)
    }

    fn children<'a>(&'a self, node: ElementRef<'a>) -> Vec<ElementRef<'a>> {
        node.children().filter_map(ElementRef::wrap).collect()
    }

    fn descendants_by_tag<'a>(&'a self, node: ElementRef<'a>, tag: &str) -> Vec<ElementRef<'a>> {
        node.descendants()
            .skip(1)
            .filter_map(ElementRef::wrap)
            .filter(|element| element.value().name() == tag)
            .collect()
    }

    fn tag_name<'a>(&'a self, node: ElementRef<'a>) -> &'a str {
        node.value().name()
    }

    fn attr<'a>(&'a self, node: ElementRef<'a>, name: &str) -> Option<&'a str> {
        node.value().attr(name)
    }

    fn text<'a>(&'a self, node: ElementRef<'a>) -> String {
        node.text().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::HtmlDocument;
    use crate::tree::DocumentTree;

    const PAGE: &str = r#"
        <html><body>
          <h2><span id="anchor">Anchor</span></h2>
          <p>intro</p>
          <table><tr><th rowspan="2">Kopf</th><td>ich <b>gehe</b></td></tr></table>
          <div><table><tr><td>nested</td></tr></table></div>
        </body></html>
    "#;

    #[test]
    fn finds_anchor_and_walks_element_siblings() {
        let doc = HtmlDocument::parse(PAGE);
        let anchor = doc.find_by_id("anchor").expect("anchor should exist");
        assert_eq!(doc.tag_name(anchor), "span");

        let heading = doc.parent(anchor).expect("anchor has a parent");
        assert_eq!(doc.tag_name(heading), "h2");

        let mut tags = Vec::new();
        let mut cursor = doc.next_sibling(heading);
        while let Some(node) = cursor {
            tags.push(doc.tag_name(node).to_string());
            cursor = doc.next_sibling(node);
        }
        assert_eq!(tags, vec!["p", "table", "div"]);
    }

    #[test]
    fn reads_cells_text_and_attributes() {
        let doc = HtmlDocument::parse(PAGE);
        let body = doc
            .parent(doc.parent(doc.find_by_id("anchor").expect("anchor")).expect("h2"))
            .expect("body");
        let tables = doc.descendants_by_tag(body, "table");
        assert_eq!(tables.len(), 2);

        let cells = doc.descendants_by_tag(tables[0], "th");
        assert_eq!(doc.attr(cells[0], "rowspan"), Some("2"));
        let data = doc.descendants_by_tag(tables[0], "td");
        assert_eq!(doc.text(data[0]), "ich gehe");
    }

    #[test]
    fn tolerates_unclosed_markup() {
        let doc = HtmlDocument::parse("<div id='x'><table><tr><td>ich gehe");
        let anchor = doc.find_by_id("x").expect("anchor should survive bad markup");
        assert_eq!(doc.descendants_by_tag(anchor, "td").len(), 1);
        assert!(doc.find_by_id("missing").is_none());
    }
}
