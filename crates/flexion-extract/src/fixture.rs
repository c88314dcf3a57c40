use crate::tree::DocumentTree;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FixtureNode(usize);

#[derive(Debug, Clone)]
struct FixtureElement {
    tag: String,
    attrs: Vec<(String, String)>,
    text: String,
    parent: Option<usize>,
    children: Vec<usize>,
}

#[derive(Debug, Clone)]
pub struct FixtureTree {
    nodes: Vec<FixtureElement>,
}

impl FixtureTree {
    #[must_use]
    pub fn new(root_tag: &str) -> Self {
        Self {
            nodes: vec![FixtureElement {
                tag: root_tag.to_string(),
                attrs: Vec::new(),
                text: String::new(),
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    #[must_use]
    pub fn root(&self) -> FixtureNode {
        FixtureNode(0)
    }

    pub fn append(&mut self, parent: FixtureNode, tag: &str) -> FixtureNode {
        self.append_text(parent, tag, "")
    }

    pub fn append_text(&mut self, parent: FixtureNode, tag: &str, text: &str) -> FixtureNode {
        let index = self.nodes.len();
        self.nodes.push(FixtureElement {
            tag: tag.to_string(),
            attrs: Vec::new(),
            text: text.to_string(),
            parent: Some(parent.0),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(index);
        FixtureNode(index)
    }

    pub fn set_attr(&mut self, node: FixtureNode, name: &str, value: &str) {
        self.nodes[node.0]
            .attrs
            .push((name.to_string(), value.to_string()));
    }

    pub fn append_row(&mut self, table: FixtureNode, cells: &[&str]) -> FixtureNode {
        let row = self.append(table, "tr");
        for cell in cells {
            self.append_text(row, "td", cell);
        }
        row
    }

    fn collect_text(&self, index: usize, out: &mut String) {
        let element = &self.nodes[index];
        out.push_str(&element.text);
        for &child in &element.children {
            self.collect_text(child, out);
        }
    }

    fn collect_by_tag(&self, index: usize, tag: &str, out: &mut Vec<FixtureNode>) {
        for &child in &self.nodes[index].children {
            if self.nodes[child].tag == tag {
                out.push(FixtureNode(child));
            }
            self.collect_by_tag(child, tag, out);
        }
    }
}

impl DocumentTree for FixtureTree {
    type Node<'a> = FixtureNode;

    fn find_by_id<'a>(&'a self, id: &str) -> Option<FixtureNode> {
        self.nodes
            .iter()
            .position(|element| {
                element
                    .attrs
                    .iter()
                    .any(|(name, value)| name == "id" && value == id)
            })
            .map(FixtureNode)
    }

    fn parent<'a>(&'a self, node: FixtureNode) -> Option<FixtureNode> {
        self.nodes[node.0].parent.map(FixtureNode)
    }

    fn next_sibling<'a>(&'a self, node: FixtureNode) -> Option<FixtureNode> {
        let parent = self.nodes[node.0].parent?;
        let siblings = &self.nodes[parent].children;
        let position = siblings.iter().position(|&child| child == node.0)?;
        siblings.get(position + 1).copied().map(FixtureNode)
    }

    fn children<'a>(&'a self, node: FixtureNode) -> Vec<FixtureNode> {
        self.nodes[node.0]
            .children
            .iter()
            .copied()
            .map(FixtureNode)
            .collect()
    }

    fn descendants_by_tag<'a>(&'a self, node: FixtureNode, tag: &str) -> Vec<FixtureNode> {
        let mut out = Vec::new();
        self.collect_by_tag(node.0, tag, &mut out);
        out
    }

    fn tag_name<'a>(&'a self, node: FixtureNode) -> &'a str {
        &self.nodes[node.0].tag
    }

    fn attr<'a>(&'a self, node: FixtureNode, name: &str) -> Option<&'a str> {
        self.nodes[node.0]
            .attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    fn text<'a>(&'a self, node: FixtureNode) -> String {
        let mut out = String::new();
        self.collect_text(node.0, &mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::FixtureTree;
    use crate::tree::DocumentTree;

    #[test]
    fn walks_siblings_and_descendants_in_order() {
        let mut tree = FixtureTree::new("body");
        let root = tree.root();
        let heading = tree.append(root, "h2");
        let anchor = tree.append_text(heading, "span", "Anchor");
        tree.set_attr(anchor, "id", "anchor");
        let div = tree.append(root, "div");
        let table = tree.append(div, "table");
        tree.append_row(table, &["1. Person Singular", "ich gehe"]);

        assert_eq!(tree.find_by_id("anchor"), Some(anchor));
        assert_eq!(tree.parent(anchor), Some(heading));
        assert_eq!(tree.next_sibling(heading), Some(div));
        assert_eq!(tree.next_sibling(div), None);
        assert_eq!(tree.descendants_by_tag(root, "table"), vec![table]);
        assert_eq!(tree.descendants_by_tag(table, "td").len(), 2);
        assert_eq!(tree.text(table), "1. Person Singularich gehe");
    }
}
