use crate::options::TableScan;
use crate::tree::DocumentTree;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Cell {
    pub text: String,
    pub spans_rows: bool,
}

impl Cell {
    pub(crate) fn is_decorative(&self) -> bool {
        self.spans_rows || self.text.is_empty()
    }
}

const ROW_GROUPS: [&str; 3] = ["thead", "tbody", "tfoot"];

// Nested tables follow the table that holds them.
pub(crate) fn collect_tables<'a, T: DocumentTree>(
    tree: &'a T,
    start: T::Node<'a>,
    scan: TableScan,
) -> Vec<T::Node<'a>> {
    let mut tables = Vec::new();
    let mut cursor = tree.next_sibling(start);
    while let Some(node) = cursor {
        if tree.tag_name(node) == "table" {
            tables.push(node);
            tables.extend(tree.descendants_by_tag(node, "table"));
        } else if scan == TableScan::Following {
            tables.extend(tree.descendants_by_tag(node, "table"));
        }
        cursor = tree.next_sibling(node);
    }
    tables
}

fn own_rows<'a, T: DocumentTree>(tree: &'a T, table: T::Node<'a>) -> Vec<T::Node<'a>> {
    let mut rows = Vec::new();
    for child in tree.children(table) {
        match tree.tag_name(child) {
            "tr" => rows.push(child),
            tag if ROW_GROUPS.contains(&tag) => rows.extend(
                tree.children(child)
                    .into_iter()
                    .filter(|row| tree.tag_name(*row) == "tr"),
            ),
            _ => {}
        }
    }
    rows
}

pub(crate) fn table_rows<'a, T: DocumentTree>(tree: &'a T, table: T::Node<'a>) -> Vec<Vec<Cell>> {
    own_rows(tree, table)
        .into_iter()
        .filter(|row| tree.descendants_by_tag(*row, "table").is_empty())
        .map(|row| {
            tree.children(row)
                .into_iter()
                .filter(|cell| matches!(tree.tag_name(*cell), "td" | "th"))
                .map(|cell| Cell {
                    text: normalize_ws(&tree.text(cell)),
                    spans_rows: tree
                        .attr(cell, "rowspan")
                        .and_then(|value| value.trim().parse::<u32>().ok())
                        .is_some_and(|span| span > 1),
                })
                .collect()
        })
        .collect()
}

pub(crate) fn normalize_ws(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}
