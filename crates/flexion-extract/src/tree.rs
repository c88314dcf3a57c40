pub trait DocumentTree {
    type Node<'a>: Copy
    where
        Self: 'a;

    fn find_by_id<'a>(&'a self, id: &str) -> Option<Self::Node<'a>>;

    fn parent<'a>(&'a self, node: Self::Node<'a>) -> Option<Self::Node<'a>>;

    fn next_sibling<'a>(&'a self, node: Self::Node<'a>) -> Option<Self::Node<'a>>;

    fn children<'a>(&'a self, node: Self::Node<'a>) -> Vec<Self::Node<'a>>;

    // Excludes `node` itself.
    fn descendants_by_tag<'a>(&'a self, node: Self::Node<'a>, tag: &str) -> Vec<Self::Node<'a>>;

    fn tag_name<'a>(&'a self, node: Self::Node<'a>) -> &'a str;

    fn attr<'a>(&'a self, node: Self::Node<'a>, name: &str) -> Option<&'a str>;

    fn text<'a>(&'a self, node: Self::Node<'a>) -> String;
}
