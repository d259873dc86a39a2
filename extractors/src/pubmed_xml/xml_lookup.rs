//! Find-or-default lookups over a parsed XML tree.

use roxmltree::Node;

/// Concatenated, trimmed text of `node` and everything below it; `None` when blank.
///
/// Titles and affiliations carry inline markup (`<i>`, `<sup>`), so reading only the first
/// text child would truncate them.
pub(crate) fn element_text(node: Node) -> Option<String> {
    let text: String = node
        .descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect();
    let text = text.trim();

    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// First element named `tag` strictly below `node`, at any depth
pub(crate) fn find_descendant<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &str,
) -> Option<Node<'a, 'input>> {
    node.descendants().skip(1).find(|n| n.has_tag_name(tag))
}

/// First direct child element named `tag`
pub(crate) fn find_child<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|n| n.has_tag_name(tag))
}

/// All elements named `tag` strictly below `node`, in document order
pub(crate) fn descendants_named<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &'static str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.descendants().skip(1).filter(move |n| n.has_tag_name(tag))
}

#[cfg(test)]
mod tests {
    use super::*;
    use roxmltree::Document;

    const SAMPLE: &str = r#"<Root>
  <Outer>
    <Inner><Name>  first  </Name></Inner>
    <Name>second</Name>
    <Empty>   </Empty>
    <Styled>Effect of <i>TP53</i> loss</Styled>
  </Outer>
</Root>"#;

    #[test]
    fn test_find_descendant_searches_any_depth() {
        let doc = Document::parse(SAMPLE).unwrap();
        let outer = find_descendant(doc.root_element(), "Outer").unwrap();

        let name = find_descendant(outer, "Name").unwrap();
        assert_eq!(element_text(name).as_deref(), Some("first"));

        let direct = find_child(outer, "Name").unwrap();
        assert_eq!(element_text(direct).as_deref(), Some("second"));
    }

    #[test]
    fn test_descendant_search_excludes_self() {
        let doc = Document::parse(SAMPLE).unwrap();
        assert!(find_descendant(doc.root_element(), "Root").is_none());
        assert_eq!(descendants_named(doc.root_element(), "Name").count(), 2);
    }

    #[test]
    fn test_blank_text_defaults() {
        let doc = Document::parse(SAMPLE).unwrap();
        let root = doc.root_element();

        assert!(find_descendant(root, "Empty").and_then(element_text).is_none());
        assert!(find_descendant(root, "Missing").is_none());
    }

    #[test]
    fn test_inline_markup_is_kept_as_text() {
        let doc = Document::parse(SAMPLE).unwrap();
        let styled = find_descendant(doc.root_element(), "Styled").unwrap();
        assert_eq!(element_text(styled).as_deref(), Some("Effect of TP53 loss"));
    }
}
