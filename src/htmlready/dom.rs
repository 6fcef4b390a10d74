//! Small kuchiki helpers shared by the tree transformer.
//!
//! Mutation always follows the same shape: collect the nodes to touch first,
//! then mutate, so traversal never walks a tree it is changing. Replacement
//! markup is built as an HTML string and re-parsed; kuchiki fragments keep
//! ownership simple and sidestep manual element construction.

use kuchiki::traits::TendrilSink;
use kuchiki::NodeRef;

/// Parse a full document. kuchiki is lenient; this always yields a tree.
pub fn parse_document(html: &str) -> NodeRef {
    kuchiki::parse_html().one(html)
}

/// Parse `html` and return the resulting body children, detached.
pub fn fragment_nodes(html: &str) -> Vec<NodeRef> {
    let doc = parse_document(html);
    let Ok(body) = doc.select_first("body") else {
        return Vec::new();
    };
    let nodes: Vec<NodeRef> = body.as_node().children().collect();
    for node in &nodes {
        node.detach();
    }
    nodes
}

/// Replace `node` with the nodes parsed from `html`. No-op when `node` has no
/// parent.
pub fn replace_with_fragment(node: &NodeRef, html: &str) {
    if node.parent().is_none() {
        return;
    }
    for new in fragment_nodes(html) {
        node.insert_before(new);
    }
    node.detach();
}

/// Serialized markup of `node`'s children.
pub fn inner_html(node: &NodeRef) -> String {
    let mut out = Vec::new();
    for child in node.children() {
        // Serialization to a Vec cannot fail; ignore the io::Result plumbing.
        let _ = child.serialize(&mut out);
    }
    String::from_utf8_lossy(&out).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragment_round_trips() {
        let nodes = fragment_nodes("<p>a</p><p>b</p>");
        assert_eq!(nodes.len(), 2);
    }

    #[test]
    fn replaces_a_node_in_place() {
        let doc = parse_document("<html><body><p>old</p></body></html>");
        let p = doc.select_first("p").expect("p").as_node().clone();
        replace_with_fragment(&p, "<div>new</div>");
        let body = doc.select_first("body").expect("body");
        assert_eq!(inner_html(body.as_node()), "<div>new</div>");
    }

    #[test]
    fn inner_html_preserves_text() {
        let doc = parse_document("<html><body>hi <b>there</b></body></html>");
        let body = doc.select_first("body").expect("body");
        assert_eq!(inner_html(body.as_node()), "hi <b>there</b>");
    }
}
