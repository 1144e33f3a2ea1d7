// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTML parser using html5ever

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::TreeBuilderOpts;
use html5ever::{Attribute, ParseOpts};
use markup5ever_rcdom::{NodeData, RcDom};

/// Parse a full HTML document. html5ever recovers from any malformed input,
/// so this never fails.
pub fn parse_html(html: &str) -> RcDom {
    let opts = ParseOpts {
        tree_builder: TreeBuilderOpts {
            drop_doctype: true,
            ..Default::default()
        },
        ..Default::default()
    };

    parse_document(RcDom::default(), opts).one(html)
}

/// Visit every element in document order with its tag name and attributes
pub fn for_each_element<F>(dom: &RcDom, mut visit: F)
where
    F: FnMut(&str, &[Attribute]),
{
    // Explicit stack: rendered feeds nest deeply enough to matter
    let mut stack = vec![dom.document.clone()];

    while let Some(node) = stack.pop() {
        if let NodeData::Element {
            ref name,
            ref attrs,
            ..
        } = node.data
        {
            visit(&name.local, &attrs.borrow());
        }

        for child in node.children.borrow().iter().rev() {
            stack.push(child.clone());
        }
    }
}

/// Value of the attribute called `name`, if present
pub fn attribute<'a>(attrs: &'a [Attribute], name: &str) -> Option<&'a str> {
    attrs
        .iter()
        .find(|a| &*a.name.local == name)
        .map(|a| &*a.value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visits_in_document_order() {
        let dom = parse_html("<html><body><div><p>a</p></div><span></span></body></html>");
        let mut tags = Vec::new();
        for_each_element(&dom, |tag, _| tags.push(tag.to_string()));
        assert_eq!(tags, vec!["html", "head", "body", "div", "p", "span"]);
    }

    #[test]
    fn test_attribute_lookup() {
        let dom = parse_html(r#"<a href="/x/p/1" class="tile">post</a>"#);
        let mut href = None;
        for_each_element(&dom, |tag, attrs| {
            if tag == "a" {
                href = attribute(attrs, "href").map(str::to_string);
            }
        });
        assert_eq!(href.as_deref(), Some("/x/p/1"));
    }

    #[test]
    fn test_malformed_markup_still_parses() {
        let dom = parse_html("<div><img src='a.jpg'<p>unclosed");
        let mut count = 0;
        for_each_element(&dom, |_, _| count += 1);
        assert!(count > 0);
    }
}
