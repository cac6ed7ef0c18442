//! Text dumps of a laid-out tree.
//!
//! One line per node, depth-first: two spaces per level, the tag, `#id` when
//! present, then `[left,top widthxheight]`. Numbers are rounded to two
//! decimals with trailing zeros dropped, so dumps are stable enough for
//! snapshot assertions.

use crate::dom::{Dom, NodeId};
use crate::geometry::LayoutBox;

/// Render every node under `root` with its box.
///
/// # Examples
///
/// ```ignore
/// let dump = layout_to_string(&dom, root);
/// insta::assert_snapshot!(dump, @r"
/// div#root [0,0 300x100]
///   div#a [0,0 50x10]
/// ");
/// ```
pub fn layout_to_string(dom: &Dom, root: NodeId) -> String {
    let mut out = String::new();
    for (node, depth) in dom.walk_with_depth(root) {
        let Some(data) = dom.get(node) else { continue };
        out.push_str(&"  ".repeat(depth));
        out.push_str(data.tag.name());
        if let Some(id) = data.id() {
            out.push('#');
            out.push_str(id);
        }
        out.push(' ');
        out.push_str(&format_box(&data.layout));
        out.push('\n');
    }
    out
}

/// `[left,top widthxheight]` with compact numbers.
pub fn format_box(b: &LayoutBox) -> String {
    format!(
        "[{},{} {}x{}]",
        number(b.left),
        number(b.top),
        number(b.width),
        number(b.height)
    )
}

fn number(value: f32) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    // -0 prints as "-0"; normalise it.
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    let text = format!("{rounded:.2}");
    text.trim_end_matches('0').trim_end_matches('.').to_owned()
}
