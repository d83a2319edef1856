use crate::dom::{Element, Fragment, Tag, HIDDEN_CLASS};
use crate::domain::{Comment, PostId};

pub const COMMENTS_CLASS: &str = "comments";

/// Build one comment card per comment, in input order.
///
/// Returns `None` for an empty slice: there is nothing to append.
pub fn build_comments_fragment(comments: &[Comment]) -> Option<Fragment> {
    if comments.is_empty() {
        return None;
    }

    Some(comments.iter().map(comment_card).collect())
}

fn comment_card(comment: &Comment) -> Element {
    Element::new(Tag::Article)
        .child(Element::text(Tag::H3, comment.name.as_str()))
        .child(Element::text(Tag::P, comment.body.as_str()))
        .child(Element::text(Tag::P, comment.from_line()))
}

/// The comment section of a post, hidden until its button is clicked.
pub fn build_comment_section(post_id: PostId, comments: &[Comment]) -> Element {
    let mut section = Element::new(Tag::Section)
        .class(COMMENTS_CLASS)
        .class(HIDDEN_CLASS)
        .post_id(post_id);

    if let Some(fragment) = build_comments_fragment(comments) {
        section.append_fragment(fragment);
    }
    section
}
