//! By-id operations over the forest.
//!
//! All walks are preorder: each sibling is examined (and, for folders,
//! descended into) before the next sibling. The first node whose id
//! matches wins and the walk stops; ids are unique across the forest, so
//! nothing past the first match can ever be a second one.

use uuid::Uuid;

use crate::node::Node;

/// Removes the node with `id` from wherever it sits, preserving the
/// relative order of its remaining siblings. Returns whether a node was
/// removed; callers persist and refresh only on `true`.
pub fn delete(nodes: &mut Vec<Node>, id: Uuid) -> bool {
    for index in 0..nodes.len() {
        if nodes[index].id() == id {
            nodes.remove(index);
            return true;
        }
        if let Node::Folder(folder) = &mut nodes[index] {
            if delete(&mut folder.children, id) {
                return true;
            }
        }
    }
    false
}

/// Overwrites the content of the prompt with `id`. A matched folder has
/// no content to replace: the walk stops there and reports "not applied".
pub fn replace_content(nodes: &mut [Node], id: Uuid, new_content: &str) -> bool {
    for node in nodes.iter_mut() {
        match node {
            Node::Prompt(prompt) => {
                if prompt.id == id {
                    prompt.content = new_content.to_string();
                    return true;
                }
            }
            Node::Folder(folder) => {
                if folder.id == id {
                    return false;
                }
                if replace_content(&mut folder.children, id, new_content) {
                    return true;
                }
            }
        }
    }
    false
}

/// Appends `child` to the end of the children of the folder with `id`.
/// A matched prompt cannot take children: the walk stops there and the
/// child is dropped unappended.
pub fn append_child(nodes: &mut [Node], id: Uuid, child: Node) -> bool {
    let mut slot = Some(child);
    append_into(nodes, id, &mut slot)
}

fn append_into(nodes: &mut [Node], id: Uuid, slot: &mut Option<Node>) -> bool {
    for node in nodes.iter_mut() {
        match node {
            Node::Prompt(prompt) => {
                if prompt.id == id {
                    return false;
                }
            }
            Node::Folder(folder) => {
                if folder.id == id {
                    if let Some(child) = slot.take() {
                        folder.children.push(child);
                        return true;
                    }
                    return false;
                }
                if append_into(&mut folder.children, id, slot) {
                    return true;
                }
            }
        }
    }
    false
}

/// Immutable lookup with the same walk order as the mutating operations.
#[must_use]
pub fn find(nodes: &[Node], id: Uuid) -> Option<&Node> {
    for node in nodes {
        if node.id() == id {
            return Some(node);
        }
        if let Node::Folder(folder) = node {
            if let Some(found) = find(&folder.children, id) {
                return Some(found);
            }
        }
    }
    None
}

/// First node whose name equals `name`, in walk order. Names are not
/// unique; this exists for human-friendly addressing from the CLI.
#[must_use]
pub fn find_by_name<'a>(nodes: &'a [Node], name: &str) -> Option<&'a Node> {
    for node in nodes {
        if node.name() == name {
            return Some(node);
        }
        if let Node::Folder(folder) = node {
            if let Some(found) = find_by_name(&folder.children, name) {
                return Some(found);
            }
        }
    }
    None
}
