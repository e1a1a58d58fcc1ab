use std::cmp::Ordering;

use agora_types::models::{Profile, UserId};

use crate::SocialStore;
use crate::error::Result;

struct Node {
    profile: Profile,
    left: Option<Box<Node>>,
    right: Option<Box<Node>>,
}

impl Node {
    fn leaf(profile: Profile) -> Box<Self> {
        Box::new(Self {
            profile,
            left: None,
            right: None,
        })
    }
}

/// Binary search tree of profiles keyed by account id.
///
/// Ids are drawn at random, which keeps the tree shallow in practice. No
/// rebalancing is done.
#[derive(Default)]
pub(crate) struct ProfileIndex {
    root: Option<Box<Node>>,
    len: usize,
}

impl ProfileIndex {
    /// Insert if absent. An existing profile with the same id is left
    /// untouched and `false` is returned.
    pub fn insert(&mut self, profile: Profile) -> bool {
        let inserted = insert_at(&mut self.root, profile);
        if inserted {
            self.len += 1;
        }
        inserted
    }

    pub fn search(&self, id: UserId) -> Option<&Profile> {
        let mut cur = self.root.as_deref();
        while let Some(node) = cur {
            match id.cmp(&node.profile.user_id) {
                Ordering::Less => cur = node.left.as_deref(),
                Ordering::Greater => cur = node.right.as_deref(),
                Ordering::Equal => return Some(&node.profile),
            }
        }
        None
    }

    pub fn remove(&mut self, id: UserId) -> Option<Profile> {
        let removed = remove_at(&mut self.root, id);
        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.len
    }

    #[cfg(test)]
    fn depth(&self) -> usize {
        fn depth_of(node: Option<&Node>) -> usize {
            node.map_or(0, |n| {
                1 + depth_of(n.left.as_deref()).max(depth_of(n.right.as_deref()))
            })
        }
        depth_of(self.root.as_deref())
    }

    /// In-order walk, ascending by id.
    #[cfg(test)]
    fn ids(&self) -> Vec<UserId> {
        fn walk(node: Option<&Node>, out: &mut Vec<UserId>) {
            if let Some(n) = node {
                walk(n.left.as_deref(), out);
                out.push(n.profile.user_id);
                walk(n.right.as_deref(), out);
            }
        }
        let mut out = Vec::with_capacity(self.len);
        walk(self.root.as_deref(), &mut out);
        out
    }
}

fn insert_at(slot: &mut Option<Box<Node>>, profile: Profile) -> bool {
    match slot {
        None => {
            *slot = Some(Node::leaf(profile));
            true
        }
        Some(node) => match profile.user_id.cmp(&node.profile.user_id) {
            Ordering::Less => insert_at(&mut node.left, profile),
            Ordering::Greater => insert_at(&mut node.right, profile),
            Ordering::Equal => false,
        },
    }
}

fn remove_at(slot: &mut Option<Box<Node>>, id: UserId) -> Option<Profile> {
    let node = slot.as_mut()?;
    match id.cmp(&node.profile.user_id) {
        Ordering::Less => return remove_at(&mut node.left, id),
        Ordering::Greater => return remove_at(&mut node.right, id),
        Ordering::Equal => {}
    }

    let Node {
        profile,
        left,
        right,
    } = *slot.take()?;

    *slot = match (left, right) {
        (None, None) => None,
        (Some(child), None) | (None, Some(child)) => Some(child),
        (Some(left), Some(right)) => {
            // Replace with the in-order successor
            let (successor, rest) = take_min(right);
            Some(Box::new(Node {
                profile: successor,
                left: Some(left),
                right: rest,
            }))
        }
    };

    Some(profile)
}

/// Detach the smallest profile of a subtree. Returns it and what remains.
fn take_min(mut node: Box<Node>) -> (Profile, Option<Box<Node>>) {
    match node.left.take() {
        None => {
            let Node { profile, right, .. } = *node;
            (profile, right)
        }
        Some(left) => {
            let (min, rest) = take_min(left);
            node.left = rest;
            (min, Some(node))
        }
    }
}

impl SocialStore {
    /// Profile lookup by account id.
    pub fn profile(&self, id: UserId) -> Result<Option<Profile>> {
        self.with_state(|state| Ok(state.profiles.search(id).cloned()))
    }

    pub fn profile_count(&self) -> Result<usize> {
        self.with_state(|state| Ok(state.profiles.len()))
    }
}
