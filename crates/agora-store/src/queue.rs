use std::collections::VecDeque;

use agora_types::models::{EntryId, QueueEntry};

/// FIFO of pending entries. Entries can also be pulled from the middle:
/// `take_first` removes the oldest entry matching a predicate and leaves
/// the rest in order.
#[derive(Default)]
pub(crate) struct EntryQueue {
    entries: VecDeque<QueueEntry>,
}

impl EntryQueue {
    pub fn enqueue(&mut self, entry: QueueEntry) {
        self.entries.push_back(entry);
    }

    /// Oldest entry matching `pred`, without removing it.
    pub fn find_first<P>(&self, pred: P) -> Option<&QueueEntry>
    where
        P: Fn(&QueueEntry) -> bool,
    {
        self.entries.iter().find(|e| pred(e))
    }

    /// Remove and return the oldest entry matching `pred`.
    pub fn take_first<P>(&mut self, pred: P) -> Option<QueueEntry>
    where
        P: Fn(&QueueEntry) -> bool,
    {
        let pos = self.entries.iter().position(|e| pred(e))?;
        self.entries.remove(pos)
    }

    pub fn remove(&mut self, id: EntryId) -> Option<QueueEntry> {
        self.take_first(|e| e.id == id)
    }

    pub fn retain<P>(&mut self, pred: P)
    where
        P: FnMut(&QueueEntry) -> bool,
    {
        self.entries.retain(pred);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: u64, sender_id: u32, receiver_id: u32) -> QueueEntry {
        QueueEntry {
            id: EntryId(id),
            sender_id,
            receiver_id,
            content: format!("m{}", id),
        }
    }

    fn queue(entries: &[(u64, u32, u32)]) -> EntryQueue {
        let mut q = EntryQueue::default();
        for &(id, s, r) in entries {
            q.enqueue(entry(id, s, r));
        }
        q
    }

    #[test]
    fn take_first_splices_out_oldest_match() {
        let mut q = queue(&[(1, 1, 2), (2, 1, 3), (3, 4, 3), (4, 1, 2)]);

        let taken = q.take_first(|e| e.receiver_id == 3).unwrap();
        assert_eq!(taken.id, EntryId(2));
        assert_eq!(q.len(), 3);

        let order: Vec<u64> = q.entries.iter().map(|e| e.id.0).collect();
        assert_eq!(order, vec![1, 3, 4]);
    }

    #[test]
    fn take_first_without_match_leaves_queue_alone() {
        let mut q = queue(&[(1, 1, 2)]);
        assert!(q.take_first(|e| e.receiver_id == 9).is_none());
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn find_first_does_not_remove() {
        let q = queue(&[(1, 1, 2), (2, 5, 6)]);
        assert_eq!(q.find_first(|e| e.sender_id == 5).unwrap().id, EntryId(2));
        assert_eq!(q.len(), 2);
    }

    #[test]
    fn remove_by_id_and_retain() {
        let mut q = queue(&[(1, 1, 2), (2, 2, 1), (3, 3, 4)]);
        assert_eq!(q.remove(EntryId(2)).unwrap().sender_id, 2);
        assert!(q.remove(EntryId(2)).is_none());

        q.retain(|e| e.sender_id != 1);
        assert_eq!(q.len(), 1);
    }
}
