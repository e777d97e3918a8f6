use std::sync::{Mutex, MutexGuard};

use crate::model::Action;

/// Last-in-first-out record of relocations done by this process.
///
/// Push and pop go through one mutex so concurrent callers cannot reorder
/// the stack. Nothing is persisted: the log dies with the process.
#[derive(Debug, Default)]
pub struct ActionLog {
    actions: Mutex<Vec<Action>>,
}

impl ActionLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn actions(&self) -> MutexGuard<'_, Vec<Action>> {
        // A panic while holding the lock cannot leave the Vec half-updated.
        self.actions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn push(&self, action: Action) {
        self.actions().push(action);
    }

    pub fn pop(&self) -> Option<Action> {
        self.actions().pop()
    }

    /// The action the next undo would reverse.
    pub fn peek(&self) -> Option<Action> {
        self.actions().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.actions().len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions().is_empty()
    }

    /// Oldest first.
    pub fn snapshot(&self) -> Vec<Action> {
        self.actions().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::Arc;
    use std::thread;

    fn action(n: usize) -> Action {
        Action::delete(
            PathBuf::from(format!("/trash/{n}")),
            PathBuf::from(format!("/data/{n}")),
        )
    }

    #[test]
    fn test_lifo() {
        let log = ActionLog::new();
        assert!(log.is_empty());
        assert_eq!(log.pop(), None);

        log.push(action(1));
        log.push(action(2));
        assert_eq!(log.len(), 2);
        assert_eq!(log.peek(), Some(action(2)));
        assert_eq!(log.snapshot(), vec![action(1), action(2)]);

        assert_eq!(log.pop(), Some(action(2)));
        assert_eq!(log.pop(), Some(action(1)));
        assert_eq!(log.pop(), None);
    }

    #[test]
    fn test_concurrent_pushes_are_all_recorded() {
        let log = Arc::new(ActionLog::new());
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let log = Arc::clone(&log);
                thread::spawn(move || {
                    for i in 0..100 {
                        log.push(action(t * 100 + i));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(log.len(), 800);
        let mut popped = 0;
        while log.pop().is_some() {
            popped += 1;
        }
        assert_eq!(popped, 800);
    }
}
