//! Local cache of query results.
//!
//! Each `(filter, search)` pair owns one entry. Entries carry a
//! generation counter: a fetch bumps the generation when it starts,
//! and a response only installs if no newer fetch (or local predict)
//! has bumped it since. Stale responses are dropped instead of
//! clobbering fresher data.

use std::collections::HashMap;
use todo_core::{Todo, TodoId, TodoQuery};

/// Token handed out by [`TodoCache::begin_fetch`]. A response tagged
/// with it installs only while it is still the entry's newest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchToken {
    query: TodoQuery,
    generation: u64,
}

#[derive(Debug, Clone, Default)]
struct CacheEntry {
    todos: Vec<Todo>,
    /// Bumped by begin_fetch and by local predictions.
    generation: u64,
    /// Whether this entry has ever been populated.
    populated: bool,
}

/// Snapshot of one entry's rows, taken before a prediction so the
/// controller can roll back on failure.
#[derive(Debug, Clone)]
pub struct Snapshot {
    query: TodoQuery,
    todos: Vec<Todo>,
    populated: bool,
}

#[derive(Debug, Default)]
pub struct TodoCache {
    entries: HashMap<TodoQuery, CacheEntry>,
}

impl TodoCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows for a query, or `None` when the query has never resolved.
    pub fn read(&self, query: &TodoQuery) -> Option<&[Todo]> {
        let entry = self.entries.get(query)?;
        entry.populated.then_some(entry.todos.as_slice())
    }

    /// Capture the entry for later [`restore`](Self::restore).
    pub fn snapshot(&self, query: &TodoQuery) -> Snapshot {
        let entry = self.entries.get(query);
        Snapshot {
            query: query.clone(),
            todos: entry.map(|e| e.todos.clone()).unwrap_or_default(),
            populated: entry.map(|e| e.populated).unwrap_or(false),
        }
    }

    /// Roll an entry back to a snapshot, invalidating in-flight fetches
    /// for it.
    pub fn restore(&mut self, snapshot: Snapshot) {
        let entry = self.entries.entry(snapshot.query).or_default();
        entry.todos = snapshot.todos;
        entry.populated = snapshot.populated;
        entry.generation += 1;
    }

    /// Mutate an entry's rows in place (a local prediction). Bumps the
    /// generation so an older in-flight response cannot overwrite the
    /// predicted rows.
    pub fn apply<F>(&mut self, query: &TodoQuery, mutate: F) -> Snapshot
    where
        F: FnOnce(&mut Vec<Todo>),
    {
        let snapshot = self.snapshot(query);
        let entry = self.entries.entry(query.clone()).or_default();
        mutate(&mut entry.todos);
        entry.populated = true;
        entry.generation += 1;
        snapshot
    }

    /// Start a fetch for a query. The returned token gates
    /// [`install`](Self::install).
    pub fn begin_fetch(&mut self, query: &TodoQuery) -> FetchToken {
        let entry = self.entries.entry(query.clone()).or_default();
        entry.generation += 1;
        FetchToken {
            query: query.clone(),
            generation: entry.generation,
        }
    }

    /// Install fetched rows. Returns `false` (dropping the rows) when a
    /// newer fetch or prediction has superseded the token.
    pub fn install(&mut self, token: FetchToken, todos: Vec<Todo>) -> bool {
        let entry = self.entries.entry(token.query).or_default();
        if entry.generation != token.generation {
            return false;
        }
        entry.todos = todos;
        entry.populated = true;
        true
    }

    /// Drop every entry, forcing refetches.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Predict a completion toggle across every cached view that holds
    /// the todo. Returns the snapshots needed to undo it.
    pub fn predict_toggle(&mut self, id: TodoId, completed: bool) -> Vec<Snapshot> {
        let queries = self.queries_containing(id);
        queries
            .into_iter()
            .map(|query| {
                self.apply(&query, |todos| {
                    if let Some(todo) = todos.iter_mut().find(|t| t.id == id) {
                        todo.completed = completed;
                    }
                })
            })
            .collect()
    }

    /// Predict a removal across every cached view that holds the todo.
    pub fn predict_delete(&mut self, id: TodoId) -> Vec<Snapshot> {
        let queries = self.queries_containing(id);
        queries
            .into_iter()
            .map(|query| self.apply(&query, |todos| todos.retain(|t| t.id != id)))
            .collect()
    }

    fn queries_containing(&self, id: TodoId) -> Vec<TodoQuery> {
        self.entries
            .iter()
            .filter(|(_, entry)| entry.populated && entry.todos.iter().any(|t| t.id == id))
            .map(|(query, _)| query.clone())
            .collect()
    }
}
