//! Shared test utilities for the plugin crate.
//!
//! Available to unit tests and, through the `test-support` feature, to the
//! behaviour suites under `tests/`.

use crate::fs::{EntryKind, FileSystem};
use crate::runner::{CommandRunner, EngineCommand, ExecError};
use camino::{Utf8Path, Utf8PathBuf};
use std::cell::RefCell;
use std::collections::{BTreeMap, VecDeque};
use std::io;
use std::sync::{Arc, Mutex, MutexGuard};

/// Mode given to entries created without an explicit mode.
const DEFAULT_MODE: u32 = 0o644;

#[derive(Debug, Clone, Copy)]
struct MemoryEntry {
    kind: EntryKind,
    mode: u32,
}

#[derive(Debug, Default)]
struct MemoryState {
    entries: BTreeMap<Utf8PathBuf, MemoryEntry>,
    failures: BTreeMap<Utf8PathBuf, io::ErrorKind>,
    renames: Vec<(Utf8PathBuf, Utf8PathBuf)>,
}

/// An in-memory [`FileSystem`].
///
/// Clones share state, so a test can hand one clone to the code under test
/// and inspect the other afterwards.
#[derive(Debug, Clone, Default)]
pub struct MemoryFileSystem {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryFileSystem {
    /// Create an empty filesystem.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a directory (and its parents), returning `self` for chaining.
    #[must_use]
    pub fn with_dir(self, path: impl AsRef<Utf8Path>) -> Self {
        self.add_dir(path);
        self
    }

    /// Add a file (and its parent directories), returning `self` for chaining.
    #[must_use]
    pub fn with_file(self, path: impl AsRef<Utf8Path>) -> Self {
        self.add_file(path);
        self
    }

    /// Add a directory and its parents.
    pub fn add_dir(&self, path: impl AsRef<Utf8Path>) {
        let mut state = self.lock();
        insert_parents(&mut state, path.as_ref());
        insert_entry(&mut state, path.as_ref(), EntryKind::Directory);
    }

    /// Add a file and its parent directories.
    pub fn add_file(&self, path: impl AsRef<Utf8Path>) {
        let mut state = self.lock();
        insert_parents(&mut state, path.as_ref());
        insert_entry(&mut state, path.as_ref(), EntryKind::File);
    }

    /// Make every operation on `path` fail with `kind`.
    pub fn fail_with(&self, path: impl AsRef<Utf8Path>, kind: io::ErrorKind) {
        self.lock()
            .failures
            .insert(path.as_ref().to_owned(), kind);
    }

    /// Return the kind of entry at `path`, if any.
    #[must_use]
    pub fn kind_of(&self, path: impl AsRef<Utf8Path>) -> Option<EntryKind> {
        self.lock()
            .entries
            .get(path.as_ref())
            .map(|entry| entry.kind)
    }

    /// Return the mode of the entry at `path`, if any.
    #[must_use]
    pub fn mode_of(&self, path: impl AsRef<Utf8Path>) -> Option<u32> {
        self.lock()
            .entries
            .get(path.as_ref())
            .map(|entry| entry.mode)
    }

    /// Return every rename performed so far, in order.
    #[must_use]
    pub fn renames(&self) -> Vec<(Utf8PathBuf, Utf8PathBuf)> {
        self.lock().renames.clone()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().expect("memory filesystem lock poisoned")
    }

    fn check_failure(state: &MemoryState, path: &Utf8Path) -> io::Result<()> {
        match state.failures.get(path) {
            Some(kind) => Err(io::Error::new(*kind, format!("injected failure @ {path}"))),
            None => Ok(()),
        }
    }
}

fn insert_entry(state: &mut MemoryState, path: &Utf8Path, kind: EntryKind) {
    state.entries.insert(
        path.to_owned(),
        MemoryEntry {
            kind,
            mode: DEFAULT_MODE,
        },
    );
}

fn insert_parents(state: &mut MemoryState, path: &Utf8Path) {
    for ancestor in path.ancestors().skip(1) {
        if ancestor.as_str().is_empty() {
            continue;
        }
        state
            .entries
            .entry(ancestor.to_owned())
            .or_insert(MemoryEntry {
                kind: EntryKind::Directory,
                mode: DEFAULT_MODE,
            });
    }
}

fn not_found(path: &Utf8Path) -> io::Error {
    io::Error::new(io::ErrorKind::NotFound, format!("no such entry: {path}"))
}

impl FileSystem for MemoryFileSystem {
    fn stat(&self, path: &Utf8Path) -> io::Result<EntryKind> {
        let state = self.lock();
        Self::check_failure(&state, path)?;
        state
            .entries
            .get(path)
            .map(|entry| entry.kind)
            .ok_or_else(|| not_found(path))
    }

    fn rename(&self, from: &Utf8Path, to: &Utf8Path) -> io::Result<()> {
        let mut state = self.lock();
        Self::check_failure(&state, from)?;
        Self::check_failure(&state, to)?;

        let moved: Vec<(Utf8PathBuf, MemoryEntry)> = state
            .entries
            .iter()
            .filter(|(path, _)| path.starts_with(from))
            .map(|(path, entry)| (path.clone(), *entry))
            .collect();
        if moved.is_empty() {
            return Err(not_found(from));
        }

        for (path, entry) in moved {
            state.entries.remove(&path);
            let suffix = path.strip_prefix(from).unwrap_or(&path).to_owned();
            let target = if suffix.as_str().is_empty() {
                to.to_owned()
            } else {
                to.join(suffix)
            };
            state.entries.insert(target, entry);
        }
        state.renames.push((from.to_owned(), to.to_owned()));
        Ok(())
    }

    fn create_dir_all(&self, path: &Utf8Path) -> io::Result<()> {
        let mut state = self.lock();
        Self::check_failure(&state, path)?;
        insert_parents(&mut state, path);
        state
            .entries
            .entry(path.to_owned())
            .or_insert(MemoryEntry {
                kind: EntryKind::Directory,
                mode: DEFAULT_MODE,
            });
        Ok(())
    }

    fn set_mode(&self, path: &Utf8Path, mode: u32) -> io::Result<()> {
        let mut state = self.lock();
        Self::check_failure(&state, path)?;
        let entry = state.entries.get_mut(path).ok_or_else(|| not_found(path))?;
        entry.mode = mode;
        Ok(())
    }
}

/// An expected engine invocation and the result to return for it.
#[derive(Debug)]
pub struct ExpectedRun {
    /// The arguments the runner must receive.
    pub args: Vec<String>,
    /// The result to return.
    pub result: Result<(), ExecError>,
}

impl ExpectedRun {
    /// Expect `args` and succeed.
    #[must_use]
    pub fn success(args: &[&str]) -> Self {
        Self {
            args: args.iter().map(|arg| (*arg).to_owned()).collect(),
            result: Ok(()),
        }
    }

    /// Expect `args` and fail with `error`.
    #[must_use]
    pub fn failure(args: &[&str], error: ExecError) -> Self {
        Self {
            args: args.iter().map(|arg| (*arg).to_owned()).collect(),
            result: Err(error),
        }
    }
}

/// A [`CommandRunner`] that checks invocations against a script.
///
/// Every run pops the next [`ExpectedRun`], asserts the arguments match and
/// returns its result. All received commands are recorded.
#[derive(Debug, Default)]
pub struct StubRunner {
    expected: RefCell<VecDeque<ExpectedRun>>,
    received: RefCell<Vec<EngineCommand>>,
}

impl StubRunner {
    /// Create a runner expecting `expected` invocations in order.
    #[must_use]
    pub fn new(expected: Vec<ExpectedRun>) -> Self {
        Self {
            expected: RefCell::new(expected.into()),
            received: RefCell::new(Vec::new()),
        }
    }

    /// The commands received so far.
    #[must_use]
    pub fn received(&self) -> Vec<EngineCommand> {
        self.received.borrow().clone()
    }

    /// Assert that every expected invocation was consumed.
    ///
    /// # Panics
    ///
    /// Panics if expected invocations remain.
    pub fn assert_finished(&self) {
        assert!(
            self.expected.borrow().is_empty(),
            "expected further engine invocations"
        );
    }
}

impl CommandRunner for StubRunner {
    fn run(&self, command: &EngineCommand) -> Result<(), ExecError> {
        self.received.borrow_mut().push(command.clone());
        let call = self
            .expected
            .borrow_mut()
            .pop_front()
            .expect("unexpected engine invocation");
        assert_eq!(call.args, command.args);
        call.result
    }
}
