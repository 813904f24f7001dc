//! Accounts → folders → notes

use crate::error::{PimError, Result};
use crate::model::{Account, Folder, Note, NoteEntry};
use crate::source::NotesSource;
use std::vec;
use tracing::debug;

/// Account and folder selection for a notes export.
///
/// Names are compared exactly and case-sensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteFilter {
    pub excluded_accounts: Vec<String>,
    pub excluded_folders: Vec<String>,
    /// When set, only the folder with exactly this name is visited
    pub target_folder: Option<String>,
}

impl NoteFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exclude_account(mut self, name: impl Into<String>) -> Self {
        self.excluded_accounts.push(name.into());
        self
    }

    pub fn exclude_folder(mut self, name: impl Into<String>) -> Self {
        self.excluded_folders.push(name.into());
        self
    }

    pub fn with_target_folder(mut self, name: impl Into<String>) -> Self {
        self.target_folder = Some(name.into());
        self
    }

    pub fn includes_account(&self, name: &str) -> bool {
        !self.excluded_accounts.iter().any(|n| n == name)
    }

    pub fn includes_folder(&self, name: &str) -> bool {
        if self.excluded_folders.iter().any(|n| n == name) {
            return false;
        }
        match &self.target_folder {
            Some(target) => target == name,
            None => true,
        }
    }
}

/// Lazy walk over every note that passes a [`NoteFilter`]
pub struct NoteWalk<'a, S: NotesSource + ?Sized> {
    source: &'a S,
    filter: &'a NoteFilter,
    accounts: Option<vec::IntoIter<Account>>,
    account: Option<Account>,
    folders: vec::IntoIter<Folder>,
    folder: Option<Folder>,
    notes: vec::IntoIter<Note>,
    done: bool,
}

/// Walk the notes of `source` that pass `filter`
pub fn walk_notes<'a, S: NotesSource + ?Sized>(
    source: &'a S,
    filter: &'a NoteFilter,
) -> NoteWalk<'a, S> {
    NoteWalk {
        source,
        filter,
        accounts: None,
        account: None,
        folders: Vec::new().into_iter(),
        folder: None,
        notes: Vec::new().into_iter(),
        done: false,
    }
}

impl<'a, S: NotesSource + ?Sized> NoteWalk<'a, S> {
    fn fail(&mut self, err: PimError) -> Option<Result<NoteEntry>> {
        self.done = true;
        Some(Err(err))
    }

    fn entry(&self, note: Note) -> NoteEntry {
        NoteEntry {
            account: self.account.as_ref().map(|a| a.name.clone()).unwrap_or_default(),
            folder: self.folder.as_ref().map(|f| f.name.clone()).unwrap_or_default(),
            note,
        }
    }
}

impl<'a, S: NotesSource + ?Sized> Iterator for NoteWalk<'a, S> {
    type Item = Result<NoteEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            if let Some(note) = self.notes.next() {
                return Some(Ok(self.entry(note)));
            }

            if self.account.is_some() {
                if let Some(folder) = self.folders.next() {
                    if !self.filter.includes_folder(&folder.name) {
                        debug!("Skipping folder: {}", folder.name);
                        continue;
                    }
                    debug!("Processing folder: {}", folder.name);
                    match self.source.notes(&folder) {
                        Ok(notes) => {
                            self.notes = notes.into_iter();
                            self.folder = Some(folder);
                        }
                        Err(e) => return self.fail(e),
                    }
                    continue;
                }
                self.account = None;
                self.folder = None;
            }

            if self.accounts.is_none() {
                match self.source.accounts() {
                    Ok(accounts) => self.accounts = Some(accounts.into_iter()),
                    Err(e) => return self.fail(e),
                }
            }

            let Some(account) = self.accounts.as_mut().and_then(Iterator::next) else {
                self.done = true;
                return None;
            };

            if !self.filter.includes_account(&account.name) {
                debug!("Skipping account: {}", account.name);
                continue;
            }

            debug!("Processing account: {}", account.name);
            match self.source.folders(&account) {
                Ok(folders) => {
                    self.folders = folders.into_iter();
                    self.account = Some(account);
                }
                Err(e) => return self.fail(e),
            }
        }
    }
}
