//! In-memory [`VersionControl`] for tests.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::vcs::{ObjectType, PushOutput, VcsError, VersionControl};

#[derive(Debug, Default)]
pub(crate) struct FakeVcs {
    refs: HashMap<String, String>,
    types: HashMap<String, ObjectType>,
    push_result: PushOutput,
    resolved: RefCell<Vec<String>>,
    pushes: RefCell<Vec<(String, String)>>,
}

impl FakeVcs {
    pub(crate) fn new() -> Self {
        Self {
            push_result: PushOutput {
                success: true,
                code: Some(0),
                lines: vec!["Everything up-to-date".to_owned()],
            },
            ..Self::default()
        }
    }

    pub(crate) fn with_object(
        mut self,
        reference: &str,
        id: &str,
        object_type: ObjectType,
    ) -> Self {
        self.refs.insert(reference.to_owned(), id.to_owned());
        self.types.insert(id.to_owned(), object_type);
        self
    }

    pub(crate) fn with_push_result(mut self, push_result: PushOutput) -> Self {
        self.push_result = push_result;
        self
    }

    pub(crate) fn resolved(&self) -> Vec<String> {
        self.resolved.borrow().clone()
    }

    pub(crate) fn pushes(&self) -> Vec<(String, String)> {
        self.pushes.borrow().clone()
    }
}

impl VersionControl for FakeVcs {
    fn resolve(&self, reference: &str) -> Result<String, VcsError> {
        self.resolved.borrow_mut().push(reference.to_owned());
        self.refs.get(reference).cloned().ok_or_else(|| VcsError::Failed {
            command: format!("git rev-parse --verify --end-of-options {reference}"),
            status: "exit status: 128".to_owned(),
            stderr: "fatal: Needed a single revision".to_owned(),
        })
    }

    fn object_type(&self, id: &str) -> Result<ObjectType, VcsError> {
        self.types.get(id).cloned().ok_or_else(|| VcsError::Failed {
            command: format!("git cat-file -t {id}"),
            status: "exit status: 128".to_owned(),
            stderr: "fatal: Not a valid object name".to_owned(),
        })
    }

    fn push(&self, remote_url: &str, refspec: &str) -> Result<PushOutput, VcsError> {
        self.pushes
            .borrow_mut()
            .push((remote_url.to_owned(), refspec.to_owned()));
        Ok(self.push_result.clone())
    }
}
