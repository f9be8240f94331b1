//! Recording `CommandRunner` for unit tests.
//!
//! Every invocation is stored; responses are popped from a queue, and an
//! empty queue answers with a silent success.

use crate::common::process::{CommandRunner, Invocation, ProcessOutput};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;

#[derive(Debug, Default)]
pub struct MockRunner {
    calls: RefCell<Vec<Invocation>>,
    responses: RefCell<VecDeque<io::Result<ProcessOutput>>>,
}

impl MockRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues the output for the next unanswered call.
    pub fn push(&self, output: ProcessOutput) {
        self.responses.borrow_mut().push_back(Ok(output));
    }

    /// Queues a launch failure (program not found).
    pub fn push_not_found(&self) {
        self.responses
            .borrow_mut()
            .push_back(Err(io::Error::from(io::ErrorKind::NotFound)));
    }

    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.borrow().clone()
    }
}

impl CommandRunner for MockRunner {
    fn run(&self, invocation: &Invocation) -> io::Result<ProcessOutput> {
        self.calls.borrow_mut().push(invocation.clone());
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(ProcessOutput::ok("")))
    }
}
