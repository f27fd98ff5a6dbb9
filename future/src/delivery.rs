//! Per-thread run queue for settled continuations.
//!
//! A continuation that settles another Deferred would otherwise call the next
//! continuation from inside itself, so a chain of `n` pending combinators
//! would need `n` stack frames. Instead, the outermost [`run`] on a thread
//! drains a queue in a loop and nested calls only enqueue. Jobs still run
//! inline on the settling thread, in the order they became ready, and the
//! outermost call returns only once the queue is empty.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::mem;

/// A continuation already paired with its value.
pub(crate) type Job = Box<dyn FnOnce()>;

#[derive(Default)]
struct Queue {
    draining: bool,
    jobs: VecDeque<Job>,
}

thread_local! {
    static QUEUE: RefCell<Queue> = RefCell::new(Queue::default());
}

/// Run `job` now, or after the job currently running on this thread returns.
pub(crate) fn run(job: Job) {
    let first = QUEUE.with_borrow_mut(|queue| {
        if queue.draining {
            queue.jobs.push_back(job);
            None
        } else {
            queue.draining = true;
            Some(job)
        }
    });
    let Some(mut job) = first else {
        return;
    };

    let _drain = Drain;
    loop {
        job();
        match QUEUE.with_borrow_mut(|queue| queue.jobs.pop_front()) {
            Some(next) => job = next,
            None => break,
        }
    }
}

/// Releases the draining flag when the outermost [`run`] exits, including by
/// unwinding out of a panicking continuation.
struct Drain;

impl Drop for Drain {
    fn drop(&mut self) {
        let stranded = QUEUE.with_borrow_mut(|queue| {
            queue.draining = false;
            mem::take(&mut queue.jobs)
        });
        if stranded.is_empty() {
            return;
        }
        // Only reachable while unwinding. Hand the leftovers to the next
        // delivery on this thread rather than running user code mid-unwind.
        tracing::warn!(
            stranded = stranded.len(),
            "continuation panicked; deferring queued deliveries"
        );
        QUEUE.with_borrow_mut(|queue| queue.jobs = stranded);
    }
}
