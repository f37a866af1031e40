//! Counting completion tracker for dynamically spawned work.
//!
//! Every unit of work is registered with [`WorkTracker::add`] before it is
//! handed to a worker, and released with [`WorkTracker::done`] once it has
//! finished, including any units it registered itself. [`WorkTracker::wait`]
//! returns once the outstanding count drops to zero.

use std::sync::{Condvar, Mutex, MutexGuard};

pub struct WorkTracker
{
    outstanding: Mutex<usize>,
    drained: Condvar,
}

impl WorkTracker
{
    pub fn new() -> Self
    {
        WorkTracker {
            outstanding: Mutex::new(0),
            drained: Condvar::new(),
        }
    }

    /// Registers `count` units of work. Must be called before the work is
    /// made visible to any worker.
    pub fn add(&self, count: usize)
    {
        *self.lock() += count;
    }

    /// Releases one unit of work.
    ///
    /// Panics if there is no outstanding unit to release.
    pub fn done(&self)
    {
        let mut outstanding = self.lock();

        if *outstanding == 0 {
            panic!("WorkTracker::done called with no outstanding work");
        }

        *outstanding -= 1;

        if *outstanding == 0 {
            self.drained.notify_all();
        }
    }

    /// Blocks until every registered unit has been released.
    pub fn wait(&self)
    {
        let mut outstanding = self.lock();

        while *outstanding > 0 {
            outstanding = self.drained.wait(outstanding).unwrap_or_else(|poisoned| poisoned.into_inner());
        }
    }

    /// Returns a guard that releases one unit when dropped, on every exit path.
    pub fn guard(&self) -> WorkGuard<'_>
    {
        WorkGuard { tracker: self }
    }

    // A panicking worker must not wedge the waiter, so poisoning is ignored.
    fn lock(&self) -> MutexGuard<'_, usize>
    {
        self.outstanding.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for WorkTracker
{
    fn default() -> Self
    {
        Self::new()
    }
}

pub struct WorkGuard<'a>
{
    tracker: &'a WorkTracker,
}

impl Drop for WorkGuard<'_>
{
    fn drop(&mut self)
    {
        self.tracker.done();
    }
}
