/// One-shot timers and the search debouncer built on them
use gloo_timers::callback::Timeout;

/// Something that can run a task once after a delay.
///
/// Dropping the returned handle cancels the task if it hasn't fired yet.
pub trait Scheduler {
    type Handle;

    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Self::Handle;
}

/// Browser timers via `setTimeout`
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeoutScheduler;

impl Scheduler for TimeoutScheduler {
    type Handle = Timeout;

    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Timeout {
        Timeout::new(delay_ms, task)
    }
}

/// Holds at most one pending task; scheduling a new one cancels the previous
pub struct Debouncer<S: Scheduler> {
    delay_ms: u32,
    pending: Option<S::Handle>,
}

impl<S: Scheduler> Debouncer<S> {
    pub fn new(delay_ms: u32) -> Self {
        Debouncer {
            delay_ms,
            pending: None,
        }
    }

    pub fn call(&mut self, scheduler: &S, task: impl FnOnce() + 'static) {
        // Drop first so the old timer is cleared before the new one starts
        self.pending.take();
        self.pending = Some(scheduler.schedule(self.delay_ms, Box::new(task)));
    }

    pub fn cancel(&mut self) {
        self.pending.take();
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::Scheduler;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    struct Pending {
        due: u64,
        cancelled: Rc<Cell<bool>>,
        task: Option<Box<dyn FnOnce()>>,
    }

    #[derive(Default)]
    struct Clock {
        now: u64,
        tasks: Vec<Pending>,
    }

    /// Virtual clock for driving timers deterministically in tests
    #[derive(Clone, Default)]
    pub struct ManualScheduler {
        clock: Rc<RefCell<Clock>>,
    }

    pub struct ManualHandle {
        cancelled: Rc<Cell<bool>>,
    }

    impl Drop for ManualHandle {
        fn drop(&mut self) {
            self.cancelled.set(true);
        }
    }

    impl ManualScheduler {
        pub fn now(&self) -> u64 {
            self.clock.borrow().now
        }

        pub fn pending(&self) -> usize {
            self.clock
                .borrow()
                .tasks
                .iter()
                .filter(|p| p.task.is_some() && !p.cancelled.get())
                .count()
        }

        /// Move the clock forward, running every task that comes due in order
        pub fn advance(&self, ms: u64) {
            let target = self.clock.borrow().now + ms;

            loop {
                let next = {
                    let mut guard = self.clock.borrow_mut();
                    let clock = &mut *guard;
                    let found = clock
                        .tasks
                        .iter_mut()
                        .filter(|p| p.task.is_some() && !p.cancelled.get() && p.due <= target)
                        .min_by_key(|p| p.due);
                    match found {
                        Some(pending) => {
                            let due = pending.due;
                            let task = pending.task.take();
                            clock.now = due;
                            task
                        }
                        None => None,
                    }
                };

                match next {
                    Some(task) => task(),
                    None => break,
                }
            }

            let mut clock = self.clock.borrow_mut();
            clock.now = target;
            clock.tasks.retain(|p| p.task.is_some() && !p.cancelled.get());
        }
    }

    impl Scheduler for ManualScheduler {
        type Handle = ManualHandle;

        fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> ManualHandle {
            let cancelled = Rc::new(Cell::new(false));
            let mut clock = self.clock.borrow_mut();
            let due = clock.now + delay_ms as u64;
            clock.tasks.push(Pending {
                due,
                cancelled: cancelled.clone(),
                task: Some(task),
            });
            ManualHandle { cancelled }
        }
    }
}
