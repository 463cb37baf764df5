//! Observable selections.
//!
//! A [`Subject`] holds at most one value and a list of weak observer
//! references. Every [`Subject::set`] stores the value and then notifies all
//! live observers synchronously, in registration order, before returning.
//! Setting a value equal to the current one still notifies.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::{trace, warn};

use crate::ratio_errors::RatioError;

/// Receiver of subject notifications.
pub trait Observer {
    fn on_notify(&mut self);
}

pub type ObserverRef = Rc<RefCell<dyn Observer>>;

/// Holds the `notifying` flag up until dropped, unwinding included.
struct NotifyingGuard<'a>(&'a Cell<bool>);

impl<'a> NotifyingGuard<'a> {
    fn raise(flag: &'a Cell<bool>) -> Self {
        flag.set(true);
        NotifyingGuard(flag)
    }
}

impl Drop for NotifyingGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

pub struct Subject<T> {
    name: &'static str,
    value: RefCell<Option<T>>,
    observers: RefCell<Vec<Weak<RefCell<dyn Observer>>>>,
    observer_limit: Option<usize>,
    notifying: Cell<bool>,
}

impl<T: Clone> Subject<T> {
    /// Subject accepting any number of observers.
    pub fn new(name: &'static str) -> Self {
        Subject {
            name,
            value: RefCell::new(None),
            observers: RefCell::new(Vec::new()),
            observer_limit: None,
            notifying: Cell::new(false),
        }
    }

    /// Subject accepting exactly one observer.
    pub fn exclusive(name: &'static str) -> Self {
        Subject {
            observer_limit: Some(1),
            ..Subject::new(name)
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn get(&self) -> Option<T> {
        self.value.borrow().clone()
    }

    pub fn is_set(&self) -> bool {
        self.value.borrow().is_some()
    }

    /// Register `observer`; only a weak reference is kept.
    ///
    /// Return
    /// ----------
    /// * [`RatioError::ObserverLimit`] when the subject already holds as many
    ///   observers as it accepts.
    pub fn attach(&self, observer: &ObserverRef) -> Result<(), RatioError> {
        let mut observers = self.observers.borrow_mut();
        if let Some(limit) = self.observer_limit {
            if observers.len() >= limit {
                warn!(subject = self.name, limit, "observer rejected");
                return Err(RatioError::ObserverLimit {
                    subject: self.name,
                    limit,
                });
            }
        }
        observers.push(Rc::downgrade(observer));
        Ok(())
    }

    /// Number of registered observers still alive.
    pub fn observer_count(&self) -> usize {
        self.observers
            .borrow()
            .iter()
            .filter(|w| w.strong_count() > 0)
            .count()
    }

    /// Store `value` (or clear the subject with `None`) and notify every observer.
    ///
    /// Return
    /// ----------
    /// * [`RatioError::ReentrantNotification`] if called while one of the
    ///   observers is in the middle of its own update. The value is left
    ///   untouched in that case.
    pub fn set(&self, value: Option<T>) -> Result<(), RatioError> {
        let observers: Vec<ObserverRef> = self
            .observers
            .borrow()
            .iter()
            .filter_map(Weak::upgrade)
            .collect();

        if self.notifying.get() || observers.iter().any(|o| o.try_borrow_mut().is_err()) {
            warn!(subject = self.name, "re-entrant set rejected");
            return Err(RatioError::ReentrantNotification(self.name));
        }

        *self.value.borrow_mut() = value;

        let _notifying = NotifyingGuard::raise(&self.notifying);
        trace!(subject = self.name, observers = observers.len(), "notify");
        for observer in &observers {
            observer.borrow_mut().on_notify();
        }
        Ok(())
    }

    /// Drop the held value without notifying.
    ///
    /// Only for a caller that sets a sibling subject right after, so the
    /// observers see the cleared value within that single notification.
    pub(crate) fn clear_silently(&self) {
        self.value.borrow_mut().take();
    }
}

impl<T: fmt::Debug> fmt::Debug for Subject<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subject")
            .field("name", &self.name)
            .field("value", &self.value.borrow())
            .field("observers", &self.observers.borrow().len())
            .field("observer_limit", &self.observer_limit)
            .finish()
    }
}

#[cfg(test)]
mod subject_test {
    use super::*;

    struct Recorder {
        id: u8,
        log: Rc<RefCell<Vec<u8>>>,
    }

    impl Observer for Recorder {
        fn on_notify(&mut self) {
            self.log.borrow_mut().push(self.id);
        }
    }

    fn recorder(id: u8, log: &Rc<RefCell<Vec<u8>>>) -> ObserverRef {
        Rc::new(RefCell::new(Recorder {
            id,
            log: Rc::clone(log),
        }))
    }

    #[test]
    fn test_set_notifies_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let subject = Subject::new("number");
        let first = recorder(1, &log);
        let second = recorder(2, &log);
        subject.attach(&first).unwrap();
        subject.attach(&second).unwrap();

        subject.set(Some(10)).unwrap();
        assert_eq!(subject.get(), Some(10));
        assert_eq!(*log.borrow(), vec![1, 2]);
    }

    #[test]
    fn test_equal_value_still_notifies() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let subject = Subject::new("number");
        let obs = recorder(7, &log);
        subject.attach(&obs).unwrap();

        subject.set(Some(3)).unwrap();
        subject.set(Some(3)).unwrap();
        subject.set(None).unwrap();
        assert_eq!(log.borrow().len(), 3);
        assert!(!subject.is_set());
    }

    #[test]
    fn test_exclusive_subject_rejects_second_observer() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let subject: Subject<i32> = Subject::exclusive("body");
        subject.attach(&recorder(1, &log)).unwrap();

        let err = subject.attach(&recorder(2, &log)).unwrap_err();
        assert_eq!(
            err,
            RatioError::ObserverLimit {
                subject: "body",
                limit: 1
            }
        );
    }

    #[test]
    fn test_dropped_observer_is_skipped() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let subject = Subject::new("number");
        {
            let obs = recorder(1, &log);
            subject.attach(&obs).unwrap();
            assert_eq!(subject.observer_count(), 1);
        }
        assert_eq!(subject.observer_count(), 0);
        subject.set(Some(1)).unwrap();
        assert!(log.borrow().is_empty());
    }

    struct Echo {
        target: Rc<Subject<i32>>,
        outcome: Option<Result<(), RatioError>>,
    }

    impl Observer for Echo {
        fn on_notify(&mut self) {
            self.outcome = Some(self.target.set(Some(0)));
        }
    }

    #[test]
    fn test_reentrant_set_is_rejected() {
        let subject = Rc::new(Subject::new("loop"));
        let echo = Rc::new(RefCell::new(Echo {
            target: Rc::clone(&subject),
            outcome: None,
        }));
        let as_observer: ObserverRef = echo.clone();
        subject.attach(&as_observer).unwrap();

        subject.set(Some(5)).unwrap();
        assert_eq!(subject.get(), Some(5));
        assert_eq!(
            echo.borrow().outcome,
            Some(Err(RatioError::ReentrantNotification("loop")))
        );
    }

    struct Faulty;

    impl Observer for Faulty {
        fn on_notify(&mut self) {
            panic!("observer failure");
        }
    }

    #[test]
    fn test_panicking_observer_does_not_lock_the_subject() {
        let subject = Subject::new("fragile");
        let faulty: ObserverRef = Rc::new(RefCell::new(Faulty));
        subject.attach(&faulty).unwrap();

        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            subject.set(Some(1))
        }));
        assert!(outcome.is_err());
        assert!(!subject.notifying.get());

        drop(faulty);
        assert_eq!(subject.set(Some(2)), Ok(()));
        assert_eq!(subject.get(), Some(2));
    }

    #[test]
    fn test_clear_silently() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let subject = Subject::new("base");
        let obs = recorder(1, &log);
        subject.attach(&obs).unwrap();
        subject.set(Some("sun")).unwrap();

        subject.clear_silently();
        assert_eq!(subject.get(), None);
        assert_eq!(log.borrow().len(), 1);
    }
}
