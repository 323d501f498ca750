//! Loop and task constructs.
//!
//! The data-parallel constructs run over any [`Iterand`] by splitting the
//! ordinal span `0..size` and resolving ordinals to items on the worker:
//!
//! - [`for_loop`]: sequential, canonical order
//! - [`forall`]: data-parallel on the rayon pool, unordered
//! - [`coforall`]: one dedicated thread per index, joined before returning
//! - [`begin`]: a single fire-and-forget task
//! - [`cobegin!`](crate::cobegin): one task per statement, joined
//!
//! Shared [`Atomic`](crate::Atomic)/[`SyncVar`](crate::SyncVar)/
//! [`SingleVar`](crate::SingleVar) state is passed into bodies by closure
//! capture; `begin` outlives its caller's frame, so its state travels in
//! `Arc`s.
//!
//! ## Example
//!
//! ```
//! use weft_core::{forall, Atomic, Domain, MemoryOrder, Range};
//!
//! let d = Domain::new([Range::new(0, 9), Range::new(0, 9)]);
//! let visited = Atomic::new(0_i64);
//! forall(&d, |_idx| {
//!     visited.add(1, MemoryOrder::SeqCst);
//! });
//! assert_eq!(visited.read(MemoryOrder::SeqCst), 100);
//! ```

use rayon::prelude::*;

use crate::iterand::Iterand;

pub(crate) mod census {
    use std::sync::atomic::{AtomicI64, Ordering};

    static RUNNING: AtomicI64 = AtomicI64::new(0);

    pub(crate) fn add(tasks: i64) {
        RUNNING.fetch_add(tasks, Ordering::Relaxed);
    }

    pub(crate) fn sub(tasks: i64) {
        RUNNING.fetch_sub(tasks, Ordering::Relaxed);
    }

    pub(crate) fn running() -> i64 {
        RUNNING.load(Ordering::Relaxed)
    }
}

fn checked_size<S: Iterand>(target: &S, construct: &str) -> i64 {
    assert!(
        target.is_iterable(),
        "{construct} requires an iterable loop target"
    );
    match target.bounded_size() {
        Some(size) => size,
        None => panic!("{construct} requires a bounded loop target"),
    }
}

/// Runs `body` over every item of `target` sequentially, in canonical
/// order.
pub fn for_loop<S, F>(target: &S, mut body: F)
where
    S: Iterand,
    F: FnMut(S::Item),
{
    let size = checked_size(target, "for");
    for order in 0..size {
        body(target.item_at(order));
    }
}

/// Runs `body` over every item of `target` in parallel on the rayon pool.
///
/// Every item is visited exactly once; no ordering is guaranteed. Returns
/// after all iterations complete. A panicking body propagates out of the
/// call.
pub fn forall<S, F>(target: &S, body: F)
where
    S: Iterand + Sync,
    S::Item: Send,
    F: Fn(S::Item) + Send + Sync,
{
    let size = checked_size(target, "forall");
    tracing::trace!(size, "forall dispatch");
    (0..size)
        .into_par_iter()
        .for_each(|order| body(target.item_at(order)));
}

/// Spawns one task per item of `target` and joins them all before
/// returning.
///
/// Unlike [`forall`], every iteration gets a dedicated thread rather than
/// a slot on the worker pool, so bodies may block on each other (sync
/// variables, barriers) even when more of them block than the machine has
/// processors.
pub fn coforall<S, F>(target: &S, body: F)
where
    S: Iterand + Sync,
    S::Item: Send,
    F: Fn(S::Item) + Send + Sync,
{
    let size = checked_size(target, "coforall");
    tracing::trace!(size, "coforall spawn");
    census::add(size);
    std::thread::scope(|scope| {
        let body = &body;
        for order in 0..size {
            scope.spawn(move || {
                body(target.item_at(order));
                census::sub(1);
            });
        }
    });
}

/// Spawns `body` as a fire-and-forget task on the rayon pool.
///
/// The task may outlive the caller's frame, so the body must be `'static`;
/// shared state travels in `Arc`s.
pub fn begin<F>(body: F)
where
    F: FnOnce() + Send + 'static,
{
    census::add(1);
    rayon::spawn(move || {
        body();
        census::sub(1);
    });
}

#[doc(hidden)]
pub fn cobegin_run<F: FnOnce()>(task: F) {
    census::add(1);
    task();
    census::sub(1);
}

#[doc(hidden)]
pub fn cobegin_pair<A, B>(first: A, second: B)
where
    A: FnOnce() + Send,
    B: FnOnce() + Send,
{
    rayon::join(first, second);
}

/// Runs each statement closure as its own task and joins them all before
/// continuing.
///
/// ```
/// use weft_core::{cobegin, SyncVar};
///
/// let v = SyncVar::new();
/// cobegin!(
///     || v.write_ef(1),
///     || assert_eq!(v.read_fe(), 1),
/// );
/// ```
#[macro_export]
macro_rules! cobegin {
    ($task:expr $(,)?) => {
        $crate::loops::cobegin_run($task)
    };
    ($first:expr, $($rest:expr),+ $(,)?) => {
        $crate::loops::cobegin_pair(
            || $crate::loops::cobegin_run($first),
            || $crate::cobegin!($($rest),+),
        )
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::array::Array;
    use crate::atomic::{Atomic, MemoryOrder};
    use crate::domain::Domain;
    use crate::range::Range;
    use crate::tuple::Tuple;
    use crate::zip::zip;

    #[test]
    fn test_for_loop_canonical_order() {
        let d = Domain::new([Range::new(0, 1), Range::new(0, 1)]);
        let mut seen = Vec::new();
        for_loop(&d, |idx| seen.push(idx));
        assert_eq!(
            seen,
            vec![Tuple([0, 0]), Tuple([0, 1]), Tuple([1, 0]), Tuple([1, 1])]
        );
    }

    #[test]
    fn test_for_loop_over_tuple() {
        let t = Tuple([5, 6, 7]);
        let mut sum = 0;
        for_loop(&t, |v| sum += v);
        assert_eq!(sum, 18);
    }

    #[test]
    fn test_forall_visits_each_index_once() {
        let d = Domain::new([Range::new(1, 20), Range::new(1, 20)]);
        let counters: Vec<Atomic<i64>> = (0..d.size()).map(|_| Atomic::new(0)).collect();
        let visits = Array::from_vec(d.clone(), counters).unwrap();
        forall(&d, |idx| {
            visits[idx].add(1, MemoryOrder::SeqCst);
        });
        assert!(visits
            .iter()
            .all(|count| count.read(MemoryOrder::SeqCst) == 1));
    }

    #[test]
    fn test_forall_over_range() {
        let total = Atomic::new(0_i64);
        forall(&Range::new(1, 100), |v| {
            total.add(v, MemoryOrder::SeqCst);
        });
        assert_eq!(total.read(MemoryOrder::SeqCst), 5050);
    }

    #[test]
    fn test_forall_over_zip() {
        let diff = Atomic::new(0_i64);
        let z = zip((Range::new(1, 50), Range::from_low(1)));
        forall(&z, |(a, b)| {
            diff.add(b - a, MemoryOrder::SeqCst);
        });
        assert_eq!(diff.read(MemoryOrder::SeqCst), 0);
    }

    #[test]
    fn test_coforall_task_per_index() {
        let spawned = Atomic::new(0_i64);
        coforall(&Range::new(1, 32), |_| {
            spawned.add(1, MemoryOrder::SeqCst);
        });
        assert_eq!(spawned.read(MemoryOrder::SeqCst), 32);
    }

    #[test]
    #[should_panic(expected = "bounded")]
    fn test_forall_rejects_unbounded() {
        forall(&Range::from_low(0), |_| {});
    }

    #[test]
    #[should_panic(expected = "iterable")]
    fn test_for_loop_rejects_non_iterable() {
        for_loop(&Range::to_high(10), |_| {});
    }

    #[test]
    fn test_cobegin_joins_all() {
        let a = Atomic::new(0_i64);
        cobegin!(
            || a.add(1, MemoryOrder::SeqCst),
            || a.add(2, MemoryOrder::SeqCst),
            || a.add(4, MemoryOrder::SeqCst),
        );
        assert_eq!(a.read(MemoryOrder::SeqCst), 7);
    }
}
