//! Atomic variables.
//!
//! [`Atomic`] wraps the std atomic matching its value type and exposes the
//! full read/write/exchange/compare/fetch surface with an explicit
//! [`MemoryOrder`] on every operation. Atomics are shared by reference
//! into parallel loop bodies; they are never copied.

use std::fmt;
use std::sync::atomic::{
    self, AtomicBool, AtomicI32, AtomicI64, AtomicIsize, AtomicU32, AtomicU64, AtomicUsize,
    Ordering,
};

/// Memory ordering constraints for atomic operations.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum MemoryOrder {
    Relaxed,
    Acquire,
    Release,
    AcqRel,
    #[default]
    SeqCst,
}

impl MemoryOrder {
    pub(crate) fn as_ordering(self) -> Ordering {
        match self {
            MemoryOrder::Relaxed => Ordering::Relaxed,
            MemoryOrder::Acquire => Ordering::Acquire,
            MemoryOrder::Release => Ordering::Release,
            MemoryOrder::AcqRel => Ordering::AcqRel,
            MemoryOrder::SeqCst => Ordering::SeqCst,
        }
    }

    // A legal failure ordering for a compare-exchange at this success
    // ordering.
    fn failure_order(self) -> Ordering {
        match self {
            MemoryOrder::Release => Ordering::Relaxed,
            MemoryOrder::AcqRel => Ordering::Acquire,
            other => other.as_ordering(),
        }
    }
}

/// A value type with a matching std atomic.
pub trait AtomicValue: Copy + PartialEq + Send + Sync {
    /// The backing std atomic.
    type Storage: Send + Sync;

    fn into_storage(self) -> Self::Storage;
    fn load(storage: &Self::Storage, order: Ordering) -> Self;
    fn store(storage: &Self::Storage, value: Self, order: Ordering);
    fn swap(storage: &Self::Storage, value: Self, order: Ordering) -> Self;
    fn compare_exchange(
        storage: &Self::Storage,
        current: Self,
        new: Self,
        success: Ordering,
        failure: Ordering,
    ) -> Result<Self, Self>;
    fn compare_exchange_weak(
        storage: &Self::Storage,
        current: Self,
        new: Self,
        success: Ordering,
        failure: Ordering,
    ) -> Result<Self, Self>;
}

/// An [`AtomicValue`] with fetch-and-modify arithmetic.
pub trait AtomicInt: AtomicValue {
    fn fetch_add(storage: &Self::Storage, value: Self, order: Ordering) -> Self;
    fn fetch_sub(storage: &Self::Storage, value: Self, order: Ordering) -> Self;
    fn fetch_and(storage: &Self::Storage, value: Self, order: Ordering) -> Self;
    fn fetch_or(storage: &Self::Storage, value: Self, order: Ordering) -> Self;
    fn fetch_xor(storage: &Self::Storage, value: Self, order: Ordering) -> Self;
}

macro_rules! impl_atomic_value {
    ($($value:ty => $storage:ty),* $(,)?) => {
        $(
            impl AtomicValue for $value {
                type Storage = $storage;

                fn into_storage(self) -> $storage {
                    <$storage>::new(self)
                }

                fn load(storage: &$storage, order: Ordering) -> Self {
                    storage.load(order)
                }

                fn store(storage: &$storage, value: Self, order: Ordering) {
                    storage.store(value, order)
                }

                fn swap(storage: &$storage, value: Self, order: Ordering) -> Self {
                    storage.swap(value, order)
                }

                fn compare_exchange(
                    storage: &$storage,
                    current: Self,
                    new: Self,
                    success: Ordering,
                    failure: Ordering,
                ) -> Result<Self, Self> {
                    storage.compare_exchange(current, new, success, failure)
                }

                fn compare_exchange_weak(
                    storage: &$storage,
                    current: Self,
                    new: Self,
                    success: Ordering,
                    failure: Ordering,
                ) -> Result<Self, Self> {
                    storage.compare_exchange_weak(current, new, success, failure)
                }
            }
        )*
    };
}

macro_rules! impl_atomic_int {
    ($($value:ty),* $(,)?) => {
        $(
            impl AtomicInt for $value {
                fn fetch_add(storage: &Self::Storage, value: Self, order: Ordering) -> Self {
                    storage.fetch_add(value, order)
                }

                fn fetch_sub(storage: &Self::Storage, value: Self, order: Ordering) -> Self {
                    storage.fetch_sub(value, order)
                }

                fn fetch_and(storage: &Self::Storage, value: Self, order: Ordering) -> Self {
                    storage.fetch_and(value, order)
                }

                fn fetch_or(storage: &Self::Storage, value: Self, order: Ordering) -> Self {
                    storage.fetch_or(value, order)
                }

                fn fetch_xor(storage: &Self::Storage, value: Self, order: Ordering) -> Self {
                    storage.fetch_xor(value, order)
                }
            }
        )*
    };
}

impl_atomic_value!(
    bool => AtomicBool,
    i32 => AtomicI32,
    i64 => AtomicI64,
    isize => AtomicIsize,
    u32 => AtomicU32,
    u64 => AtomicU64,
    usize => AtomicUsize,
);

impl_atomic_int!(i32, i64, isize, u32, u64, usize);

/// An atomically updated variable.
pub struct Atomic<T: AtomicValue> {
    storage: T::Storage,
}

impl<T: AtomicValue> Atomic<T> {
    /// An atomic holding `value`.
    pub fn new(value: T) -> Self {
        Atomic {
            storage: value.into_storage(),
        }
    }

    /// Returns the stored value.
    pub fn read(&self, order: MemoryOrder) -> T {
        T::load(&self.storage, order.as_ordering())
    }

    /// Stores `value` as the new value.
    pub fn write(&self, value: T, order: MemoryOrder) {
        T::store(&self.storage, value, order.as_ordering());
    }

    /// Stores `value` and returns the original value.
    pub fn exchange(&self, value: T, order: MemoryOrder) -> T {
        T::swap(&self.storage, value, order.as_ordering())
    }

    /// Stores `desired` if and only if the current value equals
    /// `*expected`. Returns true if `desired` was stored, otherwise
    /// updates `*expected` to the value found.
    pub fn compare_exchange(
        &self,
        expected: &mut T,
        desired: T,
        success: MemoryOrder,
        failure: MemoryOrder,
    ) -> bool {
        match T::compare_exchange(
            &self.storage,
            *expected,
            desired,
            success.as_ordering(),
            failure.as_ordering(),
        ) {
            Ok(_) => true,
            Err(found) => {
                *expected = found;
                false
            }
        }
    }

    /// Like [`compare_exchange`](Self::compare_exchange), but may fail
    /// spuriously even when the value matched; cheaper inside retry loops
    /// on some platforms.
    pub fn compare_exchange_weak(
        &self,
        expected: &mut T,
        desired: T,
        success: MemoryOrder,
        failure: MemoryOrder,
    ) -> bool {
        match T::compare_exchange_weak(
            &self.storage,
            *expected,
            desired,
            success.as_ordering(),
            failure.as_ordering(),
        ) {
            Ok(_) => true,
            Err(found) => {
                *expected = found;
                false
            }
        }
    }

    /// Stores `desired` if and only if the current value equals
    /// `expected`. Returns true if `desired` was stored.
    pub fn compare_and_swap(&self, expected: T, desired: T, order: MemoryOrder) -> bool {
        T::compare_exchange(
            &self.storage,
            expected,
            desired,
            order.as_ordering(),
            order.failure_order(),
        )
        .is_ok()
    }

    /// Blocks until the stored value equals `value`, yielding the running
    /// thread while waiting.
    pub fn wait_for(&self, value: T, order: MemoryOrder) {
        let mut spins = 0_u32;
        while T::load(&self.storage, order.as_ordering()) != value {
            if spins < 64 {
                std::hint::spin_loop();
                spins += 1;
            } else {
                std::thread::yield_now();
            }
        }
    }
}

impl<T: AtomicInt> Atomic<T> {
    /// Adds `value` and returns the original value.
    pub fn fetch_add(&self, value: T, order: MemoryOrder) -> T {
        T::fetch_add(&self.storage, value, order.as_ordering())
    }

    /// Adds `value`.
    pub fn add(&self, value: T, order: MemoryOrder) {
        self.fetch_add(value, order);
    }

    /// Subtracts `value` and returns the original value.
    pub fn fetch_sub(&self, value: T, order: MemoryOrder) -> T {
        T::fetch_sub(&self.storage, value, order.as_ordering())
    }

    /// Subtracts `value`.
    pub fn sub(&self, value: T, order: MemoryOrder) {
        self.fetch_sub(value, order);
    }

    /// Bitwise-ands `value` in and returns the original value.
    pub fn fetch_and(&self, value: T, order: MemoryOrder) -> T {
        T::fetch_and(&self.storage, value, order.as_ordering())
    }

    /// Bitwise-ands `value` in.
    pub fn and(&self, value: T, order: MemoryOrder) {
        self.fetch_and(value, order);
    }

    /// Bitwise-ors `value` in and returns the original value.
    pub fn fetch_or(&self, value: T, order: MemoryOrder) -> T {
        T::fetch_or(&self.storage, value, order.as_ordering())
    }

    /// Bitwise-ors `value` in.
    pub fn or(&self, value: T, order: MemoryOrder) {
        self.fetch_or(value, order);
    }

    /// Bitwise-xors `value` in and returns the original value.
    pub fn fetch_xor(&self, value: T, order: MemoryOrder) -> T {
        T::fetch_xor(&self.storage, value, order.as_ordering())
    }

    /// Bitwise-xors `value` in.
    pub fn xor(&self, value: T, order: MemoryOrder) {
        self.fetch_xor(value, order);
    }
}

impl Atomic<bool> {
    /// Stores true and returns the old value.
    pub fn test_and_set(&self, order: MemoryOrder) -> bool {
        self.exchange(true, order)
    }

    /// Stores false.
    pub fn clear(&self, order: MemoryOrder) {
        self.write(false, order);
    }
}

impl<T: AtomicValue + Default> Default for Atomic<T> {
    fn default() -> Self {
        Atomic::new(T::default())
    }
}

impl<T: AtomicValue> From<T> for Atomic<T> {
    fn from(value: T) -> Self {
        Atomic::new(value)
    }
}

impl<T: AtomicValue + fmt::Display> fmt::Display for Atomic<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.read(MemoryOrder::SeqCst))
    }
}

impl<T: AtomicValue + fmt::Debug> fmt::Debug for Atomic<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Atomic")
            .field(&self.read(MemoryOrder::SeqCst))
            .finish()
    }
}

/// An atomic fence ordering non-atomic and relaxed atomic operations.
///
/// `MemoryOrder::Relaxed` is not a valid fence ordering.
pub fn atomic_fence(order: MemoryOrder) {
    atomic::fence(order.as_ordering());
}
