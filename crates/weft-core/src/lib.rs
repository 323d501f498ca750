//! Data-parallel ranges, domains, arrays, and task constructs.
//!
//! weft-core models index spaces as first-class values and runs loops over
//! them on a shared-memory task pool:
//!
//! - [`Range`]: strided, optionally open-ended 1-D index sequences
//! - [`Domain`]: rank-N rectangular index spaces built from ranges
//! - [`AssocDomain`]: dynamic ordered index sets
//! - [`Array`]: dense storage over a rectangular domain
//! - [`zip`]: lockstep iteration over heterogeneous targets
//! - [`for_loop`] / [`forall`] / [`coforall`] / [`begin`] /
//!   [`cobegin!`](crate::cobegin): loop and task constructs
//! - [`Atomic`], [`SyncVar`], [`SingleVar`]: task coordination
//! - [`Runtime`] / [`Locale`]: the execution substrate
//!
//! Every loopable value implements [`Iterand`], which maps iteration
//! ordinals `0..size` to items; the loop constructs split the ordinal
//! span and resolve items on the worker, so ranges, domains, arrays,
//! associative domains, and zips all drive the same machinery.
//!
//! ## Example
//!
//! ```
//! use weft_core::{forall, Array, Atomic, Domain, MemoryOrder, Range};
//!
//! let d = Domain::new([Range::new(1, 8), Range::new(1, 8)]);
//! let squares = Array::from_vec(
//!     d.clone(),
//!     d.iter().map(|idx| idx[0] * idx[1]).collect(),
//! )
//! .unwrap();
//!
//! let total = Atomic::new(0_i64);
//! forall(&d, |idx| {
//!     total.add(squares[idx], MemoryOrder::SeqCst);
//! });
//! assert_eq!(total.read(MemoryOrder::SeqCst), 36 * 36);
//! ```

pub mod array;
pub mod assoc;
pub mod atomic;
pub mod dmap;
pub mod domain;
pub mod error;
pub mod index;
pub mod io;
pub mod iterand;
pub mod locale;
pub mod loops;
pub mod range;
pub mod sync;
pub mod tuple;
pub mod zip;

pub use array::Array;
pub use assoc::{AssocDomain, IndexBuffer};
pub use atomic::{atomic_fence, Atomic, MemoryOrder};
pub use dmap::{DefaultDist, Distribution, RectangularDom};
pub use domain::Domain;
pub use error::{Error, Result};
pub use index::IndexValue;
pub use io::{write, writeln};
pub use iterand::Iterand;
pub use locale::{Locale, Runtime};
pub use loops::{begin, coforall, for_loop, forall};
pub use range::{BoundedKind, Range};
pub use sync::{SingleVar, SyncVar};
pub use tuple::Tuple;
pub use zip::{zip, ZipRange};
