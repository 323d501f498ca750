//! Locales and the runtime that hosts them.
//!
//! A [`Locale`] names a unit of the machine that runs tasks and owns
//! memory. This runtime executes within one shared-memory process, so
//! every locale resolves to the local processor set; the [`Runtime`]
//! still carries a full locale table so code written against it ports
//! unchanged to a multi-locale launcher.

use std::env;
use std::fmt;

use crate::array::Array;
use crate::domain::Domain;
use crate::error::{Error, Result};
use crate::loops::census;
use crate::range::Range;

/// The environment variable selecting the locale count.
pub const NUM_LOCALES_ENV: &str = "WEFT_NUM_LOCALES";

/// A unit of the target machine that runs tasks and owns memory.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Locale {
    id: u32,
}

impl Locale {
    pub(crate) fn with_id(id: u32) -> Self {
        Locale { id }
    }

    /// The locale's index in the runtime's locale table.
    pub fn id(&self) -> i64 {
        i64::from(self.id)
    }

    /// The network name of the host running this locale.
    pub fn hostname(&self) -> String {
        env::var("HOSTNAME").unwrap_or_else(|_| "localhost".to_string())
    }

    /// A label for diagnostics, same as the display form.
    pub fn name(&self) -> String {
        self.to_string()
    }

    /// The number of tasks this locale runs in parallel.
    pub fn max_task_par(&self) -> i64 {
        rayon::current_num_threads() as i64
    }

    /// The number of processing units on this locale. `logical` counts
    /// hardware threads rather than cores; `accessible` restricts to the
    /// units this process may schedule on. Both resolve to the
    /// parallelism available to the process here.
    pub fn num_pus(&self, _logical: bool, _accessible: bool) -> i64 {
        std::thread::available_parallelism()
            .map(|count| count.get() as i64)
            .unwrap_or(1)
    }

    /// The number of tasks currently running or queued on this locale.
    pub fn running_tasks(&self) -> i64 {
        census::running()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LOCALE{}", self.id)
    }
}

/// The locale table and the notion of "here".
#[derive(Clone, Debug)]
pub struct Runtime {
    locales: Array<Locale, 1>,
    here: Locale,
}

impl Runtime {
    /// A runtime with a single locale.
    pub fn single_locale() -> Self {
        Runtime::with_locales(1)
    }

    /// A runtime with `count` locales. Aborts when `count` is not
    /// positive.
    pub fn with_locales(count: i64) -> Self {
        assert!(count > 0, "a runtime needs at least one locale");
        let space = Domain::new([Range::new(0, count - 1)]);
        let mut locales = Array::new(space);
        for id in 0..count {
            locales[id] = Locale::with_id(id as u32);
        }
        tracing::debug!(num_locales = count, "runtime initialized");
        Runtime {
            here: locales[0],
            locales,
        }
    }

    /// A runtime sized from `WEFT_NUM_LOCALES`, defaulting to one locale
    /// when unset.
    #[tracing::instrument]
    pub fn from_env() -> Result<Self> {
        match env::var(NUM_LOCALES_ENV) {
            Ok(value) => {
                let count: i64 = value.parse().map_err(|_| Error::Config {
                    name: NUM_LOCALES_ENV,
                    value: value.clone(),
                })?;
                if count <= 0 {
                    return Err(Error::Config {
                        name: NUM_LOCALES_ENV,
                        value,
                    });
                }
                Ok(Runtime::with_locales(count))
            }
            Err(_) => Ok(Runtime::single_locale()),
        }
    }

    /// The locale the current task is running on.
    pub fn here(&self) -> Locale {
        self.here
    }

    /// The number of locales in the table.
    pub fn num_locales(&self) -> i64 {
        self.locales.size()
    }

    /// The locale table.
    pub fn locales(&self) -> &Array<Locale, 1> {
        &self.locales
    }

    /// The domain indexing the locale table.
    pub fn locale_space(&self) -> Domain<1> {
        self.locales.domain().clone()
    }

    /// The locale with the given id.
    pub fn locale(&self, id: i64) -> Result<Locale> {
        self.locales
            .get(crate::tuple::Tuple([id]))
            .copied()
            .ok_or(Error::UnknownLocale { id })
    }

    /// Runs `body` on `target` and returns its result. In this
    /// shared-memory runtime the body executes in place, inside an `on`
    /// span naming the target.
    pub fn on<R>(&self, target: Locale, body: impl FnOnce() -> R) -> Result<R> {
        if target.id() >= self.num_locales() {
            return Err(Error::UnknownLocale { id: target.id() });
        }
        let span = tracing::debug_span!("on", locale = %target);
        let _guard = span.enter();
        census::add(1);
        let result = body();
        census::sub(1);
        Ok(result)
    }

    /// The number of tasks currently running or queued across the
    /// runtime.
    pub fn running_tasks(&self) -> i64 {
        census::running()
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Runtime::single_locale()
    }
}
